use crate::error::{ErrorKind, Result};
use crate::{MAX_ENTRY_SIZE, decode_text, disabled};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::fs::File;
use std::io::{BufReader, ErrorKind as IoErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::instrument;
use zip::ZipArchive;
use zip::result::ZipError;

/// A read-only view over one open archive.
///
/// The entry listing is captured once at [`open`](Self::open) so that
/// [`has_entry`](Self::has_entry) never touches the file again. Reading an
/// entry needs `&mut self` because the underlying reader seeks.
pub struct ArchiveHandle {
    path: PathBuf,
    disabled: bool,
    entries: HashSet<String>,
    archive: ZipArchive<BufReader<File>>,
}

impl ArchiveHandle {
    /// Open an archive and list its entries.
    ///
    /// # Errors
    ///
    /// - [`Unreadable`](ErrorKind::Unreadable) if the file cannot be opened
    ///   (missing, permission denied, other I/O failures).
    /// - [`NotAnArchive`](ErrorKind::NotAnArchive) if the file is empty,
    ///   truncated, or not a ZIP container.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| Self::map_io_error(e, &path))?;
        let length = file.metadata().map_err(|e| Self::map_io_error(e, &path))?.len();
        if length == 0 {
            exn::bail!(ErrorKind::NotAnArchive { path, reason: "empty file".to_string() });
        }
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| Self::map_open_error(e, &path))?;
        let entries = archive.file_names().map(str::to_string).collect();
        let disabled = disabled::is_disabled(&path);
        Ok(Self { path, disabled, entries, archive })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the archive's file name carries the `.disabled` suffix.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// File name used for identification (disabled suffix stripped).
    pub fn identification_name(&self) -> String {
        disabled::identification_name(&self.path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry with exactly this name exists.
    pub fn has_entry(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    /// Returns the first of `names` that exists in the archive.
    pub fn first_entry<'a>(&self, names: &[&'a str]) -> Option<&'a str> {
        names.iter().copied().find(|name| self.has_entry(name))
    }

    /// Read an entry's uncompressed bytes.
    ///
    /// # Errors
    ///
    /// - [`EntryMissing`](ErrorKind::EntryMissing) if the entry doesn't exist.
    /// - [`DecodeError`](ErrorKind::DecodeError) if the compressed stream is
    ///   corrupt or the entry exceeds [`MAX_ENTRY_SIZE`].
    #[instrument(level = "trace", skip(self), fields(path = %self.path.display()))]
    pub fn read_bytes(&mut self, name: &str) -> Result<Vec<u8>> {
        if !self.has_entry(name) {
            exn::bail!(ErrorKind::EntryMissing(name.to_string()));
        }
        let entry = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => ErrorKind::EntryMissing(name.to_string()),
            other => Self::decode_error(name, other),
        })?;
        if entry.size() > MAX_ENTRY_SIZE {
            exn::bail!(Self::decode_error(name, format!("entry is {} bytes, limit is {}", entry.size(), MAX_ENTRY_SIZE)));
        }
        let mut buffer = Vec::new();
        // The declared size can lie; never read past the limit regardless.
        entry.take(MAX_ENTRY_SIZE + 1).read_to_end(&mut buffer).map_err(|e| Self::decode_error(name, e))?;
        if buffer.len() as u64 > MAX_ENTRY_SIZE {
            exn::bail!(Self::decode_error(name, "entry exceeds size limit"));
        }
        Ok(buffer)
    }

    /// Read an entry as text. See [`decode_text`] for the decoding rules.
    ///
    /// # Errors
    ///
    /// Same as [`read_bytes`](Self::read_bytes).
    pub fn read_text(&mut self, name: &str) -> Result<String> {
        self.read_bytes(name).map(decode_text)
    }

    fn decode_error(entry: &str, reason: impl ToString) -> ErrorKind {
        ErrorKind::DecodeError {
            entry: entry.to_string(),
            reason: reason.to_string(),
        }
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        ErrorKind::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }

    fn map_open_error(e: ZipError, path: &Path) -> ErrorKind {
        match e {
            // Running out of bytes while reading the central directory is a
            // truncated archive, not an I/O problem.
            ZipError::Io(io) if io.kind() == IoErrorKind::UnexpectedEof => ErrorKind::NotAnArchive {
                path: path.to_path_buf(),
                reason: "truncated archive".to_string(),
            },
            ZipError::Io(io) => Self::map_io_error(io, path),
            other => ErrorKind::NotAnArchive {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

impl Debug for ArchiveHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.path)
            .field("disabled", &self.disabled)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::JarBuilder;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, jar: JarBuilder) -> PathBuf {
        let path = dir.path().join(name);
        jar.write_to(&path);
        path
    }

    #[test]
    fn test_open_lists_entries() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "example.jar",
            JarBuilder::new().entry("fabric.mod.json", "{}").entry("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
        );
        let handle = ArchiveHandle::open(&path).unwrap();
        assert_eq!(handle.len(), 2);
        assert!(handle.has_entry("fabric.mod.json"));
        assert!(handle.has_entry("META-INF/MANIFEST.MF"));
        assert!(!handle.has_entry("mcmod.info"));
        assert!(!handle.is_disabled());
        assert_eq!(handle.first_entry(&["mcmod.info", "fabric.mod.json"]), Some("fabric.mod.json"));
    }

    #[test]
    fn test_read_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "example.jar", JarBuilder::new().entry("mcmod.info", "[{\"modid\": \"x\"}]"));
        let mut handle = ArchiveHandle::open(&path).unwrap();
        assert_eq!(handle.read_text("mcmod.info").unwrap(), "[{\"modid\": \"x\"}]");
    }

    #[test]
    fn test_read_missing_entry() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "example.jar", JarBuilder::new().entry("a.txt", "a"));
        let mut handle = ArchiveHandle::open(&path).unwrap();
        let err = handle.read_text("fabric.mod.json").unwrap_err();
        assert_eq!(*err, ErrorKind::EntryMissing("fabric.mod.json".to_string()));
    }

    #[test]
    fn test_read_oversized_entry() {
        let dir = TempDir::new().unwrap();
        let oversized = vec![b' '; usize::try_from(MAX_ENTRY_SIZE).unwrap() + 1];
        let path = write(
            &dir,
            "huge.jar",
            JarBuilder::new().entry("fabric.mod.json", &oversized).entry("small.txt", "ok"),
        );
        let mut handle = ArchiveHandle::open(&path).unwrap();
        let err = handle.read_text("fabric.mod.json").unwrap_err();
        assert!(matches!(&*err, ErrorKind::DecodeError { entry, .. } if entry == "fabric.mod.json"));
        // The handle stays usable after a rejected entry.
        assert_eq!(handle.read_text("small.txt").unwrap(), "ok");
    }

    #[test]
    fn test_read_entry_at_limit() {
        let dir = TempDir::new().unwrap();
        let exact = vec![b' '; usize::try_from(MAX_ENTRY_SIZE).unwrap()];
        let path = write(&dir, "big.jar", JarBuilder::new().entry("mcmod.info", &exact));
        let mut handle = ArchiveHandle::open(&path).unwrap();
        assert_eq!(handle.read_bytes("mcmod.info").unwrap().len() as u64, MAX_ENTRY_SIZE);
    }

    #[test]
    fn test_disabled_suffix() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sodium.jar.disabled", JarBuilder::new().entry("fabric.mod.json", "{}"));
        let handle = ArchiveHandle::open(&path).unwrap();
        assert!(handle.is_disabled());
        assert_eq!(handle.identification_name(), "sodium.jar");
    }

    #[test]
    fn test_open_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.jar");
        std::fs::write(&path, b"").unwrap();
        let err = ArchiveHandle::open(&path).unwrap_err();
        assert!(matches!(*err, ErrorKind::NotAnArchive { .. }));
    }

    #[test]
    fn test_open_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.jar");
        std::fs::write(&path, b"this is definitely not a zip file, just some text").unwrap();
        let err = ArchiveHandle::open(&path).unwrap_err();
        assert!(matches!(*err, ErrorKind::NotAnArchive { .. }));
    }

    #[test]
    fn test_open_truncated() {
        let dir = TempDir::new().unwrap();
        let bytes = JarBuilder::new().entry("fabric.mod.json", "{\"id\": \"truncated\"}").to_bytes();
        let path = dir.path().join("truncated.jar");
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
        assert!(ArchiveHandle::open(&path).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ArchiveHandle::open(dir.path().join("nope.jar")).unwrap_err();
        assert!(matches!(*err, ErrorKind::Unreadable { .. }));
    }
}
