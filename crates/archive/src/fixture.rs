//! In-memory construction of test archives.
//!
//! Enabled with the `fixture` feature so that other crates can build real
//! JARs in their tests. Panics on failure; never use outside of tests.

use std::io::{Cursor, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for a ZIP archive with the given entries, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct JarBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl JarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn entry(mut self, name: impl Into<String>, content: impl AsRef<[u8]>) -> Self {
        self.entries.push((name.into(), content.as_ref().to_vec()));
        self
    }

    /// Serialize the archive.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in &self.entries {
            writer.start_file(name.as_str(), SimpleFileOptions::default()).expect("start zip entry");
            writer.write_all(content).expect("write zip entry");
        }
        writer.finish().expect("finish zip archive").into_inner()
    }

    /// Serialize the archive to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) {
        std::fs::write(path, self.to_bytes()).expect("write archive to disk");
    }
}
