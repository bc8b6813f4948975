use crate::consts::UNKNOWN_VERSION;
use crate::models::{Loader, Record};
use modlist_archive::ArchiveHandle;
use modlist_archive::disabled;
use std::collections::BTreeSet;
use std::path::Path;

/// Per-archive facts an extractor needs besides the descriptor itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// On-disk file name, including any `.disabled` suffix.
    pub file_name: String,
    /// File name used for identification (disabled suffix stripped).
    pub identification_name: String,
    pub disabled: bool,
}

impl Context {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let (identification_name, disabled) = disabled::split(&file_name);
        Self {
            identification_name: identification_name.to_string(),
            disabled,
            file_name,
        }
    }

    pub fn from_handle(handle: &ArchiveHandle) -> Self {
        let file_name = handle.path().file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
        Self::new(file_name)
    }

    /// Identification name without its extension: `jei-1.20.1.jar` becomes
    /// `jei-1.20.1`.
    pub fn stem(&self) -> &str {
        Path::new(&self.identification_name).file_stem().and_then(|stem| stem.to_str()).unwrap_or(&self.identification_name)
    }

    /// A record for this archive with only the identity fields filled in. The
    /// display name defaults to the identifier, or the stem when that is empty.
    pub(crate) fn record(&self, loader: Loader, identifier: String, version: String) -> Record {
        let display_name = if identifier.is_empty() { self.stem().to_string() } else { identifier.clone() };
        Record {
            display_name,
            identifier,
            loader,
            version: if version.is_empty() { UNKNOWN_VERSION.to_string() } else { version },
            source_filename: self.file_name.clone(),
            authors: None,
            description: None,
            target_platform_versions: Vec::new(),
            dependencies: BTreeSet::new(),
            disabled: self.disabled,
        }
    }
}
