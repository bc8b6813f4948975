//! Minimal reader for the main section of `META-INF/MANIFEST.MF`.

use modlist_archive::{ArchiveHandle, MANIFEST_ENTRY};
use std::collections::HashMap;
use tracing::debug;

const TITLE_KEYS: [&str; 3] = ["Implementation-Title", "Bundle-Name", "Automatic-Module-Name"];
const VERSION_KEYS: [&str; 2] = ["Implementation-Version", "Bundle-Version"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Manifest {
    attributes: HashMap<String, String>,
}

impl Manifest {
    /// Reads the archive's manifest. A missing or unreadable manifest is
    /// treated as empty; it is only ever used as a best-effort source.
    pub(crate) fn read(handle: &mut ArchiveHandle) -> Option<Self> {
        if !handle.has_entry(MANIFEST_ENTRY) {
            return None;
        }
        match handle.read_text(MANIFEST_ENTRY) {
            Ok(text) => Some(Self::parse(&text)),
            Err(err) => {
                debug!(error = %err, "ignoring unreadable manifest");
                None
            },
        }
    }

    /// Parses `Key: Value` lines up to the first blank line. Lines starting
    /// with a single space continue the previous value.
    pub(crate) fn parse(text: &str) -> Self {
        let mut attributes = HashMap::new();
        let mut current: Option<(String, String)> = None;
        for line in text.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                break;
            }
            if let Some(continued) = line.strip_prefix(' ') {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(continued);
                }
                continue;
            }
            if let Some((key, value)) = current.take() {
                attributes.entry(key).or_insert(value);
            }
            current = line.split_once(':').map(|(key, value)| (key.trim().to_string(), value.trim().to_string()));
        }
        if let Some((key, value)) = current {
            attributes.entry(key).or_insert(value);
        }
        Self { attributes }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    pub(crate) fn title(&self) -> Option<&str> {
        TITLE_KEYS.iter().find_map(|key| self.get(key))
    }

    pub(crate) fn version(&self) -> Option<&str> {
        VERSION_KEYS.iter().find_map(|key| self.get(key))
    }

    pub(crate) fn implementation_version(&self) -> Option<&str> {
        self.get("Implementation-Version")
    }
}
