use super::Loader;
use std::collections::BTreeSet;

/// The canonical identity of one mod archive, normalised across loaders.
///
/// Produced by an extractor (or by the best-effort fallback, in which case
/// `loader` is [`Loader::Unknown`] and `identifier` may be empty).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Human label; falls back to the identifier, then the archive stem
    pub display_name: String,
    /// Loader-scoped mod id
    pub identifier: String,
    pub loader: Loader,
    pub version: String,
    /// On-disk file name, including any `.disabled` suffix
    pub source_filename: String,
    /// Authors joined with `", "`
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub authors: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub description: Option<String>,
    /// Minecraft versions the mod declares support for, oldest first
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty", default))]
    pub target_platform_versions: Vec<String>,
    /// Ids of mods and platform components this mod requires
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "BTreeSet::is_empty", default))]
    pub dependencies: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "std::ops::Not::not", default))]
    pub disabled: bool,
}
impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}
impl Record {
    /// Key used to detect duplicates: the identifier, or the lower-cased
    /// display name for records that have none.
    pub fn dedup_key(&self) -> String {
        if self.identifier.is_empty() { self.display_name.to_lowercase() } else { self.identifier.clone() }
    }
}
