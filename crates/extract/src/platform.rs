//! Target platform (Minecraft) version parsing.
//!
//! Descriptors express the supported game versions as constraints in several
//! dialects: exact (`1.20.1`), semver ranges (`>=1.20 <1.21`, `~1.20.1`),
//! Maven ranges (`[1.20,1.21)`) and wildcards (`1.20.x`). Rather than
//! interpreting each dialect, every `major.minor[.patch]` token is collected.

use crate::consts::VERSION_TOKEN_REGEX;
use serde_json::Value;

/// Collects the version tokens of every constraint, de-duplicated and
/// ordered numerically (so `1.9` sorts before `1.20`).
pub fn platform_versions<'a>(constraints: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut versions: Vec<(Vec<u64>, String)> = constraints
        .into_iter()
        .flat_map(|constraint| VERSION_TOKEN_REGEX.find_iter(constraint))
        .map(|token| (numeric_key(token.as_str()), token.as_str().to_string()))
        .collect();
    versions.sort();
    versions.dedup_by(|a, b| a.1 == b.1);
    versions.into_iter().map(|(_, version)| version).collect()
}

/// Platform versions from a JSON constraint: a string or an array of strings.
pub(crate) fn from_json(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(constraint)) => platform_versions([constraint.as_str()]),
        Some(Value::Array(items)) => platform_versions(items.iter().filter_map(Value::as_str)),
        _ => Vec::new(),
    }
}

fn numeric_key(version: &str) -> Vec<u64> {
    version.split('.').map(|part| part.parse().unwrap_or(u64::MAX)).collect()
}
