//! Post-processing of a [`ScanResult`].
//!
//! Every operation borrows a result and returns a new one; failures, timing
//! and candidate counts are carried over untouched.

use crate::result::ScanResult;
use derive_more::Display;
use modlist_extract::models::{Loader, Record};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// Keep the first record for each [dedup key](Record::dedup_key), in order.
pub fn dedup(result: &ScanResult) -> ScanResult {
    let mut seen = HashSet::new();
    let records = result.records.iter().filter(|record| seen.insert(record.dedup_key())).cloned().collect();
    result.with_records(records)
}

/// Keep only records identified with `loader`.
pub fn filter_by_loader(result: &ScanResult, loader: Loader) -> ScanResult {
    let records = result.records.iter().filter(|record| record.loader == loader).cloned().collect();
    result.with_records(records)
}

/// Drop records no extractor recognised.
pub fn exclude_unknown(result: &ScanResult) -> ScanResult {
    let records = result.records.iter().filter(|record| !record.loader.is_unknown()).cloned().collect();
    result.with_records(records)
}

/// The record field to sort by.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    #[display("name")]
    Name,
    #[display("loader")]
    Loader,
    #[display("version")]
    Version,
    #[display("filename")]
    Filename,
}

impl SortField {
    pub const ALL: [SortField; 4] = [SortField::Name, SortField::Loader, SortField::Version, SortField::Filename];

    fn key(&self, record: &Record) -> String {
        match self {
            SortField::Name => record.display_name.to_lowercase(),
            SortField::Loader => record.loader.as_str().to_string(),
            SortField::Version => record.version.to_lowercase(),
            SortField::Filename => record.source_filename.to_lowercase(),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "display_name" => Ok(SortField::Name),
            "loader" => Ok(SortField::Loader),
            "version" => Ok(SortField::Version),
            "filename" | "file" | "source_filename" => Ok(SortField::Filename),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

/// Stable, case-insensitive sort. Reversing keeps equal records in their
/// original relative order.
pub fn sort_by(result: &ScanResult, field: SortField, reverse: bool) -> ScanResult {
    let mut keyed: Vec<(String, &Record)> = result.records.iter().map(|record| (field.key(record), record)).collect();
    if reverse {
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
    }
    result.with_records(keyed.into_iter().map(|(_, record)| record.clone()).collect())
}

/// Records sharing a dedup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub key: String,
    /// Every record with this key, in result order. Always more than one.
    pub records: Vec<Record>,
}

/// Groups of records that share a dedup key, in order of first appearance.
pub fn duplicates(result: &ScanResult) -> Vec<Duplicate> {
    let mut groups: Vec<Duplicate> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in &result.records {
        let key = record.dedup_key();
        match positions.get(&key) {
            Some(&position) => groups[position].records.push(record.clone()),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(Duplicate {
                    key,
                    records: vec![record.clone()],
                });
            },
        }
    }
    groups.retain(|group| group.records.len() > 1);
    groups
}

/// The post-processing steps requested for one run, applied in a fixed
/// order: filter by loader, exclude unknown, dedup, sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub filter_loader: Option<Loader>,
    pub exclude_unknown: bool,
    pub dedup: bool,
    pub sort: Option<(SortField, bool)>,
}

impl Pipeline {
    pub fn apply(&self, result: &ScanResult) -> ScanResult {
        let mut result = match self.filter_loader {
            Some(loader) => filter_by_loader(result, loader),
            None => result.clone(),
        };
        if self.exclude_unknown {
            result = exclude_unknown(&result);
        }
        if self.dedup {
            result = dedup(&result);
        }
        if let Some((field, reverse)) = self.sort {
            result = sort_by(&result, field, reverse);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Failure, FailureKind};
    use rstest::rstest;
    use std::collections::BTreeSet;

    fn record(identifier: &str, name: &str, loader: Loader, version: &str, file_name: &str) -> Record {
        Record {
            display_name: name.to_string(),
            identifier: identifier.to_string(),
            loader,
            version: version.to_string(),
            source_filename: file_name.to_string(),
            authors: None,
            description: None,
            target_platform_versions: Vec::new(),
            dependencies: BTreeSet::new(),
            disabled: false,
        }
    }

    fn result(records: Vec<Record>) -> ScanResult {
        let mut result = ScanResult::empty();
        result.total_candidates = records.len() + 1;
        result.records = records;
        result.failures = vec![Failure::new("broken.jar", FailureKind::Unreadable, "not a valid archive")];
        result
    }

    fn identifiers(result: &ScanResult) -> Vec<&str> {
        result.records.iter().map(|record| record.identifier.as_str()).collect()
    }

    fn sample() -> ScanResult {
        result(vec![
            record("sodium", "Sodium", Loader::Fabric, "0.5.3", "sodium-0.5.3.jar"),
            record("create", "create", Loader::Forge, "0.5.1", "create-0.5.1.jar"),
            record("", "Mystery", Loader::Unknown, "Unknown", "mystery.jar"),
            record("sodium", "Sodium", Loader::Fabric, "0.5.8", "sodium-0.5.8.jar"),
            record("jei", "Just Enough Items", Loader::NeoForge, "19.0", "jei.jar"),
            record("", "mystery", Loader::Unknown, "2", "mystery-2.jar"),
        ])
    }

    #[test]
    fn test_dedup_keeps_first() {
        let deduped = dedup(&sample());
        assert_eq!(identifiers(&deduped), ["sodium", "create", "", "jei"]);
        assert_eq!(deduped.records[0].version, "0.5.3");
        assert_eq!(deduped.failures.len(), 1);
        assert_eq!(deduped.total_candidates, 7);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = dedup(&sample());
        assert_eq!(dedup(&once).records, once.records);
    }

    #[test]
    fn test_filters() {
        assert_eq!(identifiers(&filter_by_loader(&sample(), Loader::Fabric)), ["sodium", "sodium"]);
        assert_eq!(identifiers(&exclude_unknown(&sample())), ["sodium", "create", "sodium", "jei"]);
    }

    #[rstest]
    #[case(SortField::Name, false, &["create-0.5.1.jar", "jei.jar", "mystery.jar", "mystery-2.jar", "sodium-0.5.3.jar", "sodium-0.5.8.jar"])]
    #[case(SortField::Name, true, &["sodium-0.5.3.jar", "sodium-0.5.8.jar", "mystery.jar", "mystery-2.jar", "jei.jar", "create-0.5.1.jar"])]
    #[case(SortField::Loader, false, &["sodium-0.5.3.jar", "sodium-0.5.8.jar", "create-0.5.1.jar", "jei.jar", "mystery.jar", "mystery-2.jar"])]
    #[case(SortField::Filename, false, &["create-0.5.1.jar", "jei.jar", "mystery-2.jar", "mystery.jar", "sodium-0.5.3.jar", "sodium-0.5.8.jar"])]
    fn test_sort_by(#[case] field: SortField, #[case] reverse: bool, #[case] expected: &[&str]) {
        let sorted = sort_by(&sample(), field, reverse);
        let files: Vec<&str> = sorted.records.iter().map(|record| record.source_filename.as_str()).collect();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_duplicates() {
        let groups = duplicates(&sample());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "sodium");
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[1].key, "mystery");
        assert!(duplicates(&dedup(&sample())).is_empty());
    }

    #[test]
    fn test_pipeline_order() {
        let pipeline = Pipeline {
            filter_loader: None,
            exclude_unknown: true,
            dedup: true,
            sort: Some((SortField::Name, false)),
        };
        assert_eq!(identifiers(&pipeline.apply(&sample())), ["create", "jei", "sodium"]);
        assert_eq!(Pipeline::default().apply(&sample()).records, sample().records);
    }

    #[rstest]
    #[case("name", SortField::Name)]
    #[case("Loader", SortField::Loader)]
    #[case("version", SortField::Version)]
    #[case("filename", SortField::Filename)]
    fn test_sort_field_parse(#[case] input: &str, #[case] expected: SortField) {
        assert_eq!(input.parse::<SortField>().unwrap(), expected);
        assert_eq!(expected.to_string().parse::<SortField>().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_scan_then_dedup_keeps_first_in_traversal_order() {
        use modlist_archive::fixture::JarBuilder;
        let dir = tempfile::TempDir::new().unwrap();
        for (file_name, version) in [("examplemod-1.1.jar", "1.1"), ("examplemod-1.0.jar", "1.0")] {
            JarBuilder::new()
                .entry("fabric.mod.json", format!(r#"{{"id": "examplemod", "version": "{version}"}}"#))
                .write_to(dir.path().join(file_name));
        }
        let scanned = crate::scan::scan(dir.path(), crate::scan::ScanOptions::default()).await.unwrap();
        assert_eq!(duplicates(&scanned).len(), 1);
        let deduped = dedup(&scanned);
        assert_eq!(deduped.records.len(), 1);
        assert_eq!(deduped.records[0].source_filename, "examplemod-1.0.jar");
        assert_eq!(deduped.total_candidates, 2);
    }
}
