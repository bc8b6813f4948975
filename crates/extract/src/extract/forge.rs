//! Forge and NeoForge (`META-INF/neoforge.mods.toml`, `META-INF/mods.toml`).

use super::Context;
use super::classify::{Signals, classify};
use super::manifest::Manifest;
use crate::consts::{MINECRAFT_ID, PLACEHOLDER_REGEX};
use crate::error::{ErrorKind, Result};
use crate::models::Record;
use crate::platform;
use toml::{Table, Value};
use tracing::debug;

pub(crate) fn extract(descriptor: &'static str, text: &str, manifest: Option<&Manifest>, context: &Context) -> Result<Record> {
    let table: Table = text.parse().map_err(|e: toml::de::Error| ErrorKind::InvalidDescriptor {
        descriptor,
        reason: e.message().to_string(),
    })?;
    let Some(first) = table.get("mods").and_then(Value::as_array).and_then(|mods| mods.first()) else {
        exn::bail!(ErrorKind::MissingField { descriptor, field: "mods" });
    };
    let Some(first) = first.as_table() else {
        exn::bail!(ErrorKind::InvalidDescriptor {
            descriptor,
            reason: "[[mods]] entries must be tables".to_string(),
        });
    };

    let identifier = required(first, descriptor, "modId")?;
    let mut version = required(first, descriptor, "version")?;
    if PLACEHOLDER_REGEX.is_match(&version) {
        if let Some(resolved) = manifest.and_then(Manifest::implementation_version) {
            debug!(placeholder = %version, resolved, "resolved version placeholder from manifest");
            version = resolved.to_string();
        }
    }

    let dependencies = table.get("dependencies").and_then(Value::as_table);
    let all_dependencies: Vec<&Table> = dependencies
        .into_iter()
        .flat_map(|by_mod| by_mod.values())
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(Value::as_table)
        .collect();
    let own_dependencies: Vec<&Table> = dependencies
        .and_then(|by_mod| {
            by_mod.get(&identifier).or_else(|| if by_mod.len() == 1 { by_mod.values().next() } else { None })
        })
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(Value::as_table).collect())
        .unwrap_or_default();

    let classification = classify(&Signals {
        descriptor,
        mod_loader: string(&table, "modLoader"),
        dependency_ids: all_dependencies.iter().filter_map(|dependency| string(dependency, "modId")).collect(),
        file_name: &context.file_name,
        loader_version: string(&table, "loaderVersion"),
    });
    debug!(loader = %classification.loader, signal = ?classification.signal, "classified mods.toml archive");

    let mut record = context.record(classification.loader, identifier, version);
    if let Some(name) = string(first, "displayName") {
        record.display_name = name.to_string();
    }
    record.authors = authors(first.get("authors"));
    record.description = string(first, "description").map(str::to_string);
    for dependency in own_dependencies {
        let Some(id) = string(dependency, "modId") else {
            continue;
        };
        if id.eq_ignore_ascii_case(MINECRAFT_ID) {
            record.target_platform_versions = platform::platform_versions(string(dependency, "versionRange"));
        }
        if is_mandatory(dependency) {
            record.dependencies.insert(id.to_string());
        }
    }
    Ok(record)
}

/// `type = "required"` (NeoForge) or `mandatory = true` (Forge). Entries
/// declaring neither default to required, as NeoForge does.
fn is_mandatory(dependency: &Table) -> bool {
    match (dependency.get("type").and_then(Value::as_str), dependency.get("mandatory").and_then(Value::as_bool)) {
        (Some(kind), _) => kind.trim().eq_ignore_ascii_case("required"),
        (None, Some(mandatory)) => mandatory,
        (None, None) => true,
    }
}

fn string<'a>(table: &'a Table, key: &str) -> Option<&'a str> {
    table.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

fn required(table: &Table, descriptor: &'static str, field: &'static str) -> Result<String> {
    match table.get(field) {
        None => exn::bail!(ErrorKind::MissingField { descriptor, field }),
        Some(Value::String(value)) if value.trim().is_empty() => exn::bail!(ErrorKind::MissingField { descriptor, field }),
        Some(Value::String(value)) => Ok(value.trim().to_string()),
        Some(other) => exn::bail!(ErrorKind::ParseError {
            field,
            value: format!("expected a string, found {}", other.type_str()),
        }),
    }
}

fn authors(value: Option<&Value>) -> Option<String> {
    let joined = match value? {
        Value::String(authors) => authors.trim().to_string(),
        Value::Array(authors) => authors
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };
    if joined.is_empty() { None } else { Some(joined) }
}
