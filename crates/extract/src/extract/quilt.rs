//! Quilt (`quilt.mod.json`).
//!
//! The canonical layout nests everything under `quilt_loader`, with display
//! fields under `quilt_loader.metadata` and dependencies as a list. Some mods
//! ship a flat, Fabric-shaped document instead; that is read with the Fabric
//! field mapping.

use super::json::{self, Object};
use super::{Context, fabric};
use crate::consts::{MINECRAFT_ID, QUILT_DESCRIPTOR};
use crate::error::Result;
use crate::models::{Loader, Record};
use crate::platform;
use serde_json::Value;

pub(crate) fn extract(text: &str, context: &Context) -> Result<Record> {
    let object = json::parse_object(QUILT_DESCRIPTOR, text)?;
    match object.get("quilt_loader") {
        Some(Value::Object(loader)) => from_nested(loader, context),
        _ => fabric::from_object(&object, QUILT_DESCRIPTOR, Loader::Quilt, context),
    }
}

fn from_nested(loader: &Object, context: &Context) -> Result<Record> {
    let identifier = json::required(loader, QUILT_DESCRIPTOR, "id")?;
    let version = json::required(loader, QUILT_DESCRIPTOR, "version")?;
    let mut record = context.record(Loader::Quilt, identifier, version);
    if let Some(Value::Object(metadata)) = loader.get("metadata") {
        if let Some(name) = json::optional(metadata, "name") {
            record.display_name = name;
        }
        record.description = json::optional(metadata, "description");
        record.authors = json::authors(metadata.get("contributors")).or_else(|| json::authors(metadata.get("authors")));
    }
    if let Some(Value::Array(depends)) = loader.get("depends") {
        for dependency in depends {
            match dependency {
                Value::String(id) if !id.trim().is_empty() => {
                    record.dependencies.insert(id.trim().to_string());
                },
                Value::Object(dependency) => {
                    if dependency.get("optional").and_then(Value::as_bool).unwrap_or(false) {
                        continue;
                    }
                    let Some(id) = json::optional(dependency, "id") else {
                        continue;
                    };
                    if id == MINECRAFT_ID {
                        record.target_platform_versions =
                            platform::from_json(dependency.get("versions").or_else(|| dependency.get("version")));
                    }
                    record.dependencies.insert(id);
                },
                _ => {},
            }
        }
    }
    Ok(record)
}
