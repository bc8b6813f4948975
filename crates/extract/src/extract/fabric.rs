//! Fabric (`fabric.mod.json`).

use super::Context;
use super::json::{self, Object};
use crate::consts::{FABRIC_DESCRIPTOR, MINECRAFT_ID};
use crate::error::Result;
use crate::models::{Loader, Record};
use crate::platform;
use serde_json::Value;

pub(crate) fn extract(text: &str, context: &Context) -> Result<Record> {
    let object = json::parse_object(FABRIC_DESCRIPTOR, text)?;
    from_object(&object, FABRIC_DESCRIPTOR, Loader::Fabric, context)
}

/// Field mapping shared with Quilt's flat descriptor form.
pub(crate) fn from_object(object: &Object, descriptor: &'static str, loader: Loader, context: &Context) -> Result<Record> {
    let identifier = json::required(object, descriptor, "id")?;
    let version = json::required(object, descriptor, "version")?;
    let mut record = context.record(loader, identifier, version);
    if let Some(name) = json::optional(object, "name") {
        record.display_name = name;
    }
    record.authors = json::authors(object.get("authors"));
    record.description = json::optional(object, "description");
    if let Some(Value::Object(depends)) = object.get("depends") {
        record.dependencies = depends.keys().map(|id| id.trim().to_string()).filter(|id| !id.is_empty()).collect();
        record.target_platform_versions = platform::from_json(depends.get(MINECRAFT_ID));
    }
    Ok(record)
}
