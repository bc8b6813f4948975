//! Legacy Forge (`mcmod.info`, Minecraft 1.12 and older).

use super::Context;
use super::json::{self, Object};
use crate::consts::MCMOD_INFO_DESCRIPTOR;
use crate::error::{ErrorKind, Result};
use crate::models::{Loader, Record};
use crate::platform;
use serde_json::Value;

pub(crate) fn extract(text: &str, context: &Context) -> Result<Record> {
    let document = json::parse(MCMOD_INFO_DESCRIPTOR, text)?;
    let Some(mod_info) = first_mod(&document) else {
        exn::bail!(ErrorKind::InvalidDescriptor {
            descriptor: MCMOD_INFO_DESCRIPTOR,
            reason: "no mod entry found".to_string(),
        });
    };

    let identifier = json::required(mod_info, MCMOD_INFO_DESCRIPTOR, "modid")?;
    let version = json::required(mod_info, MCMOD_INFO_DESCRIPTOR, "version")?;
    let mut record = context.record(Loader::Forge, identifier, version);
    if let Some(name) = json::optional(mod_info, "name") {
        record.display_name = name;
    }
    record.description = json::optional(mod_info, "description");
    record.authors = json::authors(mod_info.get("authorList")).or_else(|| json::authors(mod_info.get("authors")));
    record.target_platform_versions = platform::from_json(mod_info.get("mcversion"));
    record.dependencies = json::strings(mod_info.get("requiredMods"))
        .into_iter()
        .chain(json::strings(mod_info.get("dependencies")))
        .collect();
    Ok(record)
}

/// The document is usually an array of mods, occasionally wrapped as
/// `{"modListVersion": 2, "modList": [...]}`, and sometimes a bare object.
fn first_mod(document: &Value) -> Option<&Object> {
    match document {
        Value::Array(mods) => mods.first().and_then(Value::as_object),
        Value::Object(object) => match object.get("modList") {
            Some(Value::Array(mods)) => mods.first().and_then(Value::as_object),
            _ => Some(object),
        },
        _ => None,
    }
}
