//! Field access shared by the JSON descriptor families.

use crate::error::{ErrorKind, Result};
use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

/// Parse a descriptor document that must be a JSON object.
pub(crate) fn parse_object(descriptor: &'static str, text: &str) -> Result<Object> {
    match parse(descriptor, text)? {
        Value::Object(object) => Ok(object),
        other => exn::bail!(ErrorKind::InvalidDescriptor {
            descriptor,
            reason: format!("expected an object, found {}", kind(&other)),
        }),
    }
}

/// Parse a descriptor document of any JSON shape.
pub(crate) fn parse(descriptor: &'static str, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| {
        exn::Exn::from(ErrorKind::InvalidDescriptor {
            descriptor,
            reason: e.to_string(),
        })
    })
}

/// A required, non-empty string field.
pub(crate) fn required(object: &Object, descriptor: &'static str, field: &'static str) -> Result<String> {
    match object.get(field) {
        None | Some(Value::Null) => exn::bail!(ErrorKind::MissingField { descriptor, field }),
        Some(Value::String(value)) if value.trim().is_empty() => {
            exn::bail!(ErrorKind::MissingField { descriptor, field })
        },
        Some(Value::String(value)) => Ok(value.trim().to_string()),
        // Some legacy descriptors write versions as bare numbers.
        Some(Value::Number(value)) => Ok(value.to_string()),
        Some(other) => exn::bail!(ErrorKind::ParseError {
            field,
            value: format!("expected a string, found {}", kind(other)),
        }),
    }
}

/// An optional string field; blank strings and other types are treated as absent.
pub(crate) fn optional(object: &Object, field: &str) -> Option<String> {
    object.get(field).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Normalise an authors value to a `", "`-joined string.
///
/// Accepts a scalar string, an array of strings and/or person objects
/// (`{"name": ...}`, falling back to `username` then `id`), or an object whose
/// keys are the names (Quilt's `contributors` map of name to role).
pub(crate) fn authors(value: Option<&Value>) -> Option<String> {
    let names: Vec<String> = match value? {
        Value::String(name) => vec![name.trim().to_string()],
        Value::Array(items) => items.iter().filter_map(person).collect(),
        Value::Object(map) => map.keys().map(|name| name.trim().to_string()).collect(),
        _ => Vec::new(),
    };
    let names: Vec<String> = names.into_iter().filter(|name| !name.is_empty()).collect();
    if names.is_empty() { None } else { Some(names.join(", ")) }
}

fn person(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.trim().to_string()),
        Value::Object(person) => ["name", "username", "id"]
            .iter()
            .find_map(|key| person.get(*key).and_then(Value::as_str))
            .map(|name| name.trim().to_string()),
        _ => None,
    }
}

/// String items of an array field (other item types are skipped).
pub(crate) fn strings(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(item)) if !item.trim().is_empty() => vec![item.trim().to_string()],
        _ => Vec::new(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("mezz"), Some("mezz"))]
    #[case(json!(["mezz", "  "]), Some("mezz"))]
    #[case(json!(["Alice", {"name": "Bob"}, {"username": "carol"}]), Some("Alice, Bob, carol"))]
    #[case(json!({"Alice": "Owner", "Bob": "Contributor"}), Some("Alice, Bob"))]
    #[case(json!([]), None)]
    #[case(json!(7), None)]
    fn test_authors(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(authors(Some(&value)).as_deref(), expected);
    }

    #[test]
    fn test_required() {
        let object = json!({"id": " jei ", "version": "", "schemaVersion": 1, "name": ["x"]});
        let object = object.as_object().unwrap();
        assert_eq!(required(object, "fabric.mod.json", "id").unwrap(), "jei");
        assert_eq!(required(object, "fabric.mod.json", "schemaVersion").unwrap(), "1");
        assert_eq!(
            *required(object, "fabric.mod.json", "version").unwrap_err(),
            ErrorKind::MissingField {
                descriptor: "fabric.mod.json",
                field: "version"
            }
        );
        assert_eq!(
            *required(object, "fabric.mod.json", "missing").unwrap_err(),
            ErrorKind::MissingField {
                descriptor: "fabric.mod.json",
                field: "missing"
            }
        );
        assert!(matches!(
            *required(object, "fabric.mod.json", "name").unwrap_err(),
            ErrorKind::ParseError { field: "name", .. }
        ));
    }

    #[test]
    fn test_parse_object_rejects_other_shapes() {
        assert!(matches!(
            *parse_object("fabric.mod.json", "[]").unwrap_err(),
            ErrorKind::InvalidDescriptor { .. }
        ));
        assert!(matches!(
            *parse_object("fabric.mod.json", "{ not json").unwrap_err(),
            ErrorKind::InvalidDescriptor { .. }
        ));
    }
}
