//! Argument validation against a tool's declared input schema.
//!
//! Checks the top level only: required properties must be present and
//! non-null, and declared properties must carry the declared JSON type.
//! Nested payload contents are left to the store.

use rmcp::model::JsonObject;
use serde_json::Value;

use super::error::ToolError;

/// Validate `arguments` against `schema`, reporting every offending field.
pub fn validate_arguments(schema: &JsonObject, arguments: &JsonObject) -> Result<(), ToolError> {
    let mut problems = Vec::new();

    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for name in required.iter().filter_map(Value::as_str) {
        match arguments.get(name) {
            None | Some(Value::Null) => problems.push(format!("missing required field `{name}`")),
            Some(_) => {}
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, value) in arguments {
            let Some(expected) = properties.get(name).and_then(declared_types) else {
                continue;
            };
            if value.is_null() && required.iter().any(|r| r.as_str() == Some(name.as_str())) {
                // Already reported as missing.
                continue;
            }
            if !expected.iter().any(|ty| matches_type(ty, value)) {
                problems.push(format!(
                    "field `{name}` must be of type {}, got {}",
                    expected.join(" or "),
                    type_name(value)
                ));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ToolError::invalid_arguments(problems.join("; ")))
    }
}

/// The `type` keyword of a property schema, if it declares one.
fn declared_types(property: &Value) -> Option<Vec<&str>> {
    match property.get("type")? {
        Value::String(ty) => Some(vec![ty.as_str()]),
        Value::Array(types) => Some(types.iter().filter_map(Value::as_str).collect()),
        _ => None,
    }
}

fn matches_type(ty: &str, value: &Value) -> bool {
    match ty {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
