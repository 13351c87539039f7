//! Tool input schemas.
//!
//! `input_schema` feeds `list_tools`. `tool_properties_json` flattens the same
//! schema into the `toolProperties` array a serverless MCP host expects:
//!
//! ```json
//! [{"propertyName": "prompt", "propertyType": "string",
//!   "description": "...", "isRequired": true}]
//! ```

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One entry of a `toolProperties` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolProperty {
    pub property_name: String,
    pub property_type: String,
    pub description: String,
    pub is_required: bool,
}

/// JSON schema for `T` as a JSON object.
pub fn input_schema<T: JsonSchema>() -> Arc<Map<String, Value>> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(&schema).unwrap_or_default() {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(Map::new()),
    }
}

/// Empty-object schema for tools without arguments.
pub fn empty_input_schema() -> Arc<Map<String, Value>> {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::String("object".to_string()));
    map.insert("properties".to_string(), Value::Object(Map::new()));
    Arc::new(map)
}

/// Flatten the schema of `T` into tool properties, sorted by name.
pub fn tool_properties<T: JsonSchema>() -> Vec<ToolProperty> {
    let schema = input_schema::<T>();

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, property)| ToolProperty {
            property_name: name.clone(),
            property_type: property_type(property).to_string(),
            description: property
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            is_required: required.contains(&name.as_str()),
        })
        .collect()
}

/// Tool properties of `T` serialized as a JSON array string.
pub fn tool_properties_json<T: JsonSchema>() -> String {
    serde_json::to_string(&tool_properties::<T>()).unwrap_or_else(|_| "[]".to_string())
}

/// First non-null JSON type of a property schema.
fn property_type(property: &Value) -> &str {
    match property.get("type") {
        Some(Value::String(kind)) => kind,
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .find(|kind| *kind != "null")
            .unwrap_or("string"),
        _ => "string",
    }
}
