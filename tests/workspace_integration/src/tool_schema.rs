//! Tool schema validity tests.
//!
//! Every registered tool must carry a name, a description and an object
//! schema listing its parameters with their types.

use serde_json::Value;

/// Validates that a JSON schema has the required structure.
fn validate_json_schema(schema: &Value) -> Result<(), String> {
    let obj = schema
        .as_object()
        .ok_or_else(|| "Schema must be an object".to_string())?;

    if let Some(type_val) = obj.get("type") {
        if type_val != "object" {
            return Err(format!("Expected type 'object', got {:?}", type_val));
        }
    }

    if let Some(properties) = obj.get("properties") {
        if !properties.is_object() {
            return Err("Properties must be an object".to_string());
        }
    }

    Ok(())
}

/// Validates that a tool has required fields.
fn validate_tool(tool: &rmcp::model::Tool) -> Result<(), String> {
    if tool.name.is_empty() {
        return Err("Tool name cannot be empty".to_string());
    }

    match tool.description.as_ref() {
        Some(description) if !description.is_empty() => {}
        _ => return Err(format!("Tool '{}' must have a description", tool.name)),
    }

    if tool.input_schema.is_empty() {
        return Err(format!("Tool '{}' must have an input schema", tool.name));
    }

    let schema_value = serde_json::to_value(&*tool.input_schema)
        .map_err(|e| format!("Failed to serialize schema: {}", e))?;
    validate_json_schema(&schema_value)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_mcp_image::server::{GENERATE_IMAGE_TOOL, HEALTH_CHECK_TOOL};
    use foundry_mcp_image::{GenerateImageToolParams, ImageServer};
    use schemars::schema_for;
    use std::borrow::Cow;
    use std::sync::Arc;

    #[test]
    fn test_json_schema_validation() {
        let valid_schema = serde_json::json!({
            "type": "object",
            "properties": {"prompt": {"type": "string"}},
            "required": ["prompt"]
        });
        assert!(validate_json_schema(&valid_schema).is_ok());

        let invalid_schema = serde_json::json!({"type": "string"});
        assert!(validate_json_schema(&invalid_schema).is_err());
    }

    #[test]
    fn test_tool_validation_rejects_missing_description() {
        let invalid_tool = rmcp::model::Tool {
            name: Cow::Borrowed("generate_image"),
            description: None,
            input_schema: Arc::new(serde_json::Map::new()),
            annotations: None,
            icons: None,
            meta: None,
            output_schema: None,
            title: None,
        };
        assert!(validate_tool(&invalid_tool).is_err());
    }

    #[test]
    fn test_published_tools_are_valid() {
        let tools = ImageServer::tools();
        assert_eq!(tools.len(), 2);
        for tool in &tools {
            let result = validate_tool(tool);
            assert!(result.is_ok(), "Tool {} invalid: {:?}", tool.name, result.err());
        }
        assert!(tools.iter().any(|t| t.name == GENERATE_IMAGE_TOOL));
        assert!(tools.iter().any(|t| t.name == HEALTH_CHECK_TOOL));
    }

    #[test]
    fn test_generate_image_schema() {
        let schema = serde_json::to_value(schema_for!(GenerateImageToolParams)).unwrap();
        assert!(validate_json_schema(&schema).is_ok());

        let properties = schema["properties"].as_object().unwrap();
        for name in ["prompt", "size", "quality", "n", "video_id", "scene_number", "talk_number", "prefix"] {
            assert!(properties.contains_key(name), "Schema should have '{}' property", name);
        }
        assert_eq!(schema["required"], serde_json::json!(["prompt"]));
        assert_eq!(properties["prompt"]["type"], "string");
    }

    #[test]
    fn test_tool_properties_match_schema() {
        let schema = serde_json::to_value(schema_for!(GenerateImageToolParams)).unwrap();
        let properties = foundry_mcp_image::schema::tool_properties::<GenerateImageToolParams>();

        assert_eq!(properties.len(), schema["properties"].as_object().unwrap().len());
        for property in &properties {
            assert_eq!(property.is_required, property.property_name == "prompt");
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use foundry_mcp_image::GenerateImageToolParams;
    use proptest::prelude::*;

    /// Strategy to generate valid tool names
    fn valid_tool_name_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{2,30}".prop_map(|s| s.to_string())
    }

    proptest! {
        #[test]
        fn tool_name_is_valid(name in valid_tool_name_strategy()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().next().unwrap().is_ascii_lowercase());
            prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }

        /// Any argument object with a string prompt fits the published schema.
        #[test]
        fn schema_accepts_prompt_only_arguments(prompt in "[A-Za-z0-9 ,.]{1,200}") {
            let value = serde_json::json!({"prompt": prompt});
            let parsed: Result<GenerateImageToolParams, _> = serde_json::from_value(value);
            prop_assert!(parsed.is_ok());
        }
    }

    #[test]
    fn published_tool_names_follow_convention() {
        for tool in foundry_mcp_image::ImageServer::tools() {
            assert!(tool.name.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
            assert!(validate_tool(&tool).is_ok());
        }
    }
}
