//! Output format tests.
//!
//! Every tool result is a single text block holding a JSON object: a
//! `status` for successes, `success: false` plus `error` for failures.

use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

/// Validates that a CallToolResult holds one JSON payload of the right shape.
fn validate_tool_result(result: &CallToolResult) -> Result<Value, String> {
    if result.content.len() != 1 {
        return Err(format!("Expected exactly one content block, got {}", result.content.len()));
    }

    let text = match &result.content[0].raw {
        RawContent::Text(text_content) => &text_content.text,
        other => return Err(format!("Expected text content, got {:?}", other)),
    };

    let payload: Value = serde_json::from_str(text).map_err(|e| format!("Payload is not JSON: {}", e))?;
    let obj = payload.as_object().ok_or("Payload must be a JSON object")?;

    if result.is_error.unwrap_or(false) {
        if obj.get("success") != Some(&Value::Bool(false)) {
            return Err("Error payload must carry success=false".to_string());
        }
        if !obj.get("error").is_some_and(Value::is_string) {
            return Err("Error payload must carry an error message".to_string());
        }
    } else if !obj.contains_key("status") {
        return Err("Success payload must carry a status".to_string());
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_mcp_common::Error;
    use foundry_mcp_image::ImageGenerateResult;
    use foundry_mcp_image::response::{health_result, to_call_tool_result};

    #[test]
    fn test_success_result_format() {
        let result = to_call_tool_result(Ok(ImageGenerateResult {
            image: "https://account.blob.core.windows.net/fluxjob/agentvideo/test/img-test-scene0-talk0.png".to_string(),
            images: vec!["https://account.blob.core.windows.net/fluxjob/agentvideo/test/img-test-scene0-talk0.png".to_string()],
            revised_prompt: Some("a red fox in the snow".to_string()),
        }));

        let payload = validate_tool_result(&result).unwrap();
        assert_eq!(payload["status"], "success");
        assert_eq!(payload["image"], payload["images"][0]);
        assert_eq!(payload["revised_prompt"], "a red fox in the snow");
    }

    #[test]
    fn test_error_result_format() {
        let result = to_call_tool_result(Err(Error::api("https://foundry.test", 401, "Access denied")));

        assert_eq!(result.is_error, Some(true));
        let payload = validate_tool_result(&result).unwrap();
        assert!(payload["error"].as_str().unwrap().starts_with("Error generating image: "));
    }

    #[test]
    fn test_health_result_format() {
        let payload = validate_tool_result(&health_result()).unwrap();
        assert_eq!(payload["status"], "healthy");
        assert_eq!(payload["service"], "MCP Image Generator");
    }

    #[test]
    fn test_rejects_non_json_content() {
        let result = CallToolResult::success(vec![rmcp::model::Content::text("plain text")]);
        assert!(validate_tool_result(&result).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use foundry_mcp_common::Error;
    use foundry_mcp_image::ImageGenerateResult;
    use foundry_mcp_image::response::to_call_tool_result;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn success_payload_lists_every_url(
            urls in prop::collection::vec("https://[a-z]{3,10}\\.blob\\.core\\.windows\\.net/fluxjob/[a-z0-9/-]{1,30}\\.png", 1..5)
        ) {
            let result = to_call_tool_result(Ok(ImageGenerateResult {
                image: urls[0].clone(),
                images: urls.clone(),
                revised_prompt: None,
            }));

            prop_assert_ne!(result.is_error, Some(true));
            let payload = validate_tool_result(&result).unwrap();
            let images: Vec<&str> = payload["images"].as_array().unwrap().iter().filter_map(Value::as_str).collect();
            prop_assert_eq!(images, urls.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(payload["image"].as_str(), Some(urls[0].as_str()));
        }

        #[test]
        fn any_error_becomes_error_payload(message in "[A-Za-z0-9 :'\"]{1,80}", status in 400u16..600) {
            for err in [
                Error::validation(message.clone()),
                Error::client(message.clone()),
                Error::api("https://foundry.test", status, message.clone()),
            ] {
                let result = to_call_tool_result(Err(err));
                prop_assert_eq!(result.is_error, Some(true));
                let payload = validate_tool_result(&result).unwrap();
                prop_assert!(payload["error"].as_str().unwrap().contains(message.as_str()));
            }
        }
    }
}
