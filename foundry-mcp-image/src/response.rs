//! JSON payloads returned by the image tools.
//!
//! Every outcome of `generate_image` is a JSON object in a text content
//! block. Failures carry `"success": false` and a message whose prefix
//! names the stage that failed.

use crate::handler::{ImageGenerateResult, MISSING_PROMPT};
use foundry_mcp_common::error::Error;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Service name reported by `health_check`.
pub const SERVICE_NAME: &str = "MCP Image Generator";

/// Successful generation payload.
#[derive(Debug, Serialize)]
pub struct SuccessPayload<'a> {
    /// Always `"success"`
    pub status: &'static str,
    #[serde(flatten)]
    pub result: &'a ImageGenerateResult,
}

/// Failed invocation payload.
#[derive(Debug, Serialize)]
pub struct FailurePayload {
    /// Always `false`
    pub success: bool,
    /// What went wrong
    pub error: String,
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl HealthPayload {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Caller-facing message for a failed invocation.
///
/// A missing prompt is reported verbatim; other validation failures get a
/// `Validation failed:` prefix.
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::Validation(message) if message == MISSING_PROMPT => message.clone(),
        Error::Validation(message) => format!("Validation failed: {}", message),
        Error::Config(e) => e.to_string(),
        Error::Client(_) => err.to_string(),
        Error::Api { .. } | Error::Storage(_) => format!("Error generating image: {}", err),
    }
}

/// Serialize `payload` into a text content block.
fn json_content<T: Serialize>(payload: &T) -> Content {
    // These payloads only hold strings and string lists.
    let text = serde_json::to_string(payload).unwrap_or_else(|e| format!(r#"{{"success":false,"error":"{}"}}"#, e));
    Content::text(text)
}

/// Convert a pipeline outcome into a tool result.
pub fn to_call_tool_result(outcome: Result<ImageGenerateResult, Error>) -> CallToolResult {
    match outcome {
        Ok(result) => CallToolResult::success(vec![json_content(&SuccessPayload {
            status: "success",
            result: &result,
        })]),
        Err(err) => {
            tracing::error!(error = %err, "generate_image failed");
            CallToolResult::error(vec![json_content(&FailurePayload {
                success: false,
                error: failure_message(&err),
            })])
        }
    }
}

/// Tool result for `health_check`.
pub fn health_result() -> CallToolResult {
    CallToolResult::success(vec![json_content(&HealthPayload::healthy())])
}
