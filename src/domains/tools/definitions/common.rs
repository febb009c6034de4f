//! Helpers shared by every Routing Director tool.
//!
//! This is the tool boundary: whatever a call returns, the host gets JSON.
//! Errors that survive the endpoint's failure policy are logged and returned
//! as an error result whose text is `{"error": "<message>"}`.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::core::rd::RdResult;
use crate::core::rd::envelope::error_envelope;

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Convert a settled outcome into an MCP tool result.
pub fn tool_result(tool: &str, outcome: RdResult<Value>) -> CallToolResult {
    match outcome {
        Ok(value) => success_result(value),
        Err(e) => {
            error!(status = ?e.status(), "{} failed: {}", tool, e);
            error_result(&e)
        }
    }
}

/// Success result carrying `value`.
///
/// Objects are also sent as structured content; arrays and `null` are sent
/// as JSON text only.
pub fn success_result(value: Value) -> CallToolResult {
    if value.is_object() {
        CallToolResult::structured(value)
    } else {
        CallToolResult::success(vec![Content::text(value.to_string())])
    }
}

/// Error result whose text is `{"error": "<message>"}`.
pub fn error_result(err: &dyn std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(error_envelope(err).to_string())])
}

/// Deserialize rmcp call arguments into a parameter struct.
pub fn parse_params<T: DeserializeOwned>(args: Option<JsonObject>) -> Result<T, McpError> {
    let args = args.unwrap_or_default();
    serde_json::from_value(Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Deserialize HTTP call arguments into a parameter struct.
#[cfg(feature = "http")]
pub fn parse_http_params<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Shape a tool result the way the HTTP transport returns it.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let Some(structured) = result.structured_content {
        response["structuredContent"] = structured;
    }

    response
}

/// Extract the JSON text of the first content block (used by tests).
#[cfg(test)]
pub fn result_json(result: &CallToolResult) -> Value {
    let text = match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).expect("tool output is JSON")
}
