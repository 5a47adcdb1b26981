//! Common helpers shared across the Energinet tools.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::client::ApiError;

/// Default page size for `query_dataset`.
pub fn default_query_limit() -> i64 {
    10
}

/// Default page size for the convenience tools (one day of hourly data).
pub fn default_series_limit() -> i64 {
    24
}

/// Create an error result for a failed API call: `Error: <message>`.
pub fn error_result(error: &ApiError) -> CallToolResult {
    let message = format!("Error: {}", error);
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message)])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Decode tool arguments, as an MCP `invalid_params` error on failure.
pub fn parse_params<P>(args: serde_json::Map<String, serde_json::Value>) -> Result<P, McpError>
where
    P: DeserializeOwned,
{
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Decode tool arguments for the HTTP transport.
#[cfg(feature = "http")]
pub fn parse_http_params<P>(arguments: serde_json::Value) -> Result<P, String>
where
    P: DeserializeOwned,
{
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::json!({}),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| e.to_string())
}

/// Shape a tool result as the JSON body of an HTTP `tools/call` response.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> serde_json::Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}
