//! Response envelope for tool results.
//!
//! A successful call renders as one text block: an optional tool-specific
//! label followed by the pretty-printed JSON of the result. A failed call
//! renders as one text block carrying the failure message, flagged as an error.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

use super::error::ToolError;

/// The successful outcome of a tool handler, ready to be formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolReply {
    label: Option<String>,
    payload: Value,
}

impl ToolReply {
    /// An unlabelled reply, used by pure listings.
    pub fn new(payload: &impl Serialize) -> Result<Self, ToolError> {
        Ok(Self {
            label: None,
            payload: to_payload(payload)?,
        })
    }

    /// A reply whose text starts with `label`.
    pub fn labelled(label: impl Into<String>, payload: &impl Serialize) -> Result<Self, ToolError> {
        Ok(Self {
            label: Some(label.into()),
            payload: to_payload(payload)?,
        })
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Render the text block: `<label> <pretty json>` or `<pretty json>`.
    pub fn render(&self) -> Result<String, ToolError> {
        let json = serde_json::to_string_pretty(&self.payload)
            .map_err(|e| ToolError::internal(format!("failed to format result: {e}")))?;
        Ok(match &self.label {
            Some(label) => format!("{label} {json}"),
            None => json,
        })
    }

    /// Build the success envelope. Falls back to the error envelope if the
    /// result cannot be rendered, so a response is never half-formatted.
    pub fn into_call_result(self) -> CallToolResult {
        match self.render() {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => error_result(e.to_string()),
        }
    }
}

/// Build the error envelope for a failed tool call.
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

fn to_payload(payload: &impl Serialize) -> Result<Value, ToolError> {
    serde_json::to_value(payload)
        .map_err(|e| ToolError::internal(format!("failed to serialize result: {e}")))
}
