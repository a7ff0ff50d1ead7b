//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - [`ToolEntry`]: a tool descriptor (name, title, description, input schema)
//!   bound to a typed handler
//! - [`ToolRegistry`]: the table of entries, keyed by unique name, which
//!   validates arguments and dispatches calls
//!
//! A call moves through `validate -> dispatch -> format`. Arguments that fail
//! validation never reach the handler.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::ToolError;
use super::response::{ToolReply, error_result};
use super::validation::validate_arguments;

/// Future returned by a bound handler.
pub type ToolFuture = BoxFuture<'static, Result<ToolReply, ToolError>>;

/// Type-erased handler: turns validated raw arguments into typed parameters
/// and starts the call. Fails synchronously if the parameters do not parse.
type BoundHandler = Arc<dyn Fn(JsonObject) -> Result<ToolFuture, ToolError> + Send + Sync>;

// ============================================================================
// Tool Entry
// ============================================================================

/// A registered tool: its MCP descriptor and the handler it is bound to.
#[derive(Clone)]
pub struct ToolEntry {
    tool: Tool,
    handler: BoundHandler,
}

impl ToolEntry {
    /// Bind `handler` to a tool whose input schema is generated from `P`.
    pub fn new<P, F, Fut>(
        name: &'static str,
        title: &'static str,
        description: &'static str,
        handler: F,
    ) -> Self
    where
        P: DeserializeOwned + JsonSchema + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolReply, ToolError>> + Send + 'static,
    {
        let tool = Tool {
            name: name.into(),
            description: Some(description.into()),
            input_schema: schema_for_type::<P>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(title.into()),
        };

        let handler: BoundHandler = Arc::new(move |arguments: JsonObject| {
            let params: P = serde_json::from_value(Value::Object(arguments))
                .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
            Ok(handler(params).boxed())
        });

        Self { tool, handler }
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    /// The MCP descriptor advertised to clients.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Check `arguments` against this tool's input schema.
    pub fn validate(&self, arguments: &JsonObject) -> Result<(), ToolError> {
        validate_arguments(&self.tool.input_schema, arguments)
    }

    /// Validate, then run the handler.
    pub async fn invoke(&self, arguments: JsonObject) -> Result<ToolReply, ToolError> {
        self.validate(&arguments)?;
        let call = (self.handler)(arguments)?;
        call.await
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.tool.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the command table of all available tools.
///
/// Entries are immutable once registered. Names are unique: registering a
/// name twice is rejected rather than overwriting the first entry.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: BTreeMap<String, ToolEntry>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tool, failing with [`ToolError::DuplicateTool`] if its name is taken.
    pub fn register(&mut self, entry: ToolEntry) -> Result<(), ToolError> {
        match self.entries.entry(entry.name().to_string()) {
            Entry::Occupied(existing) => {
                warn!("Rejecting duplicate tool registration: {}", existing.key());
                Err(ToolError::duplicate_tool(existing.key()))
            }
            Entry::Vacant(slot) => {
                debug!("Registered tool: {}", slot.key());
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.get(name)
    }

    /// Get all tool names, sorted.
    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.entries.values().map(|e| e.tool().clone()).collect()
    }

    /// Look up, validate and run a tool, returning the unformatted outcome.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<ToolReply, ToolError> {
        let entry = self.entries.get(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::unknown_tool(name)
        })?;
        info!("Tool called");
        entry.invoke(arguments.unwrap_or_default()).await
    }

    /// Dispatch a call and format the full response envelope.
    ///
    /// Execution failures come back as an error-flagged tool result; unknown
    /// tools and invalid arguments come back as protocol errors.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        match self.dispatch(name, arguments).await {
            Ok(reply) => Ok(reply.into_call_result()),
            Err(e) if e.is_execution_failure() => {
                warn!("Tool '{}' failed: {}", name, e);
                Ok(error_result(e.to_string()))
            }
            Err(e) => {
                warn!("Tool '{}' rejected: {}", name, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::store::StoreError;
    use rmcp::model::{ErrorCode, RawContent};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct ProbeParams {
        /// Database name
        db_name: String,
        /// Optional filter
        #[serde(default)]
        filter: Option<JsonObject>,
    }

    fn probe(name: &'static str, calls: Arc<AtomicUsize>) -> ToolEntry {
        ToolEntry::new(name, "Probe", "Counts its calls.", move |params: ProbeParams| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                ToolReply::labelled(
                    "Probed:",
                    &json!({ "db": params.db_name, "filtered": params.filter.is_some() }),
                )
            }
        })
    }

    fn failing() -> ToolEntry {
        ToolEntry::new("failing", "Failing", "Always fails.", |_: ProbeParams| async {
            Err(ToolError::from(StoreError::NotConnected))
        })
    }

    fn args(value: Value) -> Option<JsonObject> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_entry_descriptor() {
        let entry = probe("probe", Arc::new(AtomicUsize::new(0)));
        let tool = entry.tool();
        assert_eq!(tool.name, "probe");
        assert_eq!(tool.title.as_deref(), Some("Probe"));
        assert_eq!(tool.input_schema["required"], json!(["dbName"]));
        assert!(tool.input_schema["properties"].get("filter").is_some());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry.register(probe("probe", calls.clone())).unwrap();

        let err = registry.register(probe("probe", calls)).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(ref name) if name == "probe"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_listing_ignores_registration_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut forward = ToolRegistry::new();
        forward.register(probe("a_tool", calls.clone())).unwrap();
        forward.register(probe("b_tool", calls.clone())).unwrap();

        let mut reverse = ToolRegistry::new();
        reverse.register(probe("b_tool", calls.clone())).unwrap();
        reverse.register(probe("a_tool", calls)).unwrap();

        assert_eq!(forward.tool_names(), reverse.tool_names());
        assert_eq!(forward.tool_names(), vec!["a_tool", "b_tool"]);
    }

    #[tokio::test]
    async fn test_dispatch_valid_arguments() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry.register(probe("probe", calls.clone())).unwrap();

        let reply = registry
            .dispatch("probe", args(json!({ "dbName": "app", "filter": { "a": 1 } })))
            .await
            .unwrap();
        assert_eq!(reply.label(), Some("Probed:"));
        assert_eq!(reply.payload(), &json!({ "db": "app", "filtered": true }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_fails() {
        let registry = ToolRegistry::new();
        let err = registry.dispatch("nope", None).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "nope"));

        let err = registry.call_tool("nope", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_missing_required_field_never_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry.register(probe("probe", calls.clone())).unwrap();

        let err = registry.dispatch("probe", None).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("`dbName`"));

        let err = registry
            .dispatch("probe", args(json!({ "filter": { "a": 1 } })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_type_never_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry.register(probe("probe", calls.clone())).unwrap();

        let err = registry
            .call_tool("probe", args(json!({ "dbName": "app", "filter": "name = a" })))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("`filter`"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry.register(probe("probe", calls)).unwrap();

        let result = registry
            .call_tool("probe", args(json!({ "dbName": "app" })))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Probed: {"));
    }

    #[tokio::test]
    async fn test_handler_failure_becomes_error_envelope() {
        let mut registry = ToolRegistry::new();
        registry.register(failing()).unwrap();

        let result = registry
            .call_tool("failing", args(json!({ "dbName": "app" })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
        assert!(text_of(&result).contains("not connected"));
    }
}
