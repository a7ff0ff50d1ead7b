//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the [`ToolRegistry`].
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`, one file per store
//! facade, and bound to their facade in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::{
    store::{ConnectionManager, ConnectionState, StoreFacades, StoreResult},
    tools::{ToolRegistry, build_tool_registry},
};

/// The main MCP server handler.
///
/// Cloned once per transport session; all clones share the same connection
/// and registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The single MongoDB connection shared by every facade.
    connection: Arc<ConnectionManager>,

    /// Registered tools, bound to the facades.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// No connection is opened here. Fails if two tools share a name.
    pub fn new(config: Config) -> Result<Self> {
        let connection = Arc::new(ConnectionManager::new(config.store.clone()));
        let facades = StoreFacades::new(connection.clone());
        let registry = build_tool_registry(&facades)?;

        info!("Registered {} tools", registry.len());

        Ok(Self {
            config: Arc::new(config),
            connection,
            registry: Arc::new(registry),
        })
    }

    /// Open the MongoDB connection.
    pub async fn connect(&self) -> StoreResult<()> {
        self.connection.connect().await
    }

    /// Close the MongoDB connection. Safe to call when not connected.
    pub async fn disconnect(&self) -> StoreResult<()> {
        self.connection.disconnect().await
    }

    /// Current state of the MongoDB connection.
    pub async fn connection_state(&self) -> ConnectionState {
        self.connection.state().await
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = self.name().to_string();
        server_info.version = self.version().to_string();

        ServerInfo {
            instructions: Some(
                "MongoDB server: manage databases, collections, documents and indexes. \
                 Filters and documents accept MongoDB Extended JSON."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            ..Default::default()
        }
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        debug!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.registry
            .call_tool(&request.name, request.arguments)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_all_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.registry().len(), 20);
        assert_eq!(server.name(), "mongodb-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "mongodb-mcp-server");
    }

    #[tokio::test]
    async fn test_starts_disconnected() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.connection_state().await, ConnectionState::Disconnected);
        tokio_test::assert_ok!(server.disconnect().await);
    }
}
