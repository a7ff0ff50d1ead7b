//! MongoDB MCP Server Library
//!
//! This crate exposes a MongoDB deployment to Model Context Protocol (MCP)
//! clients as a catalogue of tools: database and collection management,
//! document CRUD, indexes and bulk writes.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Configuration, error handling, the MCP handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **store**: One shared MongoDB connection and five operation facades
//!   - **tools**: Tool registry, argument validation and response formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use mongodb_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     server.connect().await?;
//!     TransportService::new(config.transport).run(server.clone()).await?;
//!     server.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
