//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Each tool is a named, schema-described operation bound to one store facade
//! method.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, one file per store facade
//! - `router.rs` - Builds the registry with every tool bound to its facade
//! - `registry.rs` - Tool entries, registration and dispatch
//! - `validation.rs` - Argument checks against each tool's input schema
//! - `response.rs` - Success and error response envelopes
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct and a tool struct with `NAME`, `TITLE`,
//!    `DESCRIPTION` and `entry()` in the matching `definitions/` file
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `build_tool_registry()` in `router.rs`

pub mod definitions;
mod error;
mod registry;
mod response;
pub mod router;
mod validation;

pub use error::ToolError;
pub use registry::{ToolEntry, ToolFuture, ToolRegistry};
pub use response::{ToolReply, error_result};
pub use router::build_tool_registry;
pub use validation::validate_arguments;
