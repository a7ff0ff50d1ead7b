//! Domains module containing business logic organized by bounded contexts.
//!
//! - **store**: the MongoDB connection and the operation facades over it
//! - **tools**: the MCP tools that expose those operations to clients

pub mod store;
pub mod tools;
