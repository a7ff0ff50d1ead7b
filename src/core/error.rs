//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::{store::StoreError, tools::ToolError};

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
///
/// This enum captures all possible error conditions that can occur during
/// server operation, including domain-specific errors and external failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Error originating from the MongoDB store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error raised while serving a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_convert() {
        let err: Error = StoreError::NotConnected.into();
        assert!(matches!(err, Error::Store(_)));
        assert!(err.to_string().starts_with("Store error: MongoDB client is not connected"));

        let err: Error = ToolError::duplicate_tool("find_document").into();
        assert_eq!(
            err.to_string(),
            "Tool error: Tool already registered: find_document"
        );
    }

    #[test]
    fn test_transport_error_converts_with_question_mark() {
        fn serve() -> Result<()> {
            Err(TransportError::init("handshake closed"))?;
            Ok(())
        }

        let err = serve().unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Transport error: Server initialization error: handshake closed"
        );
    }
}
