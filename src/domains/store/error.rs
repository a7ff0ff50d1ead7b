//! Store-specific error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the connection manager and the operation facades.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening the connection failed. The manager stays disconnected.
    #[error("Error connecting to MongoDB: {source}")]
    Connection {
        #[source]
        source: mongodb::error::Error,
    },

    /// Closing the connection failed. The manager stays connected.
    #[error("Error disconnecting from MongoDB: {0}")]
    Disconnection(String),

    /// A handle was requested before `connect()` succeeded.
    #[error("MongoDB client is not connected. Call connect() first.")]
    NotConnected,

    /// The store rejected or failed an operation.
    #[error("{operation} on '{target}' failed: {message}")]
    Operation {
        operation: &'static str,
        target: String,
        message: String,
    },
}

impl StoreError {
    /// Create a connection error from the driver failure.
    pub fn connection(source: mongodb::error::Error) -> Self {
        Self::Connection { source }
    }

    /// Create a disconnection error.
    pub fn disconnection(msg: impl Into<String>) -> Self {
        Self::Disconnection(msg.into())
    }

    /// Create an operation error carrying the operation name and its target.
    pub fn operation(
        operation: &'static str,
        target: impl Into<String>,
        source: impl std::fmt::Display,
    ) -> Self {
        Self::Operation {
            operation,
            target: target.into(),
            message: source.to_string(),
        }
    }

    /// Whether this error is the "must connect first" gate firing.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Self::NotConnected)
    }
}

/// Build the `db` or `db.collection` label used in operation errors and logs.
pub(crate) fn target(db_name: &str, collection_name: Option<&str>) -> String {
    match collection_name {
        Some(collection) => format!("{db_name}.{collection}"),
        None => db_name.to_string(),
    }
}
