//! Store domain module.
//!
//! Owns the MongoDB connection and exposes the store through five facades,
//! one per functional area. Every facade holds a shared reference to the
//! [`ConnectionManager`] and obtains the client through it on each call.
//!
//! ## Architecture
//!
//! - `connection.rs` - connection lifecycle and the "connect first" gate
//! - `database.rs`, `collection.rs`, `document.rs`, `index.rs`, `bulk.rs` - facades
//! - `results.rs` - result shapes for operations without a store-native document
//! - `error.rs` - store error types

mod bulk;
mod collection;
mod connection;
mod database;
mod document;
mod error;
mod index;
mod results;

use std::sync::Arc;

pub use bulk::{BulkOperation, BulkOps, InvalidBulkOperation};
pub use collection::CollectionOps;
pub use connection::{ConnectionManager, ConnectionState};
pub use database::{DEFAULT_COLLECTION, DatabaseInfo, DatabaseOps};
pub use document::DocumentOps;
pub use error::{StoreError, StoreResult};
pub use index::IndexOps;
pub use results::{
    BulkWriteSummary, Confirmation, DeleteSummary, InsertManySummary, InsertOneSummary,
    UpdateSummary,
};

/// The five facades, all bound to the same connection.
#[derive(Clone)]
pub struct StoreFacades {
    pub database: Arc<DatabaseOps>,
    pub collection: Arc<CollectionOps>,
    pub document: Arc<DocumentOps>,
    pub index: Arc<IndexOps>,
    pub bulk: Arc<BulkOps>,
}

impl StoreFacades {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self {
            database: Arc::new(DatabaseOps::new(connection.clone())),
            collection: Arc::new(CollectionOps::new(connection.clone())),
            document: Arc::new(DocumentOps::new(connection.clone())),
            index: Arc::new(IndexOps::new(connection.clone())),
            bulk: Arc::new(BulkOps::new(connection)),
        }
    }
}
