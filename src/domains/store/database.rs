//! Database facade: info, listing, creation and removal of databases.

use std::sync::Arc;

use mongodb::bson::{DateTime, Document, doc};
use serde::Serialize;
use tracing::{info, instrument};

use super::collection::list_collection_documents;
use super::connection::ConnectionManager;
use super::error::{StoreError, StoreResult};
use super::results::Confirmation;

/// Collection written to when materialising a new database.
pub const DEFAULT_COLLECTION: &str = "default_collection";

/// Name, collection listing and `dbStats` output of one database.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseInfo {
    pub name: String,
    pub collections: Vec<Document>,
    pub stats: Document,
}

pub struct DatabaseOps {
    connection: Arc<ConnectionManager>,
}

impl DatabaseOps {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    #[instrument(skip_all, fields(db = %db_name))]
    pub async fn get_info(&self, db_name: &str) -> StoreResult<DatabaseInfo> {
        let client = self.connection.handle().await?;
        let db = client.database(db_name);

        let collections = list_collection_documents(&db)
            .await
            .map_err(|e| StoreError::operation("listCollections", db_name, e))?;
        let stats = db
            .run_command(doc! { "dbStats": 1 })
            .await
            .map_err(|e| StoreError::operation("dbStats", db_name, e))?;

        Ok(DatabaseInfo {
            name: db_name.to_string(),
            collections,
            stats,
        })
    }

    /// The server's `listDatabases` reply, verbatim.
    #[instrument(skip_all)]
    pub async fn list_databases(&self) -> StoreResult<Document> {
        let client = self.connection.handle().await?;
        client
            .database("admin")
            .run_command(doc! { "listDatabases": 1 })
            .await
            .map_err(|e| StoreError::operation("listDatabases", "admin", e))
    }

    /// MongoDB creates databases lazily, so this writes a marker document
    /// into [`DEFAULT_COLLECTION`].
    #[instrument(skip_all, fields(db = %db_name))]
    pub async fn create_database(&self, db_name: &str) -> StoreResult<Confirmation> {
        let client = self.connection.handle().await?;
        client
            .database(db_name)
            .collection::<Document>(DEFAULT_COLLECTION)
            .insert_one(doc! { "createdAt": DateTime::now() })
            .await
            .map_err(|e| StoreError::operation("createDatabase", db_name, e))?;

        info!("Database created");
        Ok(Confirmation::new(format!("Database '{db_name}' created.")))
    }

    #[instrument(skip_all, fields(db = %db_name))]
    pub async fn drop_database(&self, db_name: &str) -> StoreResult<bool> {
        let client = self.connection.handle().await?;
        client
            .database(db_name)
            .drop()
            .await
            .map_err(|e| StoreError::operation("dropDatabase", db_name, e))?;

        info!("Database dropped");
        Ok(true)
    }
}
