//! Collection facade: listing, creation and removal of collections.

use std::sync::Arc;

use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Document, doc};
use tracing::{info, instrument};

use super::connection::ConnectionManager;
use super::error::{StoreError, StoreResult, target};
use super::results::Confirmation;

/// Raw `listCollections` descriptors of a database.
pub(crate) async fn list_collection_documents(db: &Database) -> mongodb::error::Result<Vec<Document>> {
    db.run_cursor_command(doc! { "listCollections": 1 })
        .await?
        .try_collect()
        .await
}

pub struct CollectionOps {
    connection: Arc<ConnectionManager>,
}

impl CollectionOps {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    #[instrument(skip_all, fields(db = %db_name))]
    pub async fn list_collections(&self, db_name: &str) -> StoreResult<Vec<Document>> {
        let client = self.connection.handle().await?;
        list_collection_documents(&client.database(db_name))
            .await
            .map_err(|e| StoreError::operation("listCollections", db_name, e))
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn create_collection(
        &self,
        db_name: &str,
        collection_name: &str,
    ) -> StoreResult<Confirmation> {
        let client = self.connection.handle().await?;
        client
            .database(db_name)
            .create_collection(collection_name)
            .await
            .map_err(|e| {
                StoreError::operation("createCollection", target(db_name, Some(collection_name)), e)
            })?;

        info!("Collection created");
        Ok(Confirmation::new(format!(
            "Collection '{collection_name}' created in database '{db_name}'."
        )))
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn drop_collection(&self, db_name: &str, collection_name: &str) -> StoreResult<bool> {
        let client = self.connection.handle().await?;
        client
            .database(db_name)
            .collection::<Document>(collection_name)
            .drop()
            .await
            .map_err(|e| {
                StoreError::operation("dropCollection", target(db_name, Some(collection_name)), e)
            })?;

        info!("Collection dropped");
        Ok(true)
    }
}
