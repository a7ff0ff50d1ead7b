//! Index facade: create, drop and list indexes of a collection.

use std::sync::Arc;

use futures::TryStreamExt;
use mongodb::IndexModel;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use tracing::{info, instrument};

use super::connection::ConnectionManager;
use super::error::{StoreError, StoreResult, target};
use super::results::Confirmation;

pub struct IndexOps {
    connection: Arc<ConnectionManager>,
}

impl IndexOps {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    /// Create an index over `keys` (field -> direction or type) and return its name.
    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn create_index(
        &self,
        db_name: &str,
        collection_name: &str,
        keys: Document,
        options: Option<IndexOptions>,
    ) -> StoreResult<String> {
        let client = self.connection.handle().await?;
        let model = match options {
            Some(options) => IndexModel::builder().keys(keys).options(options).build(),
            None => IndexModel::builder().keys(keys).build(),
        };

        let result = client
            .database(db_name)
            .collection::<Document>(collection_name)
            .create_index(model)
            .await
            .map_err(|e| {
                StoreError::operation("createIndex", target(db_name, Some(collection_name)), e)
            })?;

        info!("Index '{}' created", result.index_name);
        Ok(result.index_name)
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name, index = %index_name))]
    pub async fn drop_index(
        &self,
        db_name: &str,
        collection_name: &str,
        index_name: &str,
    ) -> StoreResult<Confirmation> {
        let client = self.connection.handle().await?;
        client
            .database(db_name)
            .collection::<Document>(collection_name)
            .drop_index(index_name)
            .await
            .map_err(|e| {
                StoreError::operation("dropIndex", target(db_name, Some(collection_name)), e)
            })?;

        info!("Index dropped");
        Ok(Confirmation::new(format!(
            "Index '{index_name}' dropped from '{}'.",
            target(db_name, Some(collection_name))
        )))
    }

    /// Raw `listIndexes` descriptors (`v`, `key`, `name`, ...).
    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn list_indexes(
        &self,
        db_name: &str,
        collection_name: &str,
    ) -> StoreResult<Vec<Document>> {
        let client = self.connection.handle().await?;
        let failed = |e: mongodb::error::Error| {
            StoreError::operation("listIndexes", target(db_name, Some(collection_name)), e)
        };

        client
            .database(db_name)
            .run_cursor_command(doc! { "listIndexes": collection_name })
            .await
            .map_err(failed)?
            .try_collect()
            .await
            .map_err(failed)
    }
}
