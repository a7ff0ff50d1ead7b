//! Document facade: CRUD and counting within one collection.
//!
//! Filters, documents and update payloads are passed to the driver as-is.
//! The one exception is [`DocumentOps::update_one`], which wraps the caller's
//! plain field values in `$set`; [`DocumentOps::update_many`] expects update
//! operators from the caller.

use std::sync::Arc;

use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection};
use tracing::{debug, instrument};

use super::connection::ConnectionManager;
use super::error::{StoreError, StoreResult, target};
use super::results::{DeleteSummary, InsertManySummary, InsertOneSummary, UpdateSummary};

pub struct DocumentOps {
    connection: Arc<ConnectionManager>,
}

impl DocumentOps {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    fn collection(client: &Client, db_name: &str, collection_name: &str) -> Collection<Document> {
        client.database(db_name).collection(collection_name)
    }

    fn failed(
        operation: &'static str,
        db_name: &str,
        collection_name: &str,
    ) -> impl FnOnce(mongodb::error::Error) -> StoreError {
        let target = target(db_name, Some(collection_name));
        move |e| StoreError::operation(operation, target, e)
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn insert_one(
        &self,
        db_name: &str,
        collection_name: &str,
        document: Document,
    ) -> StoreResult<InsertOneSummary> {
        let client = self.connection.handle().await?;
        let result = Self::collection(&client, db_name, collection_name)
            .insert_one(document)
            .await
            .map_err(Self::failed("insertOne", db_name, collection_name))?;
        Ok(result.into())
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name, count = documents.len()))]
    pub async fn insert_many(
        &self,
        db_name: &str,
        collection_name: &str,
        documents: Vec<Document>,
    ) -> StoreResult<InsertManySummary> {
        let client = self.connection.handle().await?;
        let result = Self::collection(&client, db_name, collection_name)
            .insert_many(documents)
            .await
            .map_err(Self::failed("insertMany", db_name, collection_name))?;
        Ok(result.into())
    }

    /// First document matching `filter`, or `None`.
    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn find_one(
        &self,
        db_name: &str,
        collection_name: &str,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        let client = self.connection.handle().await?;
        Self::collection(&client, db_name, collection_name)
            .find_one(filter)
            .await
            .map_err(Self::failed("findOne", db_name, collection_name))
    }

    /// All documents matching `filter`; a missing filter matches everything.
    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn find(
        &self,
        db_name: &str,
        collection_name: &str,
        filter: Option<Document>,
    ) -> StoreResult<Vec<Document>> {
        let client = self.connection.handle().await?;
        let cursor = Self::collection(&client, db_name, collection_name)
            .find(filter.unwrap_or_default())
            .await
            .map_err(Self::failed("find", db_name, collection_name))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(Self::failed("find", db_name, collection_name))?;
        debug!("Found {} documents", documents.len());
        Ok(documents)
    }

    /// Set the fields in `new_value` on the first match, leaving other fields untouched.
    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn update_one(
        &self,
        db_name: &str,
        collection_name: &str,
        filter: Document,
        new_value: Document,
    ) -> StoreResult<UpdateSummary> {
        let client = self.connection.handle().await?;
        let result = Self::collection(&client, db_name, collection_name)
            .update_one(filter, doc! { "$set": new_value })
            .await
            .map_err(Self::failed("updateOne", db_name, collection_name))?;
        Ok(result.into())
    }

    /// Apply the update operator document `update` to every match.
    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn update_many(
        &self,
        db_name: &str,
        collection_name: &str,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateSummary> {
        let client = self.connection.handle().await?;
        let result = Self::collection(&client, db_name, collection_name)
            .update_many(filter, update)
            .await
            .map_err(Self::failed("updateMany", db_name, collection_name))?;
        Ok(result.into())
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn delete_one(
        &self,
        db_name: &str,
        collection_name: &str,
        filter: Document,
    ) -> StoreResult<DeleteSummary> {
        let client = self.connection.handle().await?;
        let result = Self::collection(&client, db_name, collection_name)
            .delete_one(filter)
            .await
            .map_err(Self::failed("deleteOne", db_name, collection_name))?;
        Ok(result.into())
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn delete_many(
        &self,
        db_name: &str,
        collection_name: &str,
        filter: Document,
    ) -> StoreResult<DeleteSummary> {
        let client = self.connection.handle().await?;
        let result = Self::collection(&client, db_name, collection_name)
            .delete_many(filter)
            .await
            .map_err(Self::failed("deleteMany", db_name, collection_name))?;
        Ok(result.into())
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name))]
    pub async fn count(
        &self,
        db_name: &str,
        collection_name: &str,
        filter: Option<Document>,
    ) -> StoreResult<u64> {
        let client = self.connection.handle().await?;
        Self::collection(&client, db_name, collection_name)
            .count_documents(filter.unwrap_or_default())
            .await
            .map_err(Self::failed("countDocuments", db_name, collection_name))
    }
}
