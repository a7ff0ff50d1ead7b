//! Bulk facade: an ordered batch of insert/update/replace/delete operations.
//!
//! Operations execute one after another and the batch stops at the first
//! failure. Counts from the operations that did run are discarded with the
//! error.

use std::sync::Arc;

use mongodb::Collection;
use mongodb::bson::{Bson, Document};
use thiserror::Error;
use tracing::{debug, instrument};

use super::connection::ConnectionManager;
use super::error::{StoreError, StoreResult, target};
use super::results::BulkWriteSummary;

/// A self-describing operation descriptor could not be understood.
#[derive(Debug, Error, PartialEq)]
#[error("{0}")]
pub struct InvalidBulkOperation(String);

/// One entry of a bulk write.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOperation {
    InsertOne {
        document: Document,
    },
    UpdateOne {
        filter: Document,
        update: Document,
        upsert: bool,
    },
    UpdateMany {
        filter: Document,
        update: Document,
        upsert: bool,
    },
    ReplaceOne {
        filter: Document,
        replacement: Document,
        upsert: bool,
    },
    DeleteOne {
        filter: Document,
    },
    DeleteMany {
        filter: Document,
    },
}

impl BulkOperation {
    /// The descriptor key this operation is written as.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertOne { .. } => "insertOne",
            Self::UpdateOne { .. } => "updateOne",
            Self::UpdateMany { .. } => "updateMany",
            Self::ReplaceOne { .. } => "replaceOne",
            Self::DeleteOne { .. } => "deleteOne",
            Self::DeleteMany { .. } => "deleteMany",
        }
    }
}

fn document_field(body: &Document, kind: &str, field: &str) -> Result<Document, InvalidBulkOperation> {
    match body.get(field) {
        Some(Bson::Document(doc)) => Ok(doc.clone()),
        Some(_) => Err(InvalidBulkOperation(format!(
            "'{kind}.{field}' must be an object"
        ))),
        None => Err(InvalidBulkOperation(format!("'{kind}' requires '{field}'"))),
    }
}

fn upsert_flag(body: &Document, kind: &str) -> Result<bool, InvalidBulkOperation> {
    match body.get("upsert") {
        None | Some(Bson::Null) => Ok(false),
        Some(Bson::Boolean(flag)) => Ok(*flag),
        Some(_) => Err(InvalidBulkOperation(format!(
            "'{kind}.upsert' must be a boolean"
        ))),
    }
}

impl TryFrom<Document> for BulkOperation {
    type Error = InvalidBulkOperation;

    /// Parse `{ <kind>: { ...fields } }`.
    fn try_from(descriptor: Document) -> Result<Self, Self::Error> {
        if descriptor.len() != 1 {
            return Err(InvalidBulkOperation(format!(
                "expected exactly one operation key, found {}",
                descriptor.len()
            )));
        }
        let Some((kind, body)) = descriptor.into_iter().next() else {
            return Err(InvalidBulkOperation("empty operation".to_string()));
        };
        let Bson::Document(body) = body else {
            return Err(InvalidBulkOperation(format!("'{kind}' must be an object")));
        };

        let operation = match kind.as_str() {
            "insertOne" => Self::InsertOne {
                document: document_field(&body, &kind, "document")?,
            },
            "updateOne" => Self::UpdateOne {
                filter: document_field(&body, &kind, "filter")?,
                update: document_field(&body, &kind, "update")?,
                upsert: upsert_flag(&body, &kind)?,
            },
            "updateMany" => Self::UpdateMany {
                filter: document_field(&body, &kind, "filter")?,
                update: document_field(&body, &kind, "update")?,
                upsert: upsert_flag(&body, &kind)?,
            },
            "replaceOne" => Self::ReplaceOne {
                filter: document_field(&body, &kind, "filter")?,
                replacement: document_field(&body, &kind, "replacement")?,
                upsert: upsert_flag(&body, &kind)?,
            },
            "deleteOne" => Self::DeleteOne {
                filter: document_field(&body, &kind, "filter")?,
            },
            "deleteMany" => Self::DeleteMany {
                filter: document_field(&body, &kind, "filter")?,
            },
            other => {
                return Err(InvalidBulkOperation(format!(
                    "unknown operation '{other}'"
                )));
            }
        };
        Ok(operation)
    }
}

pub struct BulkOps {
    connection: Arc<ConnectionManager>,
}

impl BulkOps {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    #[instrument(skip_all, fields(db = %db_name, collection = %collection_name, operations = operations.len()))]
    pub async fn bulk_write(
        &self,
        db_name: &str,
        collection_name: &str,
        operations: Vec<BulkOperation>,
    ) -> StoreResult<BulkWriteSummary> {
        let client = self.connection.handle().await?;
        let collection = client
            .database(db_name)
            .collection::<Document>(collection_name);

        let mut summary = BulkWriteSummary::default();
        for (index, operation) in operations.into_iter().enumerate() {
            let kind = operation.name();
            Self::apply(&collection, index, operation, &mut summary)
                .await
                .map_err(|e| {
                    StoreError::operation(
                        "bulkWrite",
                        target(db_name, Some(collection_name)),
                        format!("operation {index} ({kind}): {e}"),
                    )
                })?;
        }

        debug!(
            inserted = summary.inserted_count,
            modified = summary.modified_count,
            deleted = summary.deleted_count,
            "Bulk write complete"
        );
        Ok(summary)
    }

    async fn apply(
        collection: &Collection<Document>,
        index: usize,
        operation: BulkOperation,
        summary: &mut BulkWriteSummary,
    ) -> mongodb::error::Result<()> {
        match operation {
            BulkOperation::InsertOne { document } => {
                let result = collection.insert_one(document).await?;
                summary.record_insert(index, result);
            }
            BulkOperation::UpdateOne {
                filter,
                update,
                upsert,
            } => {
                let result = collection.update_one(filter, update).upsert(upsert).await?;
                summary.record_update(index, result);
            }
            BulkOperation::UpdateMany {
                filter,
                update,
                upsert,
            } => {
                let result = collection.update_many(filter, update).upsert(upsert).await?;
                summary.record_update(index, result);
            }
            BulkOperation::ReplaceOne {
                filter,
                replacement,
                upsert,
            } => {
                let result = collection
                    .replace_one(filter, replacement)
                    .upsert(upsert)
                    .await?;
                summary.record_update(index, result);
            }
            BulkOperation::DeleteOne { filter } => {
                let result = collection.delete_one(filter).await?;
                summary.record_delete(result);
            }
            BulkOperation::DeleteMany { filter } => {
                let result = collection.delete_many(filter).await?;
                summary.record_delete(result);
            }
        }
        Ok(())
    }
}
