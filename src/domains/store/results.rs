//! Result shapes returned by the facades.
//!
//! Store-native results are passed through as documents wherever the driver
//! already produces one. The types here cover operations whose driver result
//! is a plain struct or unit.

use std::collections::BTreeMap;

use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertManyResult, InsertOneResult, UpdateResult};
use serde::Serialize;

/// Confirmation record for operations with no natural result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneSummary {
    pub inserted_id: Bson,
}

impl From<InsertOneResult> for InsertOneSummary {
    fn from(result: InsertOneResult) -> Self {
        Self {
            inserted_id: result.inserted_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertManySummary {
    pub inserted_count: u64,
    /// Inserted ids keyed by position in the input.
    pub inserted_ids: BTreeMap<usize, Bson>,
}

impl From<InsertManyResult> for InsertManySummary {
    fn from(result: InsertManyResult) -> Self {
        let inserted_ids: BTreeMap<usize, Bson> = result.inserted_ids.into_iter().collect();
        Self {
            inserted_count: inserted_ids.len() as u64,
            inserted_ids,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<Bson>,
}

impl From<UpdateResult> for UpdateSummary {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteSummary {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}

/// Aggregate counts of a bulk write.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkWriteSummary {
    pub inserted_count: u64,
    pub matched_count: u64,
    pub modified_count: u64,
    pub deleted_count: u64,
    pub upserted_count: u64,
    /// Keyed by operation index.
    pub inserted_ids: BTreeMap<usize, Bson>,
    /// Keyed by operation index.
    pub upserted_ids: BTreeMap<usize, Bson>,
}

impl BulkWriteSummary {
    pub(crate) fn record_insert(&mut self, index: usize, result: InsertOneResult) {
        self.inserted_count += 1;
        self.inserted_ids.insert(index, result.inserted_id);
    }

    pub(crate) fn record_update(&mut self, index: usize, result: UpdateResult) {
        self.matched_count += result.matched_count;
        self.modified_count += result.modified_count;
        if let Some(id) = result.upserted_id {
            self.upserted_count += 1;
            self.upserted_ids.insert(index, id);
        }
    }

    pub(crate) fn record_delete(&mut self, result: DeleteResult) {
        self.deleted_count += result.deleted_count;
    }
}
