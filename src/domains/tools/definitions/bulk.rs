//! Bulk write tool definition.

use std::sync::Arc;

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::to_document;
use crate::domains::store::{BulkOperation, BulkOps};
use crate::domains::tools::{ToolEntry, ToolError, ToolReply};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkWriteParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Bulk operations array, e.g. {"insertOne": {"document": {...}}},
    /// {"updateOne": {"filter": {...}, "update": {...}}}, {"deleteOne": {"filter": {...}}}
    pub operations: Vec<JsonObject>,
}

/// Parse every descriptor up front so a malformed one rejects the whole batch.
fn to_operations(operations: Vec<JsonObject>) -> Result<Vec<BulkOperation>, ToolError> {
    if operations.is_empty() {
        return Err(ToolError::invalid_arguments(
            "`operations` must contain at least one operation",
        ));
    }

    operations
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let field = format!("operations[{i}]");
            let descriptor = to_document(&field, raw)?;
            BulkOperation::try_from(descriptor)
                .map_err(|e| ToolError::invalid_arguments(format!("`{field}`: {e}")))
        })
        .collect()
}

pub struct BulkWriteTool;

impl BulkWriteTool {
    pub const NAME: &'static str = "bulk_write";
    pub const TITLE: &'static str = "Bulk write";
    pub const DESCRIPTION: &'static str = "Perform bulk write operations on a collection.";

    pub fn entry(ops: Arc<BulkOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: BulkWriteParams| {
                let ops = ops.clone();
                async move {
                    let operations = to_operations(params.operations)?;
                    let summary = ops
                        .bulk_write(&params.db_name, &params.collection_name, operations)
                        .await?;
                    ToolReply::labelled("Bulk write result:", &summary)
                }
            },
        )
    }
}
