//! Document tool definitions: insert, find, update, delete and count.
//!
//! `update_one_document` takes plain field values (`newValue`) that are set on
//! the matched document. `update_many_documents` takes an update operator
//! document (`update`) as-is.

use std::sync::Arc;

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{to_document, to_documents, to_optional_document};
use crate::domains::store::DocumentOps;
use crate::domains::tools::{ToolEntry, ToolReply};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for inserting one document.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertDocumentParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Document to insert
    pub document: JsonObject,
}

/// Parameters for inserting several documents.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertManyParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Documents to insert
    pub documents: Vec<JsonObject>,
}

/// Parameters for operations that require a filter.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Filter to match document(s)
    pub filter: JsonObject,
}

/// Parameters for operations whose filter defaults to "match all".
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionalFilterParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Filter to match documents (matches all when omitted)
    #[serde(default)]
    pub filter: Option<JsonObject>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOneParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Filter to match document
    pub filter: JsonObject,
    /// New values to set
    pub new_value: JsonObject,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManyParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Filter to match documents
    pub filter: JsonObject,
    /// Update object (update operators such as $set, $inc)
    pub update: JsonObject,
}

// ============================================================================
// Tool Definitions
// ============================================================================

/// Create document tool - inserts a single document.
pub struct CreateDocumentTool;

impl CreateDocumentTool {
    pub const NAME: &'static str = "create_document";
    pub const TITLE: &'static str = "Create document";
    pub const DESCRIPTION: &'static str =
        "Insert a new document into a specified collection in a database.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: InsertDocumentParams| {
                let ops = ops.clone();
                async move {
                    let document = to_document("document", params.document)?;
                    let result = ops
                        .insert_one(&params.db_name, &params.collection_name, document)
                        .await?;
                    ToolReply::labelled(
                        format!(
                            "Document inserted into \"{}\" in database \"{}\". Result:",
                            params.collection_name, params.db_name
                        ),
                        &result,
                    )
                }
            },
        )
    }
}

pub struct InsertManyDocumentsTool;

impl InsertManyDocumentsTool {
    pub const NAME: &'static str = "insert_many_documents";
    pub const TITLE: &'static str = "Insert many documents";
    pub const DESCRIPTION: &'static str = "Insert multiple documents into a collection.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: InsertManyParams| {
                let ops = ops.clone();
                async move {
                    let documents = to_documents("documents", params.documents)?;
                    let result = ops
                        .insert_many(&params.db_name, &params.collection_name, documents)
                        .await?;
                    ToolReply::labelled("Insert many result:", &result)
                }
            },
        )
    }
}

pub struct FindOneDocumentTool;

impl FindOneDocumentTool {
    pub const NAME: &'static str = "find_one_document";
    pub const TITLE: &'static str = "Find one document";
    pub const DESCRIPTION: &'static str = "Find a single document in a collection by filter.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |params: FilterParams| {
            let ops = ops.clone();
            async move {
                let filter = to_document("filter", params.filter)?;
                let found = ops
                    .find_one(&params.db_name, &params.collection_name, filter)
                    .await?;
                ToolReply::labelled("Document found:", &found)
            }
        })
    }
}

pub struct FindDocumentTool;

impl FindDocumentTool {
    pub const NAME: &'static str = "find_document";
    pub const TITLE: &'static str = "Find documents";
    pub const DESCRIPTION: &'static str = "Find documents in a collection with an optional filter.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: OptionalFilterParams| {
                let ops = ops.clone();
                async move {
                    let filter = to_optional_document("filter", params.filter)?;
                    let found = ops
                        .find(&params.db_name, &params.collection_name, filter)
                        .await?;
                    ToolReply::labelled("Documents found:", &found)
                }
            },
        )
    }
}

pub struct UpdateOneDocumentTool;

impl UpdateOneDocumentTool {
    pub const NAME: &'static str = "update_one_document";
    pub const TITLE: &'static str = "Update one document";
    pub const DESCRIPTION: &'static str = "Update a single document in a collection by filter. \
         `newValue` holds plain field values, which are set on the match.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: UpdateOneParams| {
                let ops = ops.clone();
                async move {
                    let filter = to_document("filter", params.filter)?;
                    let new_value = to_document("newValue", params.new_value)?;
                    let result = ops
                        .update_one(&params.db_name, &params.collection_name, filter, new_value)
                        .await?;
                    ToolReply::labelled("Update result:", &result)
                }
            },
        )
    }
}

pub struct UpdateManyDocumentsTool;

impl UpdateManyDocumentsTool {
    pub const NAME: &'static str = "update_many_documents";
    pub const TITLE: &'static str = "Update many documents";
    pub const DESCRIPTION: &'static str = "Update multiple documents in a collection by filter. \
         `update` is an update operator document such as {\"$set\": {...}}.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: UpdateManyParams| {
                let ops = ops.clone();
                async move {
                    let filter = to_document("filter", params.filter)?;
                    let update = to_document("update", params.update)?;
                    let result = ops
                        .update_many(&params.db_name, &params.collection_name, filter, update)
                        .await?;
                    ToolReply::labelled("Update many result:", &result)
                }
            },
        )
    }
}

/// Delete document tool - removes the first match.
pub struct DeleteDocumentTool;

impl DeleteDocumentTool {
    pub const NAME: &'static str = "delete_document";
    pub const TITLE: &'static str = "Delete document";
    pub const DESCRIPTION: &'static str = "Delete a document from a collection in a database.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |params: FilterParams| {
            let ops = ops.clone();
            async move {
                let filter = to_document("filter", params.filter)?;
                let result = ops
                    .delete_one(&params.db_name, &params.collection_name, filter)
                    .await?;
                ToolReply::labelled(
                    format!(
                        "Document(s) deleted from \"{}\" in database \"{}\". Result:",
                        params.collection_name, params.db_name
                    ),
                    &result,
                )
            }
        })
    }
}

pub struct DeleteManyDocumentsTool;

impl DeleteManyDocumentsTool {
    pub const NAME: &'static str = "delete_many_documents";
    pub const TITLE: &'static str = "Delete many documents";
    pub const DESCRIPTION: &'static str = "Delete multiple documents from a collection by filter.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |params: FilterParams| {
            let ops = ops.clone();
            async move {
                let filter = to_document("filter", params.filter)?;
                let result = ops
                    .delete_many(&params.db_name, &params.collection_name, filter)
                    .await?;
                ToolReply::labelled("Delete many result:", &result)
            }
        })
    }
}

pub struct CountDocumentsTool;

impl CountDocumentsTool {
    pub const NAME: &'static str = "count_documents";
    pub const TITLE: &'static str = "Count documents";
    pub const DESCRIPTION: &'static str =
        "Count documents in a collection with an optional filter.";

    pub fn entry(ops: Arc<DocumentOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: OptionalFilterParams| {
                let ops = ops.clone();
                async move {
                    let filter = to_optional_document("filter", params.filter)?;
                    let count = ops
                        .count(&params.db_name, &params.collection_name, filter)
                        .await?;
                    ToolReply::labelled("Count result:", &count)
                }
            },
        )
    }
}
