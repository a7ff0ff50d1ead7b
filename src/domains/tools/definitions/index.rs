//! Index tool definitions: create, drop and list.

use std::sync::Arc;

use mongodb::bson;
use mongodb::options::IndexOptions;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{CollectionParams, to_document, to_optional_document};
use crate::domains::store::IndexOps;
use crate::domains::tools::{ToolEntry, ToolError, ToolReply};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Index keys, field to direction (1, -1) or type ("text", "2dsphere")
    pub keys: JsonObject,
    /// Index options (name, unique, sparse, expireAfterSeconds, ...)
    #[serde(default)]
    pub options: Option<JsonObject>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DropIndexParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
    /// Index name
    pub index_name: String,
}

fn to_index_options(options: Option<JsonObject>) -> Result<Option<IndexOptions>, ToolError> {
    to_optional_document("options", options)?
        .map(|doc| {
            bson::from_document::<IndexOptions>(doc).map_err(|e| {
                ToolError::invalid_arguments(format!("`options` are not valid index options: {e}"))
            })
        })
        .transpose()
}

pub struct CreateIndexTool;

impl CreateIndexTool {
    pub const NAME: &'static str = "create_index";
    pub const TITLE: &'static str = "Create index";
    pub const DESCRIPTION: &'static str = "Create an index on a collection.";

    pub fn entry(ops: Arc<IndexOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: CreateIndexParams| {
                let ops = ops.clone();
                async move {
                    let keys = to_document("keys", params.keys)?;
                    let options = to_index_options(params.options)?;
                    let index_name = ops
                        .create_index(&params.db_name, &params.collection_name, keys, options)
                        .await?;
                    ToolReply::labelled("Index created:", &index_name)
                }
            },
        )
    }
}

pub struct DropIndexTool;

impl DropIndexTool {
    pub const NAME: &'static str = "drop_index";
    pub const TITLE: &'static str = "Drop index";
    pub const DESCRIPTION: &'static str = "Drop an index from a collection.";

    pub fn entry(ops: Arc<IndexOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: DropIndexParams| {
                let ops = ops.clone();
                async move {
                    let result = ops
                        .drop_index(&params.db_name, &params.collection_name, &params.index_name)
                        .await?;
                    ToolReply::labelled("Index dropped:", &result)
                }
            },
        )
    }
}

pub struct ListIndexesTool;

impl ListIndexesTool {
    pub const NAME: &'static str = "list_indexes";
    pub const TITLE: &'static str = "List indexes";
    pub const DESCRIPTION: &'static str = "List all indexes on a collection.";

    pub fn entry(ops: Arc<IndexOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: CollectionParams| {
                let ops = ops.clone();
                async move {
                    let indexes = ops
                        .list_indexes(&params.db_name, &params.collection_name)
                        .await?;
                    ToolReply::labelled("Indexes:", &indexes)
                }
            },
        )
    }
}
