//! Collection tool definitions: listing, creation and removal.

use std::sync::Arc;

use super::common::{CollectionParams, DatabaseParams};
use crate::domains::store::CollectionOps;
use crate::domains::tools::{ToolEntry, ToolReply};

pub struct ListCollectionsTool;

impl ListCollectionsTool {
    pub const NAME: &'static str = "list_collections";
    pub const TITLE: &'static str = "List collections";
    pub const DESCRIPTION: &'static str = "List collections in a database.";

    pub fn entry(ops: Arc<CollectionOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |params: DatabaseParams| {
            let ops = ops.clone();
            async move {
                let collections = ops.list_collections(&params.db_name).await?;
                ToolReply::new(&collections)
            }
        })
    }
}

pub struct CreateCollectionTool;

impl CreateCollectionTool {
    pub const NAME: &'static str = "create_collection";
    pub const TITLE: &'static str = "Create collection";
    pub const DESCRIPTION: &'static str = "Create a new collection in a specified database.";

    pub fn entry(ops: Arc<CollectionOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: CollectionParams| {
                let ops = ops.clone();
                async move {
                    let result = ops
                        .create_collection(&params.db_name, &params.collection_name)
                        .await?;
                    ToolReply::labelled(
                        format!(
                            "Collection \"{}\" created in database \"{}\". Result:",
                            params.collection_name, params.db_name
                        ),
                        &result,
                    )
                }
            },
        )
    }
}

pub struct DropCollectionTool;

impl DropCollectionTool {
    pub const NAME: &'static str = "drop_collection";
    pub const TITLE: &'static str = "Drop collection";
    pub const DESCRIPTION: &'static str = "Drop a collection from a specified database.";

    pub fn entry(ops: Arc<CollectionOps>) -> ToolEntry {
        ToolEntry::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            move |params: CollectionParams| {
                let ops = ops.clone();
                async move {
                    let dropped = ops
                        .drop_collection(&params.db_name, &params.collection_name)
                        .await?;
                    ToolReply::labelled(
                        format!(
                            "Collection \"{}\" dropped from database \"{}\". Result:",
                            params.collection_name, params.db_name
                        ),
                        &dropped,
                    )
                }
            },
        )
    }
}
