//! Database tool definitions: info, listing, creation and removal.

use std::sync::Arc;

use super::common::{DatabaseParams, NoParams};
use crate::domains::store::DatabaseOps;
use crate::domains::tools::{ToolEntry, ToolReply};

/// Get info tool - name, collections and stats of one database.
pub struct GetDatabaseInfoTool;

impl GetDatabaseInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_database_info";

    pub const TITLE: &'static str = "Get database info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get information about a specific database by name.";

    /// Bind this tool to the database facade.
    pub fn entry(ops: Arc<DatabaseOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |params: DatabaseParams| {
            let ops = ops.clone();
            async move {
                let info = ops.get_info(&params.db_name).await?;
                ToolReply::new(&info)
            }
        })
    }
}

/// List tool - every database on the server.
pub struct GetDatabaseListTool;

impl GetDatabaseListTool {
    pub const NAME: &'static str = "get_database_list";
    pub const TITLE: &'static str = "Get list database";
    pub const DESCRIPTION: &'static str = "Get a list of all databases.";

    pub fn entry(ops: Arc<DatabaseOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |_: NoParams| {
            let ops = ops.clone();
            async move {
                let databases = ops.list_databases().await?;
                ToolReply::new(&databases)
            }
        })
    }
}

/// Create tool - materialises a database by writing a marker document.
pub struct CreateDatabaseTool;

impl CreateDatabaseTool {
    pub const NAME: &'static str = "create_database";
    pub const TITLE: &'static str = "Create database";
    pub const DESCRIPTION: &'static str = "Create a new database by name.";

    pub fn entry(ops: Arc<DatabaseOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |params: DatabaseParams| {
            let ops = ops.clone();
            async move {
                let result = ops.create_database(&params.db_name).await?;
                ToolReply::labelled(
                    format!("Database \"{}\" created. Result:", params.db_name),
                    &result,
                )
            }
        })
    }
}

pub struct DropDatabaseTool;

impl DropDatabaseTool {
    pub const NAME: &'static str = "drop_database";
    pub const TITLE: &'static str = "Drop database";
    pub const DESCRIPTION: &'static str = "Drop a database by name.";

    pub fn entry(ops: Arc<DatabaseOps>) -> ToolEntry {
        ToolEntry::new(Self::NAME, Self::TITLE, Self::DESCRIPTION, move |params: DatabaseParams| {
            let ops = ops.clone();
            async move {
                let dropped = ops.drop_database(&params.db_name).await?;
                ToolReply::labelled(
                    format!("Database \"{}\" dropped. Result:", params.db_name),
                    &dropped,
                )
            }
        })
    }
}
