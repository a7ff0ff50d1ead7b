//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Tools are grouped in one file per store facade.

pub mod bulk;
pub mod collection;
pub mod common;
pub mod database;
pub mod document;
pub mod index;

pub use bulk::BulkWriteTool;
pub use collection::{CreateCollectionTool, DropCollectionTool, ListCollectionsTool};
pub use database::{CreateDatabaseTool, DropDatabaseTool, GetDatabaseInfoTool, GetDatabaseListTool};
pub use document::{
    CountDocumentsTool, CreateDocumentTool, DeleteDocumentTool, DeleteManyDocumentsTool,
    FindDocumentTool, FindOneDocumentTool, InsertManyDocumentsTool, UpdateManyDocumentsTool,
    UpdateOneDocumentTool,
};
pub use index::{CreateIndexTool, DropIndexTool, ListIndexesTool};
