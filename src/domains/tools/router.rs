//! Tool Router - builds the registry of every tool bound to its facade.
//!
//! Each tool definition knows how to bind itself to a facade instance; this
//! module only decides which tools exist.

use super::definitions::{
    BulkWriteTool, CountDocumentsTool, CreateCollectionTool, CreateDatabaseTool,
    CreateDocumentTool, CreateIndexTool, DeleteDocumentTool, DeleteManyDocumentsTool,
    DropCollectionTool, DropDatabaseTool, DropIndexTool, FindDocumentTool, FindOneDocumentTool,
    GetDatabaseInfoTool, GetDatabaseListTool, InsertManyDocumentsTool, ListCollectionsTool,
    ListIndexesTool, UpdateManyDocumentsTool, UpdateOneDocumentTool,
};
use super::{ToolError, ToolRegistry};
use crate::domains::store::StoreFacades;

/// Build the tool registry with all tools.
pub fn build_tool_registry(facades: &StoreFacades) -> Result<ToolRegistry, ToolError> {
    let entries = [
        // Database
        GetDatabaseInfoTool::entry(facades.database.clone()),
        GetDatabaseListTool::entry(facades.database.clone()),
        CreateDatabaseTool::entry(facades.database.clone()),
        DropDatabaseTool::entry(facades.database.clone()),
        // Collection
        ListCollectionsTool::entry(facades.collection.clone()),
        CreateCollectionTool::entry(facades.collection.clone()),
        DropCollectionTool::entry(facades.collection.clone()),
        // Document
        CreateDocumentTool::entry(facades.document.clone()),
        InsertManyDocumentsTool::entry(facades.document.clone()),
        FindOneDocumentTool::entry(facades.document.clone()),
        FindDocumentTool::entry(facades.document.clone()),
        UpdateOneDocumentTool::entry(facades.document.clone()),
        UpdateManyDocumentsTool::entry(facades.document.clone()),
        DeleteDocumentTool::entry(facades.document.clone()),
        DeleteManyDocumentsTool::entry(facades.document.clone()),
        CountDocumentsTool::entry(facades.document.clone()),
        // Index
        CreateIndexTool::entry(facades.index.clone()),
        DropIndexTool::entry(facades.index.clone()),
        ListIndexesTool::entry(facades.index.clone()),
        // Bulk
        BulkWriteTool::entry(facades.bulk.clone()),
    ];

    let mut registry = ToolRegistry::new();
    for entry in entries {
        registry.register(entry)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StoreConfig;
    use crate::domains::store::ConnectionManager;
    use rmcp::model::{CallToolResult, ErrorCode, JsonObject, RawContent};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn disconnected_registry() -> ToolRegistry {
        let connection = Arc::new(ConnectionManager::new(StoreConfig::default()));
        build_tool_registry(&StoreFacades::new(connection)).unwrap()
    }

    fn args(value: Value) -> Option<JsonObject> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    fn required(registry: &ToolRegistry, name: &str) -> Vec<String> {
        let tool = registry.get(name).unwrap().tool();
        tool.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|n| n.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_build_registry() {
        let registry = disconnected_registry();
        assert_eq!(registry.len(), 20);

        let names = registry.tool_names();
        for name in [
            "get_database_info",
            "get_database_list",
            "create_database",
            "drop_database",
            "list_collections",
            "create_collection",
            "drop_collection",
            "create_document",
            "insert_many_documents",
            "find_one_document",
            "find_document",
            "update_one_document",
            "update_many_documents",
            "delete_document",
            "delete_many_documents",
            "count_documents",
            "create_index",
            "drop_index",
            "list_indexes",
            "bulk_write",
        ] {
            assert!(names.contains(&name), "missing tool {name}");
        }
    }

    #[test]
    fn test_every_tool_has_title_and_object_schema() {
        let registry = disconnected_registry();
        for tool in registry.list_tools() {
            assert!(tool.title.is_some(), "{} has no title", tool.name);
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(tool.input_schema.get("type"), Some(&json!("object")));
        }
    }

    #[test]
    fn test_required_parameters() {
        let registry = disconnected_registry();
        assert!(required(&registry, "get_database_list").is_empty());
        assert_eq!(required(&registry, "drop_database"), vec!["dbName"]);

        let update_one = required(&registry, "update_one_document");
        for field in ["dbName", "collectionName", "filter", "newValue"] {
            assert!(update_one.contains(&field.to_string()));
        }

        let find = required(&registry, "find_document");
        assert!(!find.contains(&"filter".to_string()));

        let create_index = required(&registry, "create_index");
        assert!(create_index.contains(&"keys".to_string()));
        assert!(!create_index.contains(&"options".to_string()));
    }

    #[tokio::test]
    async fn test_valid_call_without_connection_is_error_result() {
        let registry = disconnected_registry();
        let result = registry
            .call_tool(
                "create_document",
                args(json!({
                    "dbName": "app",
                    "collectionName": "users",
                    "document": { "name": "a", "value": 1 }
                })),
            )
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("not connected"));
    }

    #[tokio::test]
    async fn test_listing_without_arguments_reaches_store() {
        let registry = disconnected_registry();
        let result = registry.call_tool("get_database_list", None).await.unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_before_store() {
        let registry = disconnected_registry();
        let err = registry
            .dispatch(
                "update_one_document",
                args(json!({ "dbName": "app", "collectionName": "users", "filter": {} })),
            )
            .await
            .unwrap_err();

        // Rejected by validation, not by the connection gate.
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("`newValue`"));
    }

    #[tokio::test]
    async fn test_malformed_bulk_operation_is_rejected_before_store() {
        let registry = disconnected_registry();
        let err = registry
            .call_tool(
                "bulk_write",
                args(json!({
                    "dbName": "app",
                    "collectionName": "users",
                    "operations": [{ "truncate": {} }]
                })),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("operations[0]"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = disconnected_registry();
        let err = registry.dispatch("rename_collection", None).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }
}
