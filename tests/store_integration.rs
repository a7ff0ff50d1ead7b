//! Integration tests against a live MongoDB.
//!
//! These tests require a reachable MongoDB instance.
//! Run with: `MCP_TEST_MONGODB_URI=mongodb://localhost:27017 cargo test --features integration --test store_integration`

#![cfg(feature = "integration")]

use std::sync::Arc;

use mongodb::bson::{Bson, Document, doc};
use mongodb_mcp_server::core::{Config, McpServer, StoreConfig};
use mongodb_mcp_server::domains::store::{
    BulkOperation, ConnectionManager, ConnectionState, StoreFacades,
};
use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::{Value, json};
use serial_test::serial;

fn test_store_config() -> StoreConfig {
    StoreConfig {
        uri: std::env::var("MCP_TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
        server_selection_timeout_ms: Some(5_000),
        app_name: Some("mongodb-mcp-server-tests".to_string()),
        ..StoreConfig::default()
    }
}

async fn connected() -> (Arc<ConnectionManager>, StoreFacades) {
    let connection = Arc::new(ConnectionManager::new(test_store_config()));
    connection
        .connect()
        .await
        .expect("Failed to connect to test MongoDB");
    let facades = StoreFacades::new(connection.clone());
    (connection, facades)
}

/// Drop the per-test database so reruns start clean.
async fn cleanup(facades: &StoreFacades, db_name: &str) {
    let _ = facades.database.drop_database(db_name).await;
}

fn args(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn text_of(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        _ => panic!("Expected text content"),
    }
}

// Tests share one server, so run them one at a time
#[serial]
mod store_tests {
    use super::*;

    #[tokio::test]
    async fn test_handle_only_inside_connect_window() {
        let connection = ConnectionManager::new(test_store_config());
        assert!(connection.handle().await.unwrap_err().is_not_connected());

        connection.connect().await.expect("connect failed");
        assert_eq!(connection.state().await, ConnectionState::Connected);
        assert!(connection.handle().await.is_ok());

        connection.disconnect().await.expect("disconnect failed");
        assert_eq!(connection.state().await, ConnectionState::Disconnected);
        assert!(connection.handle().await.unwrap_err().is_not_connected());

        // Second disconnect is a no-op.
        assert!(connection.disconnect().await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_find_delete_round_trip() {
        const DB: &str = "mcp_it_round_trip";
        let (connection, facades) = connected().await;
        cleanup(&facades, DB).await;

        let docs = &facades.document;
        let inserted = docs
            .insert_one(DB, "items", doc! { "name": "a", "value": 1 })
            .await
            .unwrap();
        assert!(matches!(inserted.inserted_id, Bson::ObjectId(_)));

        let found = docs
            .find_one(DB, "items", doc! { "name": "a" })
            .await
            .unwrap()
            .expect("document should exist");
        assert_eq!(found.get_i32("value").unwrap(), 1);

        let deleted = docs.delete_one(DB, "items", doc! { "name": "a" }).await.unwrap();
        assert_eq!(deleted.deleted_count, 1);

        assert!(
            docs.find_one(DB, "items", doc! { "name": "a" })
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            docs.find(DB, "items", Some(doc! { "name": "a" }))
                .await
                .unwrap()
                .is_empty()
        );

        cleanup(&facades, DB).await;
        connection.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_one_sets_only_named_fields() {
        const DB: &str = "mcp_it_update_one";
        let (connection, facades) = connected().await;
        cleanup(&facades, DB).await;

        let docs = &facades.document;
        docs.insert_one(DB, "items", doc! { "name": "x", "value": 1, "tag": "keep" })
            .await
            .unwrap();

        let summary = docs
            .update_one(DB, "items", doc! { "name": "x" }, doc! { "value": 42 })
            .await
            .unwrap();
        assert_eq!(summary.matched_count, 1);
        assert_eq!(summary.modified_count, 1);

        let updated = docs
            .find_one(DB, "items", doc! { "name": "x" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.get_i32("value").unwrap(), 42);
        assert_eq!(updated.get_str("tag").unwrap(), "keep");

        // updateMany takes operator documents as given.
        let summary = docs
            .update_many(DB, "items", doc! {}, doc! { "$inc": { "value": 1 } })
            .await
            .unwrap();
        assert_eq!(summary.modified_count, 1);

        cleanup(&facades, DB).await;
        connection.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_bulk_write_counts() {
        const DB: &str = "mcp_it_bulk";
        let (connection, facades) = connected().await;
        cleanup(&facades, DB).await;

        let operations = vec![
            BulkOperation::InsertOne {
                document: doc! { "name": "A", "value": 1 },
            },
            BulkOperation::InsertOne {
                document: doc! { "name": "B", "value": 2 },
            },
            BulkOperation::UpdateOne {
                filter: doc! { "name": "A" },
                update: doc! { "$set": { "name": "A'" } },
                upsert: false,
            },
            BulkOperation::DeleteOne {
                filter: doc! { "name": "B" },
            },
        ];

        let summary = facades.bulk.bulk_write(DB, "items", operations).await.unwrap();
        assert_eq!(summary.inserted_count, 2);
        assert_eq!(summary.matched_count, 1);
        assert_eq!(summary.modified_count, 1);
        assert_eq!(summary.deleted_count, 1);
        assert_eq!(summary.upserted_count, 0);
        assert_eq!(
            summary.inserted_ids.keys().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );

        cleanup(&facades, DB).await;
        connection.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_bulk_write_stops_at_first_failure() {
        const DB: &str = "mcp_it_bulk_ordered";
        let (connection, facades) = connected().await;
        cleanup(&facades, DB).await;

        let operations = vec![
            BulkOperation::InsertOne {
                document: doc! { "_id": 1, "name": "first" },
            },
            BulkOperation::InsertOne {
                document: doc! { "_id": 1, "name": "duplicate" },
            },
            BulkOperation::InsertOne {
                document: doc! { "_id": 2, "name": "never" },
            },
        ];

        let err = facades
            .bulk
            .bulk_write(DB, "items", operations)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("operation 1 (insertOne)"));
        assert_eq!(facades.document.count(DB, "items", None).await.unwrap(), 1);

        cleanup(&facades, DB).await;
        connection.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_count_documents() {
        const DB: &str = "mcp_it_count";
        let (connection, facades) = connected().await;
        cleanup(&facades, DB).await;

        let documents: Vec<Document> = (0..5).map(|i| doc! { "n": i }).collect();
        let inserted = facades
            .document
            .insert_many(DB, "items", documents)
            .await
            .unwrap();
        assert_eq!(inserted.inserted_count, 5);

        let docs = &facades.document;
        assert_eq!(docs.count(DB, "items", None).await.unwrap(), 5);
        assert_eq!(docs.count(DB, "items", Some(doc! { "n": 99 })).await.unwrap(), 0);

        let deleted = docs
            .delete_many(DB, "items", doc! { "n": { "$gte": 3 } })
            .await
            .unwrap();
        assert_eq!(deleted.deleted_count, 2);
        assert_eq!(docs.find(DB, "items", None).await.unwrap().len(), 3);

        cleanup(&facades, DB).await;
        connection.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_index_lifecycle() {
        const DB: &str = "mcp_it_index";
        let (connection, facades) = connected().await;
        cleanup(&facades, DB).await;

        facades.collection.create_collection(DB, "items").await.unwrap();

        let name = facades
            .index
            .create_index(DB, "items", doc! { "f": 1 }, None)
            .await
            .unwrap();
        assert_eq!(name, "f_1");

        let has_f = |indexes: &[Document]| {
            indexes.iter().any(|index| {
                index
                    .get_document("key")
                    .map(|key| key.contains_key("f"))
                    .unwrap_or(false)
            })
        };

        let indexes = facades.index.list_indexes(DB, "items").await.unwrap();
        assert!(has_f(&indexes));

        facades.index.drop_index(DB, "items", &name).await.unwrap();
        let indexes = facades.index.list_indexes(DB, "items").await.unwrap();
        assert!(!has_f(&indexes));

        cleanup(&facades, DB).await;
        connection.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_database_and_collection_admin() {
        const DB: &str = "mcp_it_admin";
        let (connection, facades) = connected().await;
        cleanup(&facades, DB).await;

        facades.database.create_database(DB).await.unwrap();
        let info = facades.database.get_info(DB).await.unwrap();
        assert_eq!(info.name, DB);
        assert!(
            info.collections
                .iter()
                .any(|c| c.get_str("name").ok() == Some("default_collection"))
        );

        let listing = facades.database.list_databases().await.unwrap();
        let names: Vec<&str> = listing
            .get_array("databases")
            .unwrap()
            .iter()
            .filter_map(|db| db.as_document()?.get_str("name").ok())
            .collect();
        assert!(names.contains(&DB));

        facades.collection.create_collection(DB, "extra").await.unwrap();
        assert!(facades.collection.drop_collection(DB, "extra").await.unwrap());
        let collections = facades.collection.list_collections(DB).await.unwrap();
        assert!(!collections.iter().any(|c| c.get_str("name").ok() == Some("extra")));

        assert!(facades.database.drop_database(DB).await.unwrap());
        connection.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn test_tool_dispatch_end_to_end() {
        const DB: &str = "mcp_it_dispatch";
        let config = Config {
            store: test_store_config(),
            ..Config::default()
        };
        let server = McpServer::new(config).unwrap();
        server.connect().await.unwrap();
        let registry = server.registry();

        let _ = registry
            .call_tool("drop_database", args(json!({ "dbName": DB })))
            .await;

        let result = registry
            .call_tool(
                "create_document",
                args(json!({
                    "dbName": DB,
                    "collectionName": "users",
                    "document": { "name": "a", "value": 1 }
                })),
            )
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with(&format!(
            "Document inserted into \"users\" in database \"{DB}\". Result:"
        )));

        let result = registry
            .call_tool(
                "find_one_document",
                args(json!({ "dbName": DB, "collectionName": "users", "filter": { "name": "a" } })),
            )
            .await
            .unwrap();
        let text = text_of(&result);
        assert!(text.starts_with("Document found:"));
        assert!(text.contains("\"value\": 1"));

        // Store failures come back as error results, not protocol errors.
        let result = registry
            .call_tool(
                "drop_index",
                args(json!({ "dbName": DB, "collectionName": "users", "indexName": "missing_1" })),
            )
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("dropIndex"));

        registry
            .call_tool("drop_database", args(json!({ "dbName": DB })))
            .await
            .unwrap();
        server.disconnect().await.unwrap();
    }
}
