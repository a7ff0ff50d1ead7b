//! Shared parameter types and payload conversion for tool definitions.
//!
//! Payloads arrive as JSON objects and are converted to BSON documents.
//! MongoDB Extended JSON (`{"$oid": ...}`, `{"$date": ...}`) is understood.

use mongodb::bson::Document;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::ToolError;

/// Parameters for tools that take none.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Parameters naming a database.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseParams {
    /// Database name
    pub db_name: String,
}

/// Parameters naming a collection within a database.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionParams {
    /// Database name
    pub db_name: String,
    /// Collection name
    pub collection_name: String,
}

/// Convert the JSON object supplied for `field` into a document.
pub fn to_document(field: &str, value: JsonObject) -> Result<Document, ToolError> {
    Document::try_from(value).map_err(|e| {
        ToolError::invalid_arguments(format!("`{field}` is not a valid document: {e}"))
    })
}

/// Like [`to_document`], for optional payloads.
pub fn to_optional_document(
    field: &str,
    value: Option<JsonObject>,
) -> Result<Option<Document>, ToolError> {
    value.map(|v| to_document(field, v)).transpose()
}

/// Convert each element of a JSON array, naming the failing index.
pub fn to_documents(field: &str, values: Vec<JsonObject>) -> Result<Vec<Document>, ToolError> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| to_document(&format!("{field}[{i}]"), v))
        .collect()
}
