//! HTTP request handlers for the catalog endpoints.
//!
//! Each submodule covers one operation group. Handlers are async functions
//! that take axum extractors and return `Result<impl IntoResponse, AppError>`.
//! Matching, paging, and graph traversal live here; storage only stores.

pub mod discovery;
pub mod lineage;
pub mod relationship;
pub mod types;

use std::sync::Arc;

use serde_json::Value;

use crate::storage::Storage;

/// Shared application state threaded through all handlers via
/// [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

/// `entity.typeName`, or `""`.
pub(crate) fn type_name(entity: &Value) -> &str {
    entity.get("typeName").and_then(Value::as_str).unwrap_or_default()
}

/// `entity.attributes.<key>` when it is a string.
pub(crate) fn attribute<'a>(entity: &'a Value, key: &str) -> Option<&'a str> {
    entity.get("attributes")?.get(key)?.as_str()
}

pub(crate) fn guid(doc: &Value) -> &str {
    doc.get("guid").and_then(Value::as_str).unwrap_or_default()
}
