//! Relationship handlers: create, update, get, and delete.
//!
//! Relationships are stored as sent. The only field the service adds is
//! `guid` on create, so a relationship read back equals the one written.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::AppError;
use crate::storage::StorageError;

use super::{guid, type_name, AppState};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetParams {
    pub extended_info: Option<bool>,
}

fn require_type_name(relationship: &Value) -> Result<(), AppError> {
    if !relationship.is_object() {
        return Err(AppError::BadRequest("relationship must be a JSON object".into()));
    }
    if type_name(relationship).is_empty() {
        return Err(AppError::BadRequest("relationship typeName is required".into()));
    }
    Ok(())
}

fn not_found(guid: &str) -> impl FnOnce(StorageError) -> AppError + '_ {
    move |e| match e {
        StorageError::NotFound(_) => AppError::RelationshipNotFound(guid.to_string()),
        other => other.into(),
    }
}

/// `POST /api/atlas/v2/relationship`: store a new relationship.
///
/// A missing or negative placeholder `guid` is replaced by a fresh one.
pub async fn create(
    State(state): State<AppState>,
    Json(relationship): Json<Value>,
) -> Result<Json<Value>, AppError> {
    require_type_name(&relationship)?;
    let stored = state.storage.create_relationship(relationship).await?;
    tracing::info!(guid = guid(&stored), "relationship created");
    Ok(Json(stored))
}

/// `PUT /api/atlas/v2/relationship`: replace an existing relationship.
pub async fn update(
    State(state): State<AppState>,
    Json(relationship): Json<Value>,
) -> Result<Json<Value>, AppError> {
    require_type_name(&relationship)?;
    let id = guid(&relationship).to_string();
    if id.is_empty() {
        return Err(AppError::BadRequest("relationship guid is required".into()));
    }
    let stored = state
        .storage
        .replace_relationship(relationship)
        .await
        .map_err(not_found(&id))?;
    Ok(Json(stored))
}

/// `GET /api/atlas/v2/relationship/guid/{guid}`: the relationship, plus the
/// headers of both end entities when `extendedInfo=true`.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<GetParams>,
) -> Result<Json<Value>, AppError> {
    let relationship = state
        .storage
        .get_relationship(&id)
        .await?
        .ok_or_else(|| AppError::RelationshipNotFound(id.clone()))?;

    let mut referred = Map::new();
    if params.extended_info.unwrap_or(false) {
        for end in ["end1", "end2"] {
            let end_guid = relationship.get(end).map(guid).unwrap_or_default();
            if end_guid.is_empty() {
                continue;
            }
            if let Some(entity) = state.storage.get_entity(end_guid).await? {
                referred.insert(end_guid.to_string(), entity);
            }
        }
    }

    Ok(Json(json!({
        "relationship": relationship,
        "referredEntities": referred,
    })))
}

/// `DELETE /api/atlas/v2/relationship/guid/{guid}`: 204 on success.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .storage
        .delete_relationship(&id)
        .await
        .map_err(not_found(&id))?;
    Ok(StatusCode::NO_CONTENT)
}
