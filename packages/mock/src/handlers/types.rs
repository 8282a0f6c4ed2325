//! Type definition handlers.
//!
//! Per-category reads (`/types/{kind}/guid/{guid}`, `/types/{kind}/name/{name}`)
//! only answer with a definition of that category; `typedef` answers with any.
//! Bulk create is create-only: a definition whose name already exists is
//! skipped, not merged and not rejected. Bulk update is an upsert.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use datacatalog_api::{TypeCategory, TypeDefHeader};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::storage::{StorageError, StoredTypeDef};

use super::AppState;

/// Query parameters for the bulk listing endpoints.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub include_term_template: Option<bool>,
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
}

impl ListParams {
    /// Categories this listing covers. Term templates are left out unless
    /// asked for, by flag or by filter.
    fn categories(&self) -> Result<Vec<TypeCategory>, AppError> {
        if let Some(raw) = &self.type_filter {
            let category = TypeCategory::from_filter_value(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown type filter {raw:?}")))?;
            return Ok(vec![category]);
        }
        let with_templates = self.include_term_template.unwrap_or(false);
        Ok(TypeCategory::ALL
            .into_iter()
            .filter(|c| with_templates || *c != TypeCategory::TermTemplate)
            .collect())
    }
}

/// Map a `{kind}` path segment to a category; `typedef` means any.
fn kind_category(kind: &str) -> Result<Option<TypeCategory>, AppError> {
    let category = match kind {
        "typedef" => return Ok(None),
        "classificationdef" => TypeCategory::Classification,
        "entitydef" => TypeCategory::Entity,
        "enumdef" => TypeCategory::Enum,
        "relationshipdef" => TypeCategory::Relationship,
        "structdef" => TypeCategory::Struct,
        other => return Err(AppError::BadRequest(format!("unknown type kind {other:?}"))),
    };
    Ok(Some(category))
}

fn of_category(found: Option<StoredTypeDef>, wanted: Option<TypeCategory>) -> Option<Value> {
    found
        .filter(|d| wanted.map_or(true, |c| c == d.category))
        .map(|d| d.def)
}

/// Pull `(category, definition)` pairs out of a bulk container, checking
/// every definition before anything is written.
fn container_defs(body: &Map<String, Value>) -> Result<Vec<(TypeCategory, Value)>, AppError> {
    let mut defs = Vec::new();
    for category in TypeCategory::ALL {
        let key = category.defs_key();
        let items = match body.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) => items,
            Some(_) => return Err(AppError::BadRequest(format!("{key} must be an array"))),
        };
        for item in items {
            let named = item
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| !n.is_empty());
            if !named {
                return Err(AppError::BadRequest(format!(
                    "every entry of {key} needs a name"
                )));
            }
            defs.push((category, item.clone()));
        }
    }
    Ok(defs)
}

/// A bulk container holding `defs`, with one (possibly empty) list per
/// category in `categories`.
fn container(categories: &[TypeCategory], defs: impl IntoIterator<Item = StoredTypeDef>) -> Value {
    let mut out = Map::new();
    for c in categories {
        out.insert(c.defs_key().to_string(), Value::Array(Vec::new()));
    }
    for d in defs {
        if let Some(Value::Array(list)) = out.get_mut(d.category.defs_key()) {
            list.push(d.def);
        }
    }
    Value::Object(out)
}

// ---------------------------------------------------------------------------
// Single-definition reads
// ---------------------------------------------------------------------------

/// `GET /api/atlas/v2/types/{kind}/guid/{guid}`
pub async fn get_by_guid(
    State(state): State<AppState>,
    Path((kind, guid)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let wanted = kind_category(&kind)?;
    let found = state.storage.get_typedef_by_guid(&guid).await?;
    of_category(found, wanted)
        .map(Json)
        .ok_or(AppError::TypeGuidNotFound(guid))
}

/// `GET /api/atlas/v2/types/{kind}/name/{name}`
pub async fn get_by_name(
    State(state): State<AppState>,
    Path((kind, name)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let wanted = kind_category(&kind)?;
    let found = state.storage.get_typedef_by_name(&name).await?;
    of_category(found, wanted)
        .map(Json)
        .ok_or(AppError::TypeNotFound(name))
}

/// `GET /api/types/termtemplatedef/guid/{guid}`
pub async fn term_template_by_guid(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Json<Value>, AppError> {
    let found = state.storage.get_typedef_by_guid(&guid).await?;
    of_category(found, Some(TypeCategory::TermTemplate))
        .map(Json)
        .ok_or(AppError::TypeGuidNotFound(guid))
}

/// `GET /api/types/termtemplatedef/name/{name}`
pub async fn term_template_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let found = state.storage.get_typedef_by_name(&name).await?;
    of_category(found, Some(TypeCategory::TermTemplate))
        .map(Json)
        .ok_or(AppError::TypeNotFound(name))
}

/// `DELETE /api/atlas/v2/types/typedef/name/{name}`: 204 on success.
///
/// Shares its route with the per-category reads, so other kinds are refused.
pub async fn delete_by_name(
    State(state): State<AppState>,
    Path((kind, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    if kind != "typedef" {
        return Err(AppError::BadRequest(format!(
            "definitions are deleted through typedef, not {kind}"
        )));
    }
    state
        .storage
        .delete_typedefs(std::slice::from_ref(&name))
        .await?;
    tracing::info!(%name, "type definition deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Bulk
// ---------------------------------------------------------------------------

/// `GET /api/atlas/v2/types/typedefs`
pub async fn get_all(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let categories = params.categories()?;
    let defs = state.storage.list_typedefs().await?;
    Ok(Json(container(
        &categories,
        defs.into_iter().filter(|d| categories.contains(&d.category)),
    )))
}

/// `GET /api/atlas/v2/types/typedefs/headers`
pub async fn headers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TypeDefHeader>>, AppError> {
    let categories = params.categories()?;
    let defs = state.storage.list_typedefs().await?;
    Ok(Json(
        defs.iter()
            .filter(|d| categories.contains(&d.category))
            .map(|d| TypeDefHeader {
                category: d.category,
                guid: d.guid().to_string(),
                name: d.name().to_string(),
                extra: Default::default(),
            })
            .collect(),
    ))
}

/// `POST /api/atlas/v2/types/typedefs`: create the definitions whose names
/// are new. Answers with the ones actually created.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    let mut created = Vec::new();
    for (category, def) in container_defs(&body)? {
        match state.storage.create_typedef(category, def).await? {
            Some(stored) => created.push(stored),
            None => tracing::debug!("type definition exists; left unchanged"),
        }
    }
    tracing::info!(created = created.len(), "type definitions created");
    Ok(Json(container(&TypeCategory::ALL, created)))
}

/// `PUT /api/atlas/v2/types/typedefs`: create or replace every definition.
///
/// Names are unique across categories, so listing an existing definition
/// under another category's key is a 400 and nothing is written.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    let defs = container_defs(&body)?;
    for (category, def) in &defs {
        let name = def.get("name").and_then(Value::as_str).unwrap_or_default();
        if let Some(existing) = state.storage.get_typedef_by_name(name).await? {
            if existing.category != *category {
                return Err(AppError::BadRequest(format!(
                    "type definition {name} is {}, not {category}",
                    existing.category
                )));
            }
        }
    }

    let mut stored = Vec::new();
    for (category, def) in defs {
        stored.push(state.storage.upsert_typedef(category, def).await?);
    }
    Ok(Json(container(&TypeCategory::ALL, stored)))
}

/// `DELETE /api/atlas/v2/types/typedefs`: delete every definition named in
/// the container, or none if any is unknown.
pub async fn delete_all(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let names: Vec<String> = container_defs(&body)?
        .iter()
        .filter_map(|(_, d)| d.get("name").and_then(Value::as_str).map(str::to_string))
        .collect();
    state
        .storage
        .delete_typedefs(&names)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(name) => AppError::TypeNotFound(name),
            other => other.into(),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::test_support::{call, seeded_app};

    const TYPEDEFS: &str = "/api/atlas/v2/types/typedefs";

    #[tokio::test]
    async fn per_category_reads_check_category() {
        let (app, demo) = seeded_app().await;
        let (status, body) = call(&app, "GET", "/api/atlas/v2/types/enumdef/name/data_sensitivity", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "ENUM");

        let (status, body) = call(&app, "GET", "/api/atlas/v2/types/entitydef/name/data_sensitivity", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorCode"], "ATLAS-404-00-001");

        let uri = format!("/api/atlas/v2/types/typedef/guid/{}", demo.sensitivity_enum);
        let (status, body) = call(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "data_sensitivity");

        let (status, body) = call(&app, "GET", "/api/atlas/v2/types/structdef/guid/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorCode"], "ATLAS-404-00-002");
    }

    #[tokio::test]
    async fn missing_term_template_is_not_found() {
        let (app, _) = seeded_app().await;
        let (status, body) = call(
            &app,
            "GET",
            "/api/types/termtemplatedef/name/Glossary1?api-version=2021-05-01-preview",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorMessage"], "Given typename Glossary1 was invalid");
    }

    #[tokio::test]
    async fn term_templates_are_opt_in() {
        let (app, _) = seeded_app().await;
        let (_, all) = call(&app, "GET", TYPEDEFS, None).await;
        assert!(all.get("termTemplateDefs").is_none());
        assert!(!all["entityDefs"].as_array().unwrap().is_empty());

        let (_, all) = call(&app, "GET", &format!("{TYPEDEFS}?includeTermTemplate=true"), None).await;
        assert_eq!(all["termTemplateDefs"].as_array().unwrap().len(), 1);

        let (_, headers) = call(&app, "GET", &format!("{TYPEDEFS}/headers?type=enum"), None).await;
        let headers = headers.as_array().unwrap();
        assert!(headers.iter().all(|h| h["category"] == "ENUM"));
        assert!(headers.iter().any(|h| h["name"] == "data_sensitivity"));

        let (status, _) = call(&app, "GET", &format!("{TYPEDEFS}?type=array"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_skips_existing_and_update_persists() {
        let (app, _) = seeded_app().await;
        let body = json!({
            "enumDefs": [
                {"name": "data_sensitivity", "description": "changed by create"},
                {"name": "review_state", "elementDefs": [{"value": "OPEN", "ordinal": 0}]}
            ]
        });
        let (status, created) = call(&app, "POST", TYPEDEFS, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let created = created["enumDefs"].as_array().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0]["name"], "review_state");

        let uri = "/api/atlas/v2/types/enumdef/name/data_sensitivity";
        let (_, kept) = call(&app, "GET", uri, None).await;
        assert_ne!(kept["description"], "changed by create");

        let mut changed = kept.clone();
        changed["description"] = json!("changed by update");
        let (status, _) = call(&app, "PUT", TYPEDEFS, Some(json!({"enumDefs": [changed]}))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, after) = call(&app, "GET", uri, None).await;
        assert_eq!(after["description"], "changed by update");
        assert_eq!(after["guid"], kept["guid"]);
    }

    #[tokio::test]
    async fn deletes() {
        let (app, _) = seeded_app().await;
        let (status, _) = call(
            &app,
            "DELETE",
            TYPEDEFS,
            Some(json!({"enumDefs": [{"name": "data_sensitivity"}, {"name": "ghost"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            &app,
            "DELETE",
            TYPEDEFS,
            Some(json!({"enumDefs": [{"name": "data_sensitivity"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, "DELETE", "/api/atlas/v2/types/typedef/name/address", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, "GET", "/api/atlas/v2/types/structdef/name/address", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, "DELETE", "/api/atlas/v2/types/enumdef/name/x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_body_is_validated_before_writing() {
        let (app, _) = seeded_app().await;
        let (status, _) = call(
            &app,
            "POST",
            TYPEDEFS,
            Some(json!({"structDefs": [{"name": "fresh"}, {"description": "no name"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&app, "GET", "/api/atlas/v2/types/structdef/name/fresh", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_cannot_move_a_definition_between_categories() {
        let (app, _) = seeded_app().await;
        let body = json!({
            "classificationDefs": [{"name": "fresh_tag"}],
            "structDefs": [{"name": "data_sensitivity"}]
        });
        let (status, err) = call(&app, "PUT", TYPEDEFS, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["errorMessage"].as_str().unwrap().contains("data_sensitivity"));

        let (status, _) = call(&app, "GET", "/api/atlas/v2/types/enumdef/name/data_sensitivity", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, "GET", "/api/atlas/v2/types/classificationdef/name/fresh_tag", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
