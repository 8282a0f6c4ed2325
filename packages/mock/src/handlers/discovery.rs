//! Discovery handlers: search, suggest, browse, and auto-complete.
//!
//! Matching is deliberately simple. A keyword matches an entity when it is a
//! case-insensitive substring of its name, qualified name, description, or
//! type name; `*` or no keywords match everything.

use std::collections::{BTreeMap, BTreeSet};

use axum::{extract::State, Json};
use datacatalog_api::{
    AutoCompleteRequest, AutoCompleteResult, AutoCompleteResultValue, BrowseRequest,
    BrowseResult, BrowseResultValue, SearchFacetItem, SearchRequest, SearchResult,
    SearchResultValue, SuggestRequest, SuggestResult, SuggestResultValue,
};
use serde_json::{json, Map, Value};

use crate::error::AppError;

use super::{attribute, guid, type_name, AppState};

/// Page size when the request names none.
const DEFAULT_LIMIT: u32 = 50;
/// Largest page the service hands out.
const MAX_LIMIT: u32 = 1000;
const DEFAULT_SUGGEST_LIMIT: u32 = 5;

fn page_size(limit: Option<u32>, default: u32) -> Result<usize, AppError> {
    match limit.unwrap_or(default) {
        0 => Err(AppError::BadRequest("limit must be positive".into())),
        n if n > MAX_LIMIT => Err(AppError::BadRequest(format!(
            "limit must not exceed {MAX_LIMIT}"
        ))),
        n => Ok(n as usize),
    }
}

/// Searchable text fields of an entity.
fn fields(entity: &Value) -> [Option<&str>; 4] {
    [
        attribute(entity, "name"),
        attribute(entity, "qualifiedName"),
        attribute(entity, "description"),
        Some(type_name(entity)),
    ]
}

/// How many fields contain any keyword; `Some(1.0)` for match-all.
fn score(entity: &Value, keywords: Option<&str>) -> Option<f64> {
    let terms: Vec<String> = match keywords.map(str::trim) {
        None | Some("") | Some("*") => return Some(1.0),
        Some(k) => k.split_whitespace().map(str::to_lowercase).collect(),
    };
    let hits = fields(entity)
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .filter(|field| terms.iter().any(|t| field.contains(t.as_str())))
        .count();
    (hits > 0).then_some(hits as f64)
}

/// Evaluate a filter tree: `and` / `or` / `not`, `entityType`, and
/// `attributeName` + `attributeValue` with operator `eq` (default), `ne`, or
/// `contains`. Unknown clauses match.
fn matches_filter(filter: &Value, entity: &Value) -> bool {
    if let Some(all) = filter.get("and").and_then(Value::as_array) {
        return all.iter().all(|f| matches_filter(f, entity));
    }
    if let Some(any) = filter.get("or").and_then(Value::as_array) {
        return any.iter().any(|f| matches_filter(f, entity));
    }
    if let Some(inner) = filter.get("not") {
        return !matches_filter(inner, entity);
    }
    if let Some(wanted) = filter.get("entityType").and_then(Value::as_str) {
        return type_name(entity) == wanted;
    }
    if let (Some(name), Some(expected)) = (
        filter.get("attributeName").and_then(Value::as_str),
        filter.get("attributeValue"),
    ) {
        let actual = entity.get("attributes").and_then(|a| a.get(name));
        return match filter.get("operator").and_then(Value::as_str).unwrap_or("eq") {
            "eq" => actual == Some(expected),
            "ne" => actual != Some(expected),
            "contains" => match (actual.and_then(Value::as_str), expected.as_str()) {
                (Some(a), Some(e)) => a.contains(e),
                _ => false,
            },
            _ => false,
        };
    }
    true
}

fn facet_value<'a>(entity: &'a Value, facet: &str) -> Option<&'a str> {
    match facet {
        "entityType" => Some(type_name(entity)),
        other => attribute(entity, other),
    }
}

/// `{facet: [{count, value}]}` over all hits, largest count first.
fn facets(items: &[SearchFacetItem], hits: &[&Value]) -> Value {
    let mut out = Map::new();
    for item in items {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for entity in hits {
            if let Some(v) = facet_value(entity, &item.facet) {
                *counts.entry(v).or_default() += 1;
            }
        }
        let mut buckets: Vec<(&str, u64)> = counts.into_iter().collect();
        buckets.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let take = item.count.map_or(buckets.len(), |c| c as usize);
        let buckets: Vec<Value> = buckets
            .into_iter()
            .take(take)
            .map(|(value, count)| json!({"count": count, "value": value}))
            .collect();
        out.insert(item.facet.clone(), Value::Array(buckets));
    }
    Value::Object(out)
}

// ---------------------------------------------------------------------------
// POST /api/atlas/v2/search/advanced
// ---------------------------------------------------------------------------

/// `POST /api/atlas/v2/search/advanced`: ranked keyword search.
///
/// `searchCount` is the number of matches before paging.
pub async fn query(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResult>, AppError> {
    let limit = page_size(req.limit, DEFAULT_LIMIT)?;
    let offset = req.offset.unwrap_or(0) as usize;
    let entities = state.storage.list_entities().await?;

    let mut scored: Vec<(f64, &Value)> = entities
        .iter()
        .filter(|e| req.filter.as_ref().map_or(true, |f| matches_filter(f, e)))
        .filter_map(|e| score(e, req.keywords.as_deref()).map(|s| (s, e)))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let hits: Vec<&Value> = scored.iter().map(|(_, e)| *e).collect();
    let search_facets = req
        .facets
        .as_deref()
        .filter(|items| !items.is_empty())
        .map(|items| facets(items, &hits));

    let value = scored
        .iter()
        .skip(offset)
        .take(limit)
        .map(|(s, e)| SearchResultValue {
            search_score: Some(*s),
            id: Some(guid(e).to_string()),
            name: attribute(e, "name").map(str::to_string),
            qualified_name: attribute(e, "qualifiedName").map(str::to_string),
            entity_type: Some(type_name(e).to_string()),
            description: attribute(e, "description").map(str::to_string),
            ..Default::default()
        })
        .collect();

    tracing::debug!(matches = hits.len(), "search");
    Ok(Json(SearchResult {
        search_count: Some(hits.len() as u64),
        value: Some(value),
        search_facets,
        ..Default::default()
    }))
}

// ---------------------------------------------------------------------------
// POST /api/atlas/v2/search/suggest
// ---------------------------------------------------------------------------

/// `POST /api/atlas/v2/search/suggest`: entities whose name contains the
/// keywords, with the match wrapped in `<em>`.
pub async fn suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResult>, AppError> {
    let keywords = req
        .keywords
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::BadRequest("keywords are required".into()))?;
    let limit = page_size(req.limit, DEFAULT_SUGGEST_LIMIT)?;
    let needle = keywords.to_lowercase();
    let entities = state.storage.list_entities().await?;

    let value = entities
        .iter()
        .filter(|e| req.filter.as_ref().map_or(true, |f| matches_filter(f, e)))
        .filter_map(|e| {
            let name = attribute(e, "name")?;
            let at = name.to_lowercase().find(&needle)?;
            let end = at + needle.len();
            let highlighted = match (name.get(..at), name.get(at..end), name.get(end..)) {
                (Some(pre), Some(hit), Some(post)) => format!("{pre}<em>{hit}</em>{post}"),
                _ => name.to_string(),
            };
            Some(SuggestResultValue {
                search_text: Some(highlighted),
                id: Some(guid(e).to_string()),
                qualified_name: attribute(e, "qualifiedName").map(str::to_string),
                entity_type: Some(type_name(e).to_string()),
                ..Default::default()
            })
        })
        .take(limit)
        .collect();

    Ok(Json(SuggestResult {
        value: Some(value),
        ..Default::default()
    }))
}

// ---------------------------------------------------------------------------
// POST /api/atlas/v2/search/autocomplete
// ---------------------------------------------------------------------------

/// `POST /api/atlas/v2/search/autocomplete`: complete the last keyword to
/// words that appear in entity names.
pub async fn auto_complete(
    State(state): State<AppState>,
    Json(req): Json<AutoCompleteRequest>,
) -> Result<Json<AutoCompleteResult>, AppError> {
    let keywords = req
        .keywords
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("keywords are required".into()))?;
    let limit = page_size(req.limit, DEFAULT_SUGGEST_LIMIT)?;

    // "sales inv" completes "inv" and keeps "sales " in front.
    let (head, prefix) = match keywords.rsplit_once(char::is_whitespace) {
        Some((before, last)) => (format!("{before} "), last),
        None => (String::new(), keywords),
    };
    let prefix = prefix.to_lowercase();

    let entities = state.storage.list_entities().await?;
    let words: BTreeSet<String> = entities
        .iter()
        .filter(|e| req.filter.as_ref().map_or(true, |f| matches_filter(f, e)))
        .filter_map(|e| attribute(e, "name"))
        .flat_map(|name| name.split(|c: char| !c.is_alphanumeric()))
        .map(str::to_lowercase)
        .filter(|w| !w.is_empty() && w.starts_with(&prefix))
        .collect();

    let value = words
        .into_iter()
        .take(limit)
        .map(|text| AutoCompleteResultValue {
            query_plus_text: format!("{head}{text}"),
            text,
            ..Default::default()
        })
        .collect();

    Ok(Json(AutoCompleteResult {
        value: Some(value),
        ..Default::default()
    }))
}

// ---------------------------------------------------------------------------
// POST /api/atlas/v2/browse
// ---------------------------------------------------------------------------

/// `POST /api/atlas/v2/browse`: list entities of one type, or the direct
/// children of a qualified-name path. An entry is a leaf when no other entity sits below
/// its qualified name.
pub async fn browse(
    State(state): State<AppState>,
    Json(req): Json<BrowseRequest>,
) -> Result<Json<BrowseResult>, AppError> {
    let limit = page_size(req.limit, DEFAULT_LIMIT)?;
    let offset = req.offset.unwrap_or(0) as usize;
    let entities = state.storage.list_entities().await?;

    let children: Vec<&Value> = match (&req.entity_type, &req.path) {
        (Some(t), _) => entities
            .iter()
            .filter(|e| type_name(e) == t.as_str())
            .collect(),
        (None, Some(path)) => {
            let path = path.trim_end_matches('/');
            entities
                .iter()
                .filter(|e| {
                    attribute(e, "qualifiedName")
                        .and_then(|q| q.strip_prefix(path))
                        .and_then(|rest| rest.strip_prefix('/'))
                        .is_some_and(|name| !name.is_empty() && !name.contains('/'))
                })
                .collect()
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "either entityType or path is required".into(),
            ))
        }
    };

    let is_leaf = |entity: &Value| -> bool {
        let Some(qn) = attribute(entity, "qualifiedName") else {
            return true;
        };
        let below = format!("{}/", qn.trim_end_matches('/'));
        !entities.iter().any(|other| {
            attribute(other, "qualifiedName").is_some_and(|q| q.starts_with(&below))
        })
    };

    let value = children
        .iter()
        .skip(offset)
        .take(limit)
        .map(|e| BrowseResultValue {
            entity_type: Some(type_name(e).to_string()),
            id: Some(guid(e).to_string()),
            is_leaf: Some(is_leaf(e)),
            name: attribute(e, "name").map(str::to_string),
            path: attribute(e, "qualifiedName").map(str::to_string),
            qualified_name: attribute(e, "qualifiedName").map(str::to_string),
            ..Default::default()
        })
        .collect();

    Ok(Json(BrowseResult {
        search_count: Some(children.len() as u64),
        value: Some(value),
        ..Default::default()
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::test_support::{call, seeded_app};

    const SEARCH: &str = "/api/atlas/v2/search/advanced?api-version=2021-05-01-preview";

    #[tokio::test]
    async fn search_pages_and_counts() {
        let (app, _) = seeded_app().await;
        let (status, body) = call(
            &app,
            "POST",
            SEARCH,
            Some(json!({"keywords": "invoice", "offset": 0, "limit": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value = body["value"].as_array().unwrap();
        assert!(value.len() <= 2);
        assert!(body["searchCount"].as_u64().unwrap() >= 3);
        assert!(value.iter().all(|v| v["@search.score"].as_f64().unwrap() > 0.0));
    }

    #[tokio::test]
    async fn search_filter_and_facets() {
        let (app, _) = seeded_app().await;
        let (_, body) = call(
            &app,
            "POST",
            SEARCH,
            Some(json!({
                "keywords": "*",
                "filter": {"and": [{"entityType": "azure_sql_table"}, {"not": {"attributeName": "name", "attributeValue": "customers"}}]},
                "facets": [{"facet": "entityType"}]
            })),
        )
        .await;
        let value = body["value"].as_array().unwrap();
        assert!(!value.is_empty());
        assert!(value.iter().all(|v| v["entityType"] == "azure_sql_table"));
        assert!(value.iter().all(|v| v["name"] != "customers"));
        assert_eq!(body["@search.facets"]["entityType"][0]["value"], "azure_sql_table");
    }

    #[tokio::test]
    async fn search_rejects_oversized_page() {
        let (app, _) = seeded_app().await;
        let (status, body) = call(&app, "POST", SEARCH, Some(json!({"limit": 5000}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorCode"], "ATLAS-400-00-001");
    }

    #[tokio::test]
    async fn suggest_highlights_match() {
        let (app, _) = seeded_app().await;
        let (status, body) = call(
            &app,
            "POST",
            "/api/atlas/v2/search/suggest",
            Some(json!({"keywords": "cust"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"][0]["@search.text"], "<em>cust</em>omers");
    }

    #[tokio::test]
    async fn auto_complete_keeps_leading_words() {
        let (app, _) = seeded_app().await;
        let (_, body) = call(
            &app,
            "POST",
            "/api/atlas/v2/search/autocomplete",
            Some(json!({"keywords": "monthly inv"})),
        )
        .await;
        assert_eq!(body["value"][0]["text"], "invoice");
        assert_eq!(body["value"][0]["queryPlusText"], "monthly invoice");
    }

    #[tokio::test]
    async fn browse_by_type_and_path() {
        let (app, _) = seeded_app().await;
        let (_, by_type) = call(
            &app,
            "POST",
            "/api/atlas/v2/browse",
            Some(json!({"entityType": "azure_sql_server"})),
        )
        .await;
        assert_eq!(by_type["searchCount"], 1);
        assert_eq!(by_type["value"][0]["isLeaf"], false);

        let server_qn = by_type["value"][0]["qualifiedName"].as_str().unwrap().to_string();
        let (_, by_path) = call(
            &app,
            "POST",
            "/api/atlas/v2/browse",
            Some(json!({"path": server_qn})),
        )
        .await;
        let children = by_path["value"].as_array().unwrap();
        assert!(!children.is_empty());
        assert!(children.iter().all(|c| c["isLeaf"] == true));

        let (status, _) = call(&app, "POST", "/api/atlas/v2/browse", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
