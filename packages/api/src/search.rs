//! Discovery request and result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Body of `POST /api/atlas/v2/search/advanced`.
///
/// ```json
/// { "keywords": "invoice", "offset": 0, "limit": 10, "filter": { "entityType": "azure_sql_table" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Page size. The service caps it at 1000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Filter expression (`and` / `or` / `not` trees of attribute matches).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<SearchFacetItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy_setting: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchRequest {
    pub fn keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: Some(keywords.into()),
            ..Default::default()
        }
    }

    pub fn page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A facet to compute alongside the results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchFacetItem {
    pub facet: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Total number of matches, independent of paging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<SearchResultValue>>,

    #[serde(rename = "@search.facets", skip_serializing_if = "Option::is_none")]
    pub search_facets: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    pub fn count(&self) -> u64 {
        self.search_count.unwrap_or(0)
    }

    pub fn values(&self) -> &[SearchResultValue] {
        self.value.as_deref().unwrap_or_default()
    }
}

/// One ranked hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultValue {
    #[serde(rename = "@search.score", skip_serializing_if = "Option::is_none")]
    pub search_score: Option<f64>,

    #[serde(rename = "@search.highlights", skip_serializing_if = "Option::is_none")]
    pub search_highlights: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Suggest / auto-complete
// ---------------------------------------------------------------------------

/// Body of `POST /api/atlas/v2/search/suggest`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuggestRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuggestResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<SuggestResultValue>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SuggestResult {
    pub fn values(&self) -> &[SuggestResultValue] {
        self.value.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestResultValue {
    /// The suggested text with the matched part highlighted.
    #[serde(rename = "@search.text", skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/atlas/v2/search/autocomplete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AutoCompleteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AutoCompleteResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<AutoCompleteResultValue>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AutoCompleteResult {
    pub fn values(&self) -> &[AutoCompleteResultValue] {
        self.value.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoCompleteResultValue {
    /// The completed term.
    pub text: String,

    /// The keywords followed by the completion.
    pub query_plus_text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

/// Body of `POST /api/atlas/v2/browse`. Set either `entity_type` or `path`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<BrowseResultValue>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BrowseResult {
    pub fn count(&self) -> u64 {
        self.search_count.unwrap_or(0)
    }

    pub fn values(&self) -> &[BrowseResultValue] {
        self.value.as_deref().unwrap_or_default()
    }
}

/// One child in the browse hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResultValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `true` when the child has no children of its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_leaf: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_request_omits_unset_fields() {
        let req = SearchRequest::keywords("invoice").page(0, 10);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"keywords": "invoice", "offset": 0, "limit": 10})
        );
    }

    #[test]
    fn search_result_keeps_unknown_fields() {
        let raw = json!({
            "searchCount": 42,
            "value": [{
                "@search.score": 3.5,
                "id": "a1",
                "name": "invoices",
                "entityType": "azure_sql_table",
                "owner": "finance",
                "classification": ["MICROSOFT.FINANCIAL"]
            }],
            "@search.facets": {"entityType": [{"count": 1, "value": "azure_sql_table"}]}
        });
        let result: SearchResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.count(), 42);
        assert_eq!(result.values()[0].extra["owner"], "finance");
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }

    #[test]
    fn browse_value_leaf_flag() {
        let v: BrowseResultValue = serde_json::from_value(json!({
            "entityType": "azure_storage_account",
            "id": "x",
            "isLeaf": true,
            "name": "acct"
        }))
        .unwrap();
        assert_eq!(v.is_leaf, Some(true));
    }

    #[test]
    fn absent_counts_and_lists_stay_absent() {
        let raw = json!({"value": [{"id": "a1", "@search.text": "inv"}], "nextLink": "p2"});
        let suggested: SuggestResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(suggested.values()[0].search_text.as_deref(), Some("inv"));
        assert_eq!(serde_json::to_value(&suggested).unwrap(), raw);

        let empty: SearchResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.count(), 0);
        assert!(empty.values().is_empty());
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));

        let browsed = json!({"searchCount": 0, "value": []});
        let parsed: BrowseResult = serde_json::from_value(browsed.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), browsed);
    }

    #[test]
    fn completions_and_facets_keep_unknown_fields() {
        let raw = json!({"value": [{"text": "invoice", "queryPlusText": "invoice", "score": 1}]});
        let completed: AutoCompleteResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&completed).unwrap(), raw);

        let req = json!({"keywords": "x", "facets": [{"facet": "entityType", "top": 5}], "orderby": []});
        let parsed: SearchRequest = serde_json::from_value(req.clone()).unwrap();
        assert_eq!(parsed.facets.as_deref().unwrap()[0].extra["top"], 5);
        assert_eq!(serde_json::to_value(&parsed).unwrap(), req);
    }
}
