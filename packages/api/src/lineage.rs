//! Lineage query helpers and the lineage graph shape.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use datacatalog::RequestOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which edges to follow from the base entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineageDirection {
    /// Upstream: what the entity was derived from.
    Input,
    /// Downstream: what was derived from the entity.
    Output,
    Both,
}

impl LineageDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineageDirection::Input => "INPUT",
            LineageDirection::Output => "OUTPUT",
            LineageDirection::Both => "BOTH",
        }
    }
}

impl fmt::Display for LineageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a direction, ignoring ASCII case.
impl FromStr for LineageDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INPUT" => Ok(LineageDirection::Input),
            "OUTPUT" => Ok(LineageDirection::Output),
            "BOTH" => Ok(LineageDirection::Both),
            _ => Err(format!(
                "unknown lineage direction {s:?}; expected one of: INPUT, OUTPUT, BOTH"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

/// Query parameters for `getLineageGraph`.
///
/// `direction` is the only required parameter, so it is the only
/// constructor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageQuery {
    pub direction: LineageDirection,
    /// Hops to follow. The service defaults to 3.
    pub depth: Option<u32>,
    /// Maximum neighbours per node. The service defaults to 10.
    pub width: Option<u32>,
    pub include_parent: Option<bool>,
    pub get_derived_lineage: Option<bool>,
}

impl LineageQuery {
    pub fn new(direction: LineageDirection) -> Self {
        Self {
            direction,
            depth: None,
            width: None,
            include_parent: None,
            get_derived_lineage: None,
        }
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn include_parent(mut self, include: bool) -> Self {
        self.include_parent = Some(include);
        self
    }

    pub fn get_derived_lineage(mut self, derived: bool) -> Self {
        self.get_derived_lineage = Some(derived);
        self
    }
}

impl From<LineageQuery> for RequestOptions {
    fn from(q: LineageQuery) -> Self {
        RequestOptions::new()
            .query_param_opt("depth", q.depth)
            .query_param_opt("width", q.width)
            .query_param("direction", q.direction)
            .query_param_opt("includeParent", q.include_parent)
            .query_param_opt("getDerivedLineage", q.get_derived_lineage)
    }
}

/// Query parameters for `nextPageLineage`.
///
/// There is no server cursor: pass the `offset` of the page you want.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPageQuery {
    pub direction: LineageDirection,
    pub get_derived_lineage: Option<bool>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl NextPageQuery {
    pub fn new(direction: LineageDirection) -> Self {
        Self {
            direction,
            get_derived_lineage: None,
            offset: None,
            limit: None,
        }
    }

    pub fn page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }
}

impl From<NextPageQuery> for RequestOptions {
    fn from(q: NextPageQuery) -> Self {
        RequestOptions::new()
            .query_param("direction", q.direction)
            .query_param_opt("getDerivedLineage", q.get_derived_lineage)
            .query_param_opt("offset", q.offset)
            .query_param_opt("limit", q.limit)
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// The lineage graph around one entity.
///
/// ```json
/// {
///   "baseEntityGuid": "a1",
///   "lineageDirection": "BOTH",
///   "lineageDepth": 3,
///   "guidEntityMap": { "a1": { "typeName": "azure_sql_table", ... } },
///   "relations": [ { "fromEntityId": "p1", "toEntityId": "a1", "relationshipId": "r1" } ],
///   "widthCounts": { "INPUT": { "a1": 1 }, "OUTPUT": {} }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineageGraph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_entity_guid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineage_direction: Option<LineageDirection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineage_depth: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineage_width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_parent: Option<bool>,

    /// Entity headers keyed by GUID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid_entity_map: Option<BTreeMap<String, Value>>,

    /// Per-direction neighbour counts keyed by GUID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_counts: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<LineageRelation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_relations: Option<Vec<ParentRelation>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineageGraph {
    /// Header of the entity with `guid`, if the graph includes it.
    pub fn entity(&self, guid: &str) -> Option<&Value> {
        self.guid_entity_map.as_ref()?.get(guid)
    }

    pub fn edges(&self) -> &[LineageRelation] {
        self.relations.as_deref().unwrap_or_default()
    }
}

/// A data-flow edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineageRelation {
    pub from_entity_id: String,
    pub to_entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A containment edge (e.g. column → table).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParentRelation {
    pub child_entity_id: String,
    pub parent_entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direction_is_always_set() {
        let opts: RequestOptions = LineageQuery::new(LineageDirection::Input).into();
        assert_eq!(opts.get_query("direction"), Some("INPUT"));
        assert_eq!(opts.query().len(), 1);
    }

    #[test]
    fn lineage_query_parameter_names() {
        let opts: RequestOptions = LineageQuery::new(LineageDirection::Both)
            .depth(2)
            .width(5)
            .include_parent(true)
            .get_derived_lineage(false)
            .into();
        let names: Vec<&str> = opts.query().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["depth", "width", "direction", "includeParent", "getDerivedLineage"]
        );
        assert_eq!(opts.get_query("includeParent"), Some("true"));
    }

    #[test]
    fn next_page_query() {
        let opts: RequestOptions = NextPageQuery::new(LineageDirection::Output).page(20, 10).into();
        assert_eq!(opts.get_query("offset"), Some("20"));
        assert_eq!(opts.get_query("limit"), Some("10"));
        assert_eq!(opts.get_query("direction"), Some("OUTPUT"));
    }

    #[test]
    fn direction_parse() {
        assert_eq!("both".parse::<LineageDirection>(), Ok(LineageDirection::Both));
        assert!("sideways".parse::<LineageDirection>().is_err());
    }

    #[test]
    fn graph_round_trip_keeps_empty_and_unknown_fields() {
        let raw = json!({
            "baseEntityGuid": "a1",
            "guidEntityMap": {"a1": {"typeName": "azure_sql_table"}},
            "widthCounts": {},
            "relations": [{"fromEntityId": "p1", "toEntityId": "a1", "createTime": 7}],
            "parentRelations": []
        });
        let graph: LineageGraph = serde_json::from_value(raw.clone()).unwrap();
        assert!(graph.entity("a1").is_some());
        assert_eq!(graph.edges()[0].relationship_id, None);
        assert_eq!(serde_json::to_value(&graph).unwrap(), raw);

        let bare: LineageGraph = serde_json::from_value(json!({})).unwrap();
        assert!(bare.entity("a1").is_none());
        assert!(bare.edges().is_empty());
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!({}));
    }
}
