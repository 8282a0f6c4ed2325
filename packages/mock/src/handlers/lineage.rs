//! Lineage handlers: the graph around an entity, and paged direct neighbours.

use std::collections::{BTreeMap, HashSet};

use axum::{
    extract::{Path, Query, State},
    Json,
};
use datacatalog_api::{LineageDirection, LineageGraph, LineageRelation};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::AppError;
use crate::storage::LineageEdge;

use super::AppState;

const DEFAULT_DEPTH: u32 = 3;
const DEFAULT_WIDTH: u32 = 10;
const DEFAULT_PAGE: u32 = 10;

/// Query parameters for `GET /api/atlas/v2/lineage/{guid}`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineageParams {
    pub direction: Option<String>,
    pub depth: Option<u32>,
    pub width: Option<u32>,
    pub include_parent: Option<bool>,
    pub get_derived_lineage: Option<bool>,
}

/// Query parameters for `GET /api/lineage/{guid}/next/`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NextPageParams {
    pub direction: Option<String>,
    pub get_derived_lineage: Option<bool>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

fn parse_direction(raw: Option<&str>) -> Result<LineageDirection, AppError> {
    let raw = raw.ok_or_else(|| AppError::MissingParameter("direction".into()))?;
    raw.parse().map_err(AppError::BadRequest)
}

/// The directions to walk for `direction`.
fn walks(direction: LineageDirection) -> &'static [LineageDirection] {
    match direction {
        LineageDirection::Input => &[LineageDirection::Input],
        LineageDirection::Output => &[LineageDirection::Output],
        LineageDirection::Both => &[LineageDirection::Input, LineageDirection::Output],
    }
}

/// Edges leaving `guid` in `direction`, paired with the entity at the other end.
fn neighbours<'a>(
    edges: &'a [LineageEdge],
    guid: &str,
    direction: LineageDirection,
) -> Vec<(&'a str, &'a LineageEdge)> {
    edges
        .iter()
        .filter_map(|e| match direction {
            LineageDirection::Input if e.to == guid => Some((e.from.as_str(), e)),
            LineageDirection::Output if e.from == guid => Some((e.to.as_str(), e)),
            _ => None,
        })
        .collect()
}

fn relation(edge: &LineageEdge) -> LineageRelation {
    LineageRelation {
        from_entity_id: edge.from.clone(),
        to_entity_id: edge.to.clone(),
        relationship_id: Some(edge.relationship_id.clone()),
        ..Default::default()
    }
}

/// Graph accumulated while walking outward from the base entity.
#[derive(Default)]
struct Walk {
    seen: HashSet<String>,
    relations: Vec<LineageRelation>,
    relation_ids: HashSet<String>,
    width_counts: Map<String, Value>,
}

impl Walk {
    fn add_relation(&mut self, edge: &LineageEdge) {
        if self.relation_ids.insert(edge.relationship_id.clone()) {
            self.relations.push(relation(edge));
        }
    }

    /// Breadth-first walk of `depth` hops, following at most `width`
    /// neighbours per node.
    fn run(
        &mut self,
        edges: &[LineageEdge],
        base: &str,
        direction: LineageDirection,
        depth: u32,
        width: usize,
    ) {
        let mut counts = Map::new();
        let mut frontier = vec![base.to_string()];
        for _ in 0..depth {
            let mut next = Vec::new();
            for node in &frontier {
                let found = neighbours(edges, node, direction);
                counts.insert(node.clone(), json!(found.len()));
                for (other, edge) in found.into_iter().take(width) {
                    self.add_relation(edge);
                    if self.seen.insert(other.to_string()) {
                        next.push(other.to_string());
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        self.width_counts
            .insert(direction.as_str().to_string(), Value::Object(counts));
    }
}

async fn entity_map(
    state: &AppState,
    guids: impl IntoIterator<Item = String>,
) -> Result<BTreeMap<String, Value>, AppError> {
    let mut map = BTreeMap::new();
    for guid in guids {
        if let Some(entity) = state.storage.get_entity(&guid).await? {
            map.insert(guid, entity);
        }
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// GET /api/atlas/v2/lineage/{guid}
// ---------------------------------------------------------------------------

/// `GET /api/atlas/v2/lineage/{guid}`: lineage graph up to `depth` hops.
///
/// Returns 400 without `direction` and 404 for an unknown entity.
pub async fn get_lineage_graph(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Query(params): Query<LineageParams>,
) -> Result<Json<LineageGraph>, AppError> {
    let direction = parse_direction(params.direction.as_deref())?;
    if state.storage.get_entity(&guid).await?.is_none() {
        return Err(AppError::EntityNotFound(guid));
    }
    let depth = params.depth.unwrap_or(DEFAULT_DEPTH);
    let width = params.width.unwrap_or(DEFAULT_WIDTH);

    let edges = state.storage.lineage_edges().await?;
    let mut walk = Walk::default();
    walk.seen.insert(guid.clone());
    for dir in walks(direction) {
        walk.run(&edges, &guid, *dir, depth, width as usize);
    }

    let children_count = walks(direction)
        .iter()
        .map(|d| neighbours(&edges, &guid, *d).len() as u32)
        .sum();
    let guid_entity_map = entity_map(&state, walk.seen.iter().cloned()).await?;

    tracing::debug!(%guid, %direction, nodes = guid_entity_map.len(), "lineage graph");
    Ok(Json(LineageGraph {
        base_entity_guid: Some(guid),
        lineage_direction: Some(direction),
        lineage_depth: Some(depth),
        lineage_width: Some(width),
        children_count: Some(children_count),
        include_parent: params.include_parent,
        guid_entity_map: Some(guid_entity_map),
        width_counts: Some(walk.width_counts),
        relations: Some(walk.relations),
        ..Default::default()
    }))
}

// ---------------------------------------------------------------------------
// GET /api/lineage/{guid}/next/
// ---------------------------------------------------------------------------

/// `GET /api/lineage/{guid}/next/`: one page of the base entity's direct
/// neighbours. Paging is by `offset` / `limit` only; `childrenCount` is the
/// total before paging.
pub async fn next_page_lineage(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Query(params): Query<NextPageParams>,
) -> Result<Json<LineageGraph>, AppError> {
    let direction = parse_direction(params.direction.as_deref())?;
    if state.storage.get_entity(&guid).await?.is_none() {
        return Err(AppError::EntityNotFound(guid));
    }
    let offset = params.offset.unwrap_or(0) as usize;
    let limit = params.limit.unwrap_or(DEFAULT_PAGE) as usize;

    let edges = state.storage.lineage_edges().await?;
    let all: Vec<(&str, &LineageEdge)> = walks(direction)
        .iter()
        .flat_map(|d| neighbours(&edges, &guid, *d))
        .collect();
    let page: Vec<(&str, &LineageEdge)> = all.iter().copied().skip(offset).take(limit).collect();

    let guids: Vec<String> = std::iter::once(guid.clone())
        .chain(page.iter().map(|(g, _)| g.to_string()))
        .collect();
    let guid_entity_map = entity_map(&state, guids).await?;

    Ok(Json(LineageGraph {
        base_entity_guid: Some(guid),
        lineage_direction: Some(direction),
        children_count: Some(all.len() as u32),
        guid_entity_map: Some(guid_entity_map),
        relations: Some(page.iter().map(|(_, e)| relation(e)).collect()),
        ..Default::default()
    }))
}
