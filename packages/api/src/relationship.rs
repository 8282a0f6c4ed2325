//! Relationship instance types.

use datacatalog::RequestOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to one end of a relationship.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectId {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_attributes: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ObjectId {
    pub fn guid(type_name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            guid: Some(guid.into()),
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }
}

/// A relationship between two entities.
///
/// `guid` is absent on create (the service assigns it) and required on
/// update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    pub type_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end1: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end2: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// `ACTIVE` or `DELETED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Relationship {
    pub fn between(type_name: impl Into<String>, end1: ObjectId, end2: ObjectId) -> Self {
        Self {
            type_name: type_name.into(),
            end1: Some(end1),
            end2: Some(end2),
            ..Default::default()
        }
    }
}

/// Result of `getRelationship`: the relationship plus, with
/// `extendedInfo=true`, headers of the entities it references.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipWithExtInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_entities: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RelationshipWithExtInfo {
    /// Header of a referenced entity, present with `extendedInfo=true`.
    pub fn referred(&self, guid: &str) -> Option<&Value> {
        self.referred_entities.as_ref()?.get(guid)
    }
}

/// Query parameters for `getRelationship`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipQuery {
    pub extended_info: Option<bool>,
}

impl From<RelationshipQuery> for RequestOptions {
    fn from(q: RelationshipQuery) -> Self {
        RequestOptions::new().query_param_opt("extendedInfo", q.extended_info)
    }
}
