//! Type definitions and the bulk container.
//!
//! A definition's shape depends on its `category`. Rather than one struct per
//! category, [`TypeDef`] carries the fields shared by all of them plus the
//! category-specific ones as options, and keeps anything else in `extra`.

use std::fmt;
use std::str::FromStr;

use datacatalog::RequestOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of a type definition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCategory {
    Classification,
    Entity,
    Enum,
    Relationship,
    Struct,
    TermTemplate,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 6] = [
        TypeCategory::Classification,
        TypeCategory::Entity,
        TypeCategory::Enum,
        TypeCategory::Relationship,
        TypeCategory::Struct,
        TypeCategory::TermTemplate,
    ];

    /// Field name of this category's list in [`TypeDefs`], e.g. `"enumDefs"`.
    pub fn defs_key(&self) -> &'static str {
        match self {
            TypeCategory::Classification => "classificationDefs",
            TypeCategory::Entity => "entityDefs",
            TypeCategory::Enum => "enumDefs",
            TypeCategory::Relationship => "relationshipDefs",
            TypeCategory::Struct => "structDefs",
            TypeCategory::TermTemplate => "termTemplateDefs",
        }
    }

    /// Value of the `type` query filter, e.g. `"term_template"`.
    pub fn filter_value(&self) -> &'static str {
        match self {
            TypeCategory::Classification => "classification",
            TypeCategory::Entity => "entity",
            TypeCategory::Enum => "enum",
            TypeCategory::Relationship => "relationship",
            TypeCategory::Struct => "struct",
            TypeCategory::TermTemplate => "term_template",
        }
    }

    /// Inverse of [`filter_value`](Self::filter_value).
    pub fn from_filter_value(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.filter_value() == s)
    }

    /// Wire form, e.g. `"TERM_TEMPLATE"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Classification => "CLASSIFICATION",
            TypeCategory::Entity => "ENTITY",
            TypeCategory::Enum => "ENUM",
            TypeCategory::Relationship => "RELATIONSHIP",
            TypeCategory::Struct => "STRUCT",
            TypeCategory::TermTemplate => "TERM_TEMPLATE",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the wire form (`TERM_TEMPLATE`) or the filter form (`term_template`).
impl FromStr for TypeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.filter_value() == s)
            .ok_or_else(|| {
                format!(
                    "unknown type category {s:?}; expected one of: \
                     classification, entity, enum, relationship, struct, term_template"
                )
            })
    }
}

/// One attribute of a struct-like definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    pub name: String,

    pub type_name: String,

    /// `SINGLE`, `LIST`, or `SET`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_optional: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unique: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One value of an enum definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnumElementDef {
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One end of a relationship definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEndDef {
    pub type_name: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_container: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_legacy_attribute: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A type definition of any category.
///
/// Lists are `None` when the service left them out and `Some(vec![])` when
/// it sent them empty, so a definition re-encodes exactly as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TypeCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_defs: Option<Vec<AttributeDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_types: Option<Vec<String>>,

    /// Enum definitions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_defs: Option<Vec<EnumElementDef>>,

    /// Relationship definitions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_def1: Option<RelationshipEndDef>,

    /// Relationship definitions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_def2: Option<RelationshipEndDef>,

    /// Relationship definitions only: `ASSOCIATION`, `AGGREGATION`, or
    /// `COMPOSITION`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_category: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypeDef {
    pub fn new(category: TypeCategory, name: impl Into<String>) -> Self {
        Self {
            category: Some(category),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// The bulk container used by get-all, create, update, and delete.
///
/// Lists the service did not send stay `None`. Container keys this type
/// does not name (`businessMetadataDefs`, ...) are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_defs: Option<Vec<TypeDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_defs: Option<Vec<TypeDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_defs: Option<Vec<TypeDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_defs: Option<Vec<TypeDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub struct_defs: Option<Vec<TypeDef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_template_defs: Option<Vec<TypeDef>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypeDefs {
    fn list(&self, category: TypeCategory) -> &Option<Vec<TypeDef>> {
        match category {
            TypeCategory::Classification => &self.classification_defs,
            TypeCategory::Entity => &self.entity_defs,
            TypeCategory::Enum => &self.enum_defs,
            TypeCategory::Relationship => &self.relationship_defs,
            TypeCategory::Struct => &self.struct_defs,
            TypeCategory::TermTemplate => &self.term_template_defs,
        }
    }

    /// Definitions of `category`; empty when the list is absent.
    pub fn defs(&self, category: TypeCategory) -> &[TypeDef] {
        self.list(category).as_deref().unwrap_or_default()
    }

    /// The list for `category`, created empty if it was absent.
    pub fn defs_mut(&mut self, category: TypeCategory) -> &mut Vec<TypeDef> {
        let list = match category {
            TypeCategory::Classification => &mut self.classification_defs,
            TypeCategory::Entity => &mut self.entity_defs,
            TypeCategory::Enum => &mut self.enum_defs,
            TypeCategory::Relationship => &mut self.relationship_defs,
            TypeCategory::Struct => &mut self.struct_defs,
            TypeCategory::TermTemplate => &mut self.term_template_defs,
        };
        list.get_or_insert_with(Vec::new)
    }

    /// Add `def` to the list for its category. Definitions without a
    /// category go to `entityDefs`.
    pub fn push(&mut self, def: TypeDef) {
        let category = def.category.unwrap_or(TypeCategory::Entity);
        self.defs_mut(category).push(def);
    }

    /// Every definition with the category of the list it sits in.
    pub fn iter(&self) -> impl Iterator<Item = (TypeCategory, &TypeDef)> {
        TypeCategory::ALL
            .into_iter()
            .flat_map(move |c| self.defs(c).iter().map(move |d| (c, d)))
    }

    /// Find a definition by name in any list.
    pub fn find(&self, name: &str) -> Option<(TypeCategory, &TypeDef)> {
        self.iter().find(|(_, d)| d.name == name)
    }

    pub fn len(&self) -> usize {
        TypeCategory::ALL.iter().map(|c| self.defs(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<TypeDef> for TypeDefs {
    fn from_iter<I: IntoIterator<Item = TypeDef>>(iter: I) -> Self {
        let mut defs = TypeDefs::default();
        for def in iter {
            defs.push(def);
        }
        defs
    }
}

/// Entry of `listTypeDefinitionHeaders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefHeader {
    pub category: TypeCategory,
    pub guid: String,
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters for `getAllTypeDefinitions` and
/// `listTypeDefinitionHeaders`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypesQuery {
    /// Include term templates. The service leaves them out by default.
    pub include_term_template: Option<bool>,
    /// Only definitions of this category.
    pub category: Option<TypeCategory>,
}

impl From<TypesQuery> for RequestOptions {
    fn from(q: TypesQuery) -> Self {
        RequestOptions::new()
            .query_param_opt("includeTermTemplate", q.include_term_template)
            .query_param_opt("type", q.category.map(|c| c.filter_value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn container_sorts_defs_by_category() {
        let defs: TypeDefs = [
            TypeDef::new(TypeCategory::Enum, "Colors"),
            TypeDef::new(TypeCategory::Entity, "dataset"),
            TypeDef::new(TypeCategory::TermTemplate, "Glossary1"),
        ]
        .into_iter()
        .collect();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs.defs(TypeCategory::Enum)[0].name, "Colors");
        assert!(defs.defs(TypeCategory::Struct).is_empty());
        assert_eq!(defs.find("Glossary1").unwrap().0, TypeCategory::TermTemplate);

        let json = serde_json::to_value(&defs).unwrap();
        assert!(json.get("structDefs").is_none());
        assert_eq!(json["termTemplateDefs"][0]["category"], "TERM_TEMPLATE");
    }

    #[test]
    fn relationship_def_roundtrip_keeps_extra() {
        let raw = json!({
            "category": "RELATIONSHIP",
            "name": "table_columns",
            "relationshipCategory": "COMPOSITION",
            "endDef1": {"typeName": "table", "name": "columns", "cardinality": "SET", "isContainer": true},
            "endDef2": {"typeName": "column", "name": "table", "cardinality": "SINGLE"},
            "propagateTags": "NONE"
        });
        let def: TypeDef = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(def.end_def1.as_ref().unwrap().name, "columns");
        assert_eq!(def.extra["propagateTags"], "NONE");
        assert_eq!(serde_json::to_value(&def).unwrap(), raw);
    }

    #[test]
    fn category_forms() {
        assert_eq!("term_template".parse::<TypeCategory>(), Ok(TypeCategory::TermTemplate));
        assert_eq!("ENUM".parse::<TypeCategory>(), Ok(TypeCategory::Enum));
        assert_eq!(TypeCategory::from_filter_value("struct"), Some(TypeCategory::Struct));
        assert!("array".parse::<TypeCategory>().is_err());
    }

    #[test]
    fn types_query() {
        let opts: RequestOptions = TypesQuery {
            include_term_template: Some(true),
            category: Some(TypeCategory::TermTemplate),
        }
        .into();
        assert_eq!(opts.get_query("type"), Some("term_template"));
        assert_eq!(opts.get_query("includeTermTemplate"), Some("true"));
    }

    #[test]
    fn empty_lists_survive_round_trip() {
        let raw = json!({
            "category": "ENTITY",
            "name": "x",
            "attributeDefs": [],
            "superTypes": []
        });
        let def: TypeDef = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(def.attribute_defs, Some(vec![]));
        assert_eq!(def.element_defs, None);
        assert_eq!(serde_json::to_value(&def).unwrap(), raw);
    }

    #[test]
    fn container_keeps_unknown_lists() {
        let raw = json!({
            "entityDefs": [{"name": "x"}],
            "enumDefs": [],
            "businessMetadataDefs": [{"name": "bm"}]
        });
        let defs: TypeDefs = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs.enum_defs, Some(vec![]));
        assert_eq!(defs.extra["businessMetadataDefs"][0]["name"], "bm");
        assert_eq!(serde_json::to_value(&defs).unwrap(), raw);
    }

    #[test]
    fn nested_defs_keep_unknown_fields() {
        let raw = json!({
            "category": "ENUM",
            "name": "Colors",
            "elementDefs": [{"value": "RED", "ordinal": 0, "displayName": "Red"}]
        });
        let def: TypeDef = serde_json::from_value(raw.clone()).unwrap();
        let elements = def.element_defs.as_deref().unwrap();
        assert_eq!(elements[0].extra["displayName"], "Red");
        assert_eq!(serde_json::to_value(&def).unwrap(), raw);

        let end = json!({"typeName": "table", "name": "columns", "isOptional": true});
        let parsed: RelationshipEndDef = serde_json::from_value(end.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), end);
    }

    #[test]
    fn header_keeps_unknown_fields() {
        let raw = json!({"category": "ENUM", "guid": "g1", "name": "Colors", "serviceType": "atlas"});
        let header: TypeDefHeader = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&header).unwrap(), raw);
    }
}
