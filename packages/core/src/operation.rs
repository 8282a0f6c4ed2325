//! The operation table.
//!
//! | Group | Method | Path |
//! |-------|--------|------|
//! | discovery | POST | `/api/atlas/v2/search/advanced`, `/search/suggest`, `/search/autocomplete`, `/browse` |
//! | lineage | GET | `/api/atlas/v2/lineage/{guid}`, `/api/lineage/{guid}/next/` |
//! | relationship | POST, PUT | `/api/atlas/v2/relationship` |
//! | relationship | GET, DELETE | `/api/atlas/v2/relationship/guid/{guid}` |
//! | types | GET | `/api/atlas/v2/types/{category}def/{guid,name}/...` |
//! | types | GET, POST, PUT, DELETE | `/api/atlas/v2/types/typedefs` |
//! | types | GET | `/api/types/termtemplatedef/{guid,name}/...` |

use std::fmt;
use std::str::FromStr;

use crate::descriptor::{
    Group, Method, OperationDescriptor, ParamKind, QueryParam, API_VERSION,
};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Shared query parameter lists
// ---------------------------------------------------------------------------

const LINEAGE_DIRECTIONS: &[&str] = &["INPUT", "OUTPUT", "BOTH"];

const TYPE_FILTERS: &[&str] = &[
    "enum",
    "entity",
    "classification",
    "relationship",
    "struct",
    "term_template",
];

const API_VERSION_ONLY: &[QueryParam] = &[QueryParam::required(API_VERSION, ParamKind::String)];

const LINEAGE_GRAPH_QUERY: &[QueryParam] = &[
    QueryParam::optional("depth", ParamKind::Integer),
    QueryParam::optional("width", ParamKind::Integer),
    QueryParam::required("direction", ParamKind::Enum(LINEAGE_DIRECTIONS)),
    QueryParam::optional("includeParent", ParamKind::Boolean),
    QueryParam::optional("getDerivedLineage", ParamKind::Boolean),
];

const LINEAGE_NEXT_PAGE_QUERY: &[QueryParam] = &[
    QueryParam::required("direction", ParamKind::Enum(LINEAGE_DIRECTIONS)),
    QueryParam::optional("getDerivedLineage", ParamKind::Boolean),
    QueryParam::optional("offset", ParamKind::Integer),
    QueryParam::optional("limit", ParamKind::Integer),
    QueryParam::required(API_VERSION, ParamKind::String),
];

const RELATIONSHIP_GET_QUERY: &[QueryParam] =
    &[QueryParam::optional("extendedInfo", ParamKind::Boolean)];

const TYPEDEFS_LIST_QUERY: &[QueryParam] = &[
    QueryParam::optional("includeTermTemplate", ParamKind::Boolean),
    QueryParam::optional("type", ParamKind::Enum(TYPE_FILTERS)),
];

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

use Group::{Discovery, Lineage, Relationship, Types};
use Method::{Delete, Get, Post, Put};

static QUERY: OperationDescriptor =
    OperationDescriptor::new("query", Discovery, Post, "/api/atlas/v2/search/advanced")
        .query(API_VERSION_ONLY)
        .body("SearchRequest")
        .returns("SearchResult");
static SUGGEST: OperationDescriptor =
    OperationDescriptor::new("suggest", Discovery, Post, "/api/atlas/v2/search/suggest")
        .query(API_VERSION_ONLY)
        .body("SuggestRequest")
        .returns("SuggestResult");
static BROWSE: OperationDescriptor =
    OperationDescriptor::new("browse", Discovery, Post, "/api/atlas/v2/browse")
        .query(API_VERSION_ONLY)
        .body("BrowseRequest")
        .returns("BrowseResult");
static AUTO_COMPLETE: OperationDescriptor = OperationDescriptor::new(
    "autoComplete",
    Discovery,
    Post,
    "/api/atlas/v2/search/autocomplete",
)
.query(API_VERSION_ONLY)
.body("AutoCompleteRequest")
.returns("AutoCompleteResult");

static GET_LINEAGE_GRAPH: OperationDescriptor =
    OperationDescriptor::new("getLineageGraph", Lineage, Get, "/api/atlas/v2/lineage/{guid}")
        .query(LINEAGE_GRAPH_QUERY)
        .returns("LineageGraph");
static NEXT_PAGE_LINEAGE: OperationDescriptor =
    OperationDescriptor::new("nextPageLineage", Lineage, Get, "/api/lineage/{guid}/next/")
        .query(LINEAGE_NEXT_PAGE_QUERY)
        .returns("LineageGraph");

static CREATE_RELATIONSHIP: OperationDescriptor =
    OperationDescriptor::new("createRelationship", Relationship, Post, "/api/atlas/v2/relationship")
        .body("Relationship")
        .returns("Relationship");
static UPDATE_RELATIONSHIP: OperationDescriptor =
    OperationDescriptor::new("updateRelationship", Relationship, Put, "/api/atlas/v2/relationship")
        .body("Relationship")
        .returns("Relationship");
static GET_RELATIONSHIP: OperationDescriptor = OperationDescriptor::new(
    "getRelationship",
    Relationship,
    Get,
    "/api/atlas/v2/relationship/guid/{guid}",
)
.query(RELATIONSHIP_GET_QUERY)
.returns("RelationshipWithExtInfo");
static DELETE_RELATIONSHIP: OperationDescriptor = OperationDescriptor::new(
    "deleteRelationship",
    Relationship,
    Delete,
    "/api/atlas/v2/relationship/guid/{guid}",
)
.no_content();

static GET_CLASSIFICATION_DEF_BY_GUID: OperationDescriptor = OperationDescriptor::new(
    "getClassificationDefByGuid",
    Types,
    Get,
    "/api/atlas/v2/types/classificationdef/guid/{guid}",
)
.returns("ClassificationDef");
static GET_CLASSIFICATION_DEF_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "getClassificationDefByName",
    Types,
    Get,
    "/api/atlas/v2/types/classificationdef/name/{name}",
)
.returns("ClassificationDef");
static GET_ENTITY_DEFINITION_BY_GUID: OperationDescriptor = OperationDescriptor::new(
    "getEntityDefinitionByGuid",
    Types,
    Get,
    "/api/atlas/v2/types/entitydef/guid/{guid}",
)
.returns("EntityDef");
static GET_ENTITY_DEFINITION_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "getEntityDefinitionByName",
    Types,
    Get,
    "/api/atlas/v2/types/entitydef/name/{name}",
)
.returns("EntityDef");
static GET_ENUM_DEF_BY_GUID: OperationDescriptor = OperationDescriptor::new(
    "getEnumDefByGuid",
    Types,
    Get,
    "/api/atlas/v2/types/enumdef/guid/{guid}",
)
.returns("EnumDef");
static GET_ENUM_DEF_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "getEnumDefByName",
    Types,
    Get,
    "/api/atlas/v2/types/enumdef/name/{name}",
)
.returns("EnumDef");
static GET_RELATIONSHIP_DEF_BY_GUID: OperationDescriptor = OperationDescriptor::new(
    "getRelationshipDefByGuid",
    Types,
    Get,
    "/api/atlas/v2/types/relationshipdef/guid/{guid}",
)
.returns("RelationshipDef");
static GET_RELATIONSHIP_DEF_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "getRelationshipDefByName",
    Types,
    Get,
    "/api/atlas/v2/types/relationshipdef/name/{name}",
)
.returns("RelationshipDef");
static GET_STRUCT_DEF_BY_GUID: OperationDescriptor = OperationDescriptor::new(
    "getStructDefByGuid",
    Types,
    Get,
    "/api/atlas/v2/types/structdef/guid/{guid}",
)
.returns("StructDef");
static GET_STRUCT_DEF_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "getStructDefByName",
    Types,
    Get,
    "/api/atlas/v2/types/structdef/name/{name}",
)
.returns("StructDef");
static GET_TYPE_DEFINITION_BY_GUID: OperationDescriptor = OperationDescriptor::new(
    "getTypeDefinitionByGuid",
    Types,
    Get,
    "/api/atlas/v2/types/typedef/guid/{guid}",
)
.returns("TypeDef");
static GET_TYPE_DEFINITION_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "getTypeDefinitionByName",
    Types,
    Get,
    "/api/atlas/v2/types/typedef/name/{name}",
)
.returns("TypeDef");
static DELETE_TYPE_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "deleteTypeByName",
    Types,
    Delete,
    "/api/atlas/v2/types/typedef/name/{name}",
)
.no_content();
static GET_ALL_TYPE_DEFINITIONS: OperationDescriptor = OperationDescriptor::new(
    "getAllTypeDefinitions",
    Types,
    Get,
    "/api/atlas/v2/types/typedefs",
)
.query(TYPEDEFS_LIST_QUERY)
.returns("TypeDefs");
static CREATE_TYPE_DEFINITIONS: OperationDescriptor = OperationDescriptor::new(
    "createTypeDefinitions",
    Types,
    Post,
    "/api/atlas/v2/types/typedefs",
)
.body("TypeDefs")
.returns("TypeDefs");
static UPDATE_ATLAS_TYPE_DEFINITIONS: OperationDescriptor = OperationDescriptor::new(
    "updateAtlasTypeDefinitions",
    Types,
    Put,
    "/api/atlas/v2/types/typedefs",
)
.body("TypeDefs")
.returns("TypeDefs");
static DELETE_TYPE_DEFINITIONS: OperationDescriptor = OperationDescriptor::new(
    "deleteTypeDefinitions",
    Types,
    Delete,
    "/api/atlas/v2/types/typedefs",
)
.body("TypeDefs")
.no_content();
static LIST_TYPE_DEFINITION_HEADERS: OperationDescriptor = OperationDescriptor::new(
    "listTypeDefinitionHeaders",
    Types,
    Get,
    "/api/atlas/v2/types/typedefs/headers",
)
.query(TYPEDEFS_LIST_QUERY)
.returns("TypeDefHeader[]");
static GET_TERM_TEMPLATE_DEF_BY_GUID: OperationDescriptor = OperationDescriptor::new(
    "getTermTemplateDefByGuid",
    Types,
    Get,
    "/api/types/termtemplatedef/guid/{guid}",
)
.query(API_VERSION_ONLY)
.returns("TermTemplateDef");
static GET_TERM_TEMPLATE_DEF_BY_NAME: OperationDescriptor = OperationDescriptor::new(
    "getTermTemplateDefByName",
    Types,
    Get,
    "/api/types/termtemplatedef/name/{name}",
)
.query(API_VERSION_ONLY)
.returns("TermTemplateDef");

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// Every REST operation the catalog exposes.
///
/// The enum is closed, so an unknown operation cannot be named from Rust.
/// String lookups (CLI, config files) go through [`FromStr`], which fails
/// with [`Error::UnknownOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Query,
    Suggest,
    Browse,
    AutoComplete,
    GetLineageGraph,
    NextPageLineage,
    CreateRelationship,
    UpdateRelationship,
    GetRelationship,
    DeleteRelationship,
    GetClassificationDefByGuid,
    GetClassificationDefByName,
    GetEntityDefinitionByGuid,
    GetEntityDefinitionByName,
    GetEnumDefByGuid,
    GetEnumDefByName,
    GetRelationshipDefByGuid,
    GetRelationshipDefByName,
    GetStructDefByGuid,
    GetStructDefByName,
    GetTypeDefinitionByGuid,
    GetTypeDefinitionByName,
    DeleteTypeByName,
    GetAllTypeDefinitions,
    CreateTypeDefinitions,
    UpdateAtlasTypeDefinitions,
    DeleteTypeDefinitions,
    ListTypeDefinitionHeaders,
    GetTermTemplateDefByGuid,
    GetTermTemplateDefByName,
}

impl Operation {
    /// All operations, in table order.
    pub const ALL: [Operation; 30] = [
        Operation::Query,
        Operation::Suggest,
        Operation::Browse,
        Operation::AutoComplete,
        Operation::GetLineageGraph,
        Operation::NextPageLineage,
        Operation::CreateRelationship,
        Operation::UpdateRelationship,
        Operation::GetRelationship,
        Operation::DeleteRelationship,
        Operation::GetClassificationDefByGuid,
        Operation::GetClassificationDefByName,
        Operation::GetEntityDefinitionByGuid,
        Operation::GetEntityDefinitionByName,
        Operation::GetEnumDefByGuid,
        Operation::GetEnumDefByName,
        Operation::GetRelationshipDefByGuid,
        Operation::GetRelationshipDefByName,
        Operation::GetStructDefByGuid,
        Operation::GetStructDefByName,
        Operation::GetTypeDefinitionByGuid,
        Operation::GetTypeDefinitionByName,
        Operation::DeleteTypeByName,
        Operation::GetAllTypeDefinitions,
        Operation::CreateTypeDefinitions,
        Operation::UpdateAtlasTypeDefinitions,
        Operation::DeleteTypeDefinitions,
        Operation::ListTypeDefinitionHeaders,
        Operation::GetTermTemplateDefByGuid,
        Operation::GetTermTemplateDefByName,
    ];

    /// The static descriptor for this operation.
    pub fn descriptor(self) -> &'static OperationDescriptor {
        match self {
            Operation::Query => &QUERY,
            Operation::Suggest => &SUGGEST,
            Operation::Browse => &BROWSE,
            Operation::AutoComplete => &AUTO_COMPLETE,
            Operation::GetLineageGraph => &GET_LINEAGE_GRAPH,
            Operation::NextPageLineage => &NEXT_PAGE_LINEAGE,
            Operation::CreateRelationship => &CREATE_RELATIONSHIP,
            Operation::UpdateRelationship => &UPDATE_RELATIONSHIP,
            Operation::GetRelationship => &GET_RELATIONSHIP,
            Operation::DeleteRelationship => &DELETE_RELATIONSHIP,
            Operation::GetClassificationDefByGuid => &GET_CLASSIFICATION_DEF_BY_GUID,
            Operation::GetClassificationDefByName => &GET_CLASSIFICATION_DEF_BY_NAME,
            Operation::GetEntityDefinitionByGuid => &GET_ENTITY_DEFINITION_BY_GUID,
            Operation::GetEntityDefinitionByName => &GET_ENTITY_DEFINITION_BY_NAME,
            Operation::GetEnumDefByGuid => &GET_ENUM_DEF_BY_GUID,
            Operation::GetEnumDefByName => &GET_ENUM_DEF_BY_NAME,
            Operation::GetRelationshipDefByGuid => &GET_RELATIONSHIP_DEF_BY_GUID,
            Operation::GetRelationshipDefByName => &GET_RELATIONSHIP_DEF_BY_NAME,
            Operation::GetStructDefByGuid => &GET_STRUCT_DEF_BY_GUID,
            Operation::GetStructDefByName => &GET_STRUCT_DEF_BY_NAME,
            Operation::GetTypeDefinitionByGuid => &GET_TYPE_DEFINITION_BY_GUID,
            Operation::GetTypeDefinitionByName => &GET_TYPE_DEFINITION_BY_NAME,
            Operation::DeleteTypeByName => &DELETE_TYPE_BY_NAME,
            Operation::GetAllTypeDefinitions => &GET_ALL_TYPE_DEFINITIONS,
            Operation::CreateTypeDefinitions => &CREATE_TYPE_DEFINITIONS,
            Operation::UpdateAtlasTypeDefinitions => &UPDATE_ATLAS_TYPE_DEFINITIONS,
            Operation::DeleteTypeDefinitions => &DELETE_TYPE_DEFINITIONS,
            Operation::ListTypeDefinitionHeaders => &LIST_TYPE_DEFINITION_HEADERS,
            Operation::GetTermTemplateDefByGuid => &GET_TERM_TEMPLATE_DEF_BY_GUID,
            Operation::GetTermTemplateDefByName => &GET_TERM_TEMPLATE_DEF_BY_NAME,
        }
    }

    /// Wire name, e.g. `"getLineageGraph"`.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses an [`Operation`] from its wire name (case-sensitive).
impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::descriptor::{BodyKind, ResponseKind};

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn every_name_parses_back() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "getEverything".parse::<Operation>().unwrap_err();
        assert!(matches!(err, Error::UnknownOperation(ref n) if n == "getEverything"));
    }

    #[test]
    fn method_and_path_pairs_are_unique() {
        let pairs: HashSet<(Method, &str)> = Operation::ALL
            .iter()
            .map(|op| (op.descriptor().method, op.descriptor().path))
            .collect();
        assert_eq!(pairs.len(), Operation::ALL.len());
    }

    #[test]
    fn lineage_direction_is_required() {
        for op in [Operation::GetLineageGraph, Operation::NextPageLineage] {
            let p = op.descriptor().query_param("direction").unwrap();
            assert!(p.required, "{op} must require direction");
        }
    }

    #[test]
    fn discovery_operations_post_json_with_api_version() {
        for op in Operation::ALL
            .iter()
            .filter(|op| op.descriptor().group == Group::Discovery)
        {
            let d = op.descriptor();
            assert_eq!(d.method, Method::Post);
            assert!(matches!(d.body, BodyKind::Json(_)));
            assert!(d.takes_api_version());
        }
    }

    #[test]
    fn deletes_return_no_content() {
        for op in [
            Operation::DeleteRelationship,
            Operation::DeleteTypeByName,
            Operation::DeleteTypeDefinitions,
        ] {
            assert_eq!(op.descriptor().response, ResponseKind::NoContent);
        }
    }

    #[test]
    fn typedef_paths_match_service() {
        assert_eq!(
            Operation::GetTypeDefinitionByGuid.descriptor().path,
            "/api/atlas/v2/types/typedef/guid/{guid}"
        );
        assert_eq!(
            Operation::GetLineageGraph.descriptor().path,
            "/api/atlas/v2/lineage/{guid}"
        );
        assert_eq!(
            Operation::Query.descriptor().path,
            "/api/atlas/v2/search/advanced"
        );
    }
}
