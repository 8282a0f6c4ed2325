//! Typed models for the data catalog REST API.
//!
//! The SDK itself moves opaque [`datacatalog::Payload`]s. This crate is the
//! optional typed layer on top: request bodies that serialise to the
//! documented JSON, response shapes to deserialise into, and query helpers
//! that turn into [`datacatalog::RequestOptions`]. Every model keeps fields it
//! does not name in a flattened `extra` map, and anything the service may
//! leave out is an `Option`, so an empty list stays distinct from a missing
//! one and decoding then re-encoding reproduces the document.
//!
//! # Operations covered
//!
//! | Operation | Body | Query helper | Result |
//! |-----------|------|--------------|--------|
//! | `query` | [`SearchRequest`] | | [`SearchResult`] |
//! | `suggest` | [`SuggestRequest`] | | [`SuggestResult`] |
//! | `browse` | [`BrowseRequest`] | | [`BrowseResult`] |
//! | `autoComplete` | [`AutoCompleteRequest`] | | [`AutoCompleteResult`] |
//! | `getLineageGraph` | | [`LineageQuery`] | [`LineageGraph`] |
//! | `nextPageLineage` | | [`NextPageQuery`] | [`LineageGraph`] |
//! | `createRelationship` / `updateRelationship` | [`Relationship`] | | [`Relationship`] |
//! | `getRelationship` | | [`RelationshipQuery`] | [`RelationshipWithExtInfo`] |
//! | `get*Def*` | | | [`TypeDef`] |
//! | `getAllTypeDefinitions` / bulk create, update, delete | [`TypeDefs`] | [`TypesQuery`] | [`TypeDefs`] |
//! | `listTypeDefinitionHeaders` | | [`TypesQuery`] | `Vec<`[`TypeDefHeader`]`>` |

pub mod error;
pub mod lineage;
pub mod relationship;
pub mod search;
pub mod typedef;

pub use error::ErrorResponse;
pub use lineage::{
    LineageDirection, LineageGraph, LineageQuery, LineageRelation, NextPageQuery, ParentRelation,
};
pub use relationship::{ObjectId, Relationship, RelationshipQuery, RelationshipWithExtInfo};
pub use search::{
    AutoCompleteRequest, AutoCompleteResult, AutoCompleteResultValue, BrowseRequest, BrowseResult,
    BrowseResultValue, SearchFacetItem, SearchRequest, SearchResult, SearchResultValue,
    SuggestRequest, SuggestResult, SuggestResultValue,
};
pub use typedef::{
    AttributeDef, EnumElementDef, RelationshipEndDef, TypeCategory, TypeDef, TypeDefHeader,
    TypeDefs, TypesQuery,
};
