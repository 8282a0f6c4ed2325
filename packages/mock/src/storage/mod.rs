//! Storage abstraction for the mock catalog.
//!
//! The [`Storage`] trait is the contract between the HTTP handlers and the
//! data. Documents (entities, relationships, type definitions) are kept as
//! [`serde_json::Value`]s exactly as the client sent them, plus the fields
//! the service assigns (`guid`, and `category` when absent). Search, lineage
//! traversal, and filtering live in the handlers; storage only stores.

pub mod memory;

use async_trait::async_trait;
use datacatalog_api::TypeCategory;
use serde_json::Value;

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors that storage operations can return.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The named item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An item with the same key already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The document is missing a field storage needs to key it.
    #[error("invalid document: {0}")]
    Invalid(String),

    #[error("internal storage error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A data-flow edge between two entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageEdge {
    pub from: String,
    pub to: String,
    pub relationship_id: String,
}

/// A type definition and the category it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTypeDef {
    pub category: TypeCategory,
    pub def: Value,
}

impl StoredTypeDef {
    pub fn name(&self) -> &str {
        self.def.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn guid(&self) -> &str {
        self.def.get("guid").and_then(Value::as_str).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Storage trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Storage: Send + Sync {
    // --- Entities ------------------------------------------------------------

    /// Store an entity header, assigning a GUID when it has none. Returns the
    /// GUID.
    async fn put_entity(&self, entity: Value) -> Result<String, StorageError>;

    async fn get_entity(&self, guid: &str) -> Result<Option<Value>, StorageError>;

    /// All entities in GUID order.
    async fn list_entities(&self) -> Result<Vec<Value>, StorageError>;

    // --- Lineage -------------------------------------------------------------

    /// Record that data flows from `from` to `to`. Returns the relationship GUID.
    async fn add_lineage_edge(&self, from: &str, to: &str) -> Result<String, StorageError>;

    async fn lineage_edges(&self) -> Result<Vec<LineageEdge>, StorageError>;

    // --- Relationships -------------------------------------------------------

    /// Store a new relationship, assigning a GUID when absent.
    /// [`StorageError::Conflict`] if the GUID is taken.
    async fn create_relationship(&self, relationship: Value) -> Result<Value, StorageError>;

    /// Replace an existing relationship wholesale.
    /// [`StorageError::NotFound`] if its GUID is unknown.
    async fn replace_relationship(&self, relationship: Value) -> Result<Value, StorageError>;

    async fn get_relationship(&self, guid: &str) -> Result<Option<Value>, StorageError>;

    async fn delete_relationship(&self, guid: &str) -> Result<(), StorageError>;

    // --- Type definitions ----------------------------------------------------

    /// All definitions in name order.
    async fn list_typedefs(&self) -> Result<Vec<StoredTypeDef>, StorageError>;

    async fn get_typedef_by_name(&self, name: &str) -> Result<Option<StoredTypeDef>, StorageError>;

    async fn get_typedef_by_guid(&self, guid: &str) -> Result<Option<StoredTypeDef>, StorageError>;

    /// Store `def` only if no definition has its name. Returns `None` (and
    /// changes nothing) when the name is taken.
    async fn create_typedef(
        &self,
        category: TypeCategory,
        def: Value,
    ) -> Result<Option<StoredTypeDef>, StorageError>;

    /// Store `def`, replacing any definition with the same name. The stored
    /// GUID is kept when the update omits it or sends an empty one. Replacing
    /// a definition of another category is [`StorageError::Invalid`].
    async fn upsert_typedef(
        &self,
        category: TypeCategory,
        def: Value,
    ) -> Result<StoredTypeDef, StorageError>;

    /// Delete every named definition, or none of them if any is missing.
    async fn delete_typedefs(&self, names: &[String]) -> Result<(), StorageError>;
}
