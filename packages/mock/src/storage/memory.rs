//! In-memory storage implementation.
//!
//! All data is held in RAM behind a [`RwLock`] and is lost when the process
//! exits. GUIDs the service assigns are UUIDv7, so [`BTreeMap`] iteration
//! returns entities and relationships in creation order.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use datacatalog_api::TypeCategory;
use serde_json::Value;
use uuid::Uuid;

use super::{LineageEdge, Storage, StorageError, StoredTypeDef};

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Inner {
    entities: BTreeMap<String, Value>,
    edges: Vec<LineageEdge>,
    relationships: BTreeMap<String, Value>,
    /// Keyed by definition name, which is unique across categories.
    typedefs: BTreeMap<String, StoredTypeDef>,
}

/// The document's `guid`, unless it is missing, empty, or a negative
/// placeholder (`"-1"`).
fn usable_guid(doc: &Value) -> Option<&str> {
    doc.get("guid")
        .and_then(Value::as_str)
        .filter(|g| !g.is_empty() && !g.starts_with('-'))
}

/// Make sure `doc` is an object with a usable `guid`, assigning one if it has
/// none.
fn ensure_guid(doc: &mut Value) -> Result<String, StorageError> {
    if let Some(guid) = usable_guid(doc) {
        return Ok(guid.to_string());
    }
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| StorageError::Invalid("expected a JSON object".into()))?;
    let guid = Uuid::now_v7().to_string();
    obj.insert("guid".into(), Value::String(guid.clone()));
    Ok(guid)
}

fn typedef_name(def: &Value) -> Result<String, StorageError> {
    match def.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(StorageError::Invalid("type definition has no name".into())),
    }
}

fn ensure_category(def: &mut Value, category: TypeCategory) {
    if let Some(obj) = def.as_object_mut() {
        obj.entry("category")
            .or_insert_with(|| Value::String(category.as_str().into()));
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// Thread-safe, in-memory implementation of [`Storage`].
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking handler must not wedge the whole mock.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

#[async_trait]
impl Storage for MemoryStorage {
    // --- Entities ------------------------------------------------------------

    async fn put_entity(&self, mut entity: Value) -> Result<String, StorageError> {
        let guid = ensure_guid(&mut entity)?;
        self.write().entities.insert(guid.clone(), entity);
        Ok(guid)
    }

    async fn get_entity(&self, guid: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read().entities.get(guid).cloned())
    }

    async fn list_entities(&self) -> Result<Vec<Value>, StorageError> {
        Ok(self.read().entities.values().cloned().collect())
    }

    // --- Lineage -------------------------------------------------------------

    async fn add_lineage_edge(&self, from: &str, to: &str) -> Result<String, StorageError> {
        let mut inner = self.write();
        for guid in [from, to] {
            if !inner.entities.contains_key(guid) {
                return Err(StorageError::NotFound(guid.to_string()));
            }
        }
        let relationship_id = Uuid::now_v7().to_string();
        inner.edges.push(LineageEdge {
            from: from.to_string(),
            to: to.to_string(),
            relationship_id: relationship_id.clone(),
        });
        Ok(relationship_id)
    }

    async fn lineage_edges(&self) -> Result<Vec<LineageEdge>, StorageError> {
        Ok(self.read().edges.clone())
    }

    // --- Relationships -------------------------------------------------------

    async fn create_relationship(&self, mut relationship: Value) -> Result<Value, StorageError> {
        let guid = ensure_guid(&mut relationship)?;
        let mut inner = self.write();
        if inner.relationships.contains_key(&guid) {
            return Err(StorageError::Conflict(format!(
                "relationship {guid} already exists"
            )));
        }
        inner.relationships.insert(guid, relationship.clone());
        Ok(relationship)
    }

    async fn replace_relationship(&self, relationship: Value) -> Result<Value, StorageError> {
        let guid = relationship
            .get("guid")
            .and_then(Value::as_str)
            .filter(|g| !g.is_empty())
            .ok_or_else(|| StorageError::Invalid("relationship guid is required".into()))?
            .to_string();
        let mut inner = self.write();
        match inner.relationships.get_mut(&guid) {
            Some(slot) => {
                *slot = relationship.clone();
                Ok(relationship)
            }
            None => Err(StorageError::NotFound(guid)),
        }
    }

    async fn get_relationship(&self, guid: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read().relationships.get(guid).cloned())
    }

    async fn delete_relationship(&self, guid: &str) -> Result<(), StorageError> {
        match self.write().relationships.remove(guid) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(guid.to_string())),
        }
    }

    // --- Type definitions ----------------------------------------------------

    async fn list_typedefs(&self) -> Result<Vec<StoredTypeDef>, StorageError> {
        Ok(self.read().typedefs.values().cloned().collect())
    }

    async fn get_typedef_by_name(&self, name: &str) -> Result<Option<StoredTypeDef>, StorageError> {
        Ok(self.read().typedefs.get(name).cloned())
    }

    async fn get_typedef_by_guid(&self, guid: &str) -> Result<Option<StoredTypeDef>, StorageError> {
        Ok(self
            .read()
            .typedefs
            .values()
            .find(|d| d.guid() == guid)
            .cloned())
    }

    async fn create_typedef(
        &self,
        category: TypeCategory,
        mut def: Value,
    ) -> Result<Option<StoredTypeDef>, StorageError> {
        let name = typedef_name(&def)?;
        let mut inner = self.write();
        if inner.typedefs.contains_key(&name) {
            return Ok(None);
        }
        ensure_guid(&mut def)?;
        ensure_category(&mut def, category);
        let stored = StoredTypeDef { category, def };
        inner.typedefs.insert(name, stored.clone());
        Ok(Some(stored))
    }

    async fn upsert_typedef(
        &self,
        category: TypeCategory,
        mut def: Value,
    ) -> Result<StoredTypeDef, StorageError> {
        let name = typedef_name(&def)?;
        let mut inner = self.write();
        if let Some(existing) = inner.typedefs.get(&name) {
            if existing.category != category {
                return Err(StorageError::Invalid(format!(
                    "type definition {name} is {}, not {category}",
                    existing.category
                )));
            }
            if usable_guid(&def).is_none() {
                if let Some(obj) = def.as_object_mut() {
                    obj.insert("guid".into(), Value::String(existing.guid().to_string()));
                }
            }
        }
        ensure_guid(&mut def)?;
        ensure_category(&mut def, category);
        let stored = StoredTypeDef { category, def };
        inner.typedefs.insert(name, stored.clone());
        Ok(stored)
    }

    async fn delete_typedefs(&self, names: &[String]) -> Result<(), StorageError> {
        let mut inner = self.write();
        if let Some(missing) = names.iter().find(|n| !inner.typedefs.contains_key(*n)) {
            return Err(StorageError::NotFound(missing.clone()));
        }
        for name in names {
            inner.typedefs.remove(name);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_typedef_leaves_existing_untouched() {
        let store = MemoryStorage::new();
        store
            .create_typedef(TypeCategory::Enum, json!({"name": "Colors", "description": "v1"}))
            .await
            .unwrap()
            .unwrap();

        let again = store
            .create_typedef(TypeCategory::Enum, json!({"name": "Colors", "description": "v2"}))
            .await
            .unwrap();
        assert!(again.is_none());

        let stored = store.get_typedef_by_name("Colors").await.unwrap().unwrap();
        assert_eq!(stored.def["description"], "v1");
        assert_eq!(stored.def["category"], "ENUM");
    }

    #[tokio::test]
    async fn upsert_keeps_guid() {
        let store = MemoryStorage::new();
        let created = store
            .create_typedef(TypeCategory::Struct, json!({"name": "Address"}))
            .await
            .unwrap()
            .unwrap();
        let updated = store
            .upsert_typedef(TypeCategory::Struct, json!({"name": "Address", "description": "new"}))
            .await
            .unwrap();
        assert_eq!(created.guid(), updated.guid());
        assert_eq!(
            store.get_typedef_by_guid(created.guid()).await.unwrap().unwrap().def["description"],
            "new"
        );
    }

    #[tokio::test]
    async fn upsert_treats_empty_guid_as_missing() {
        let store = MemoryStorage::new();
        let created = store
            .create_typedef(TypeCategory::Enum, json!({"name": "Colors"}))
            .await
            .unwrap()
            .unwrap();
        let updated = store
            .upsert_typedef(TypeCategory::Enum, json!({"name": "Colors", "guid": ""}))
            .await
            .unwrap();
        assert_eq!(updated.guid(), created.guid());

        let fresh = store
            .upsert_typedef(TypeCategory::Enum, json!({"name": "Shapes", "guid": ""}))
            .await
            .unwrap();
        assert!(!fresh.guid().is_empty());
    }

    #[tokio::test]
    async fn upsert_rejects_category_change() {
        let store = MemoryStorage::new();
        store
            .create_typedef(TypeCategory::Enum, json!({"name": "Colors"}))
            .await
            .unwrap();
        let err = store
            .upsert_typedef(TypeCategory::Struct, json!({"name": "Colors"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Invalid(_)));

        let stored = store.get_typedef_by_name("Colors").await.unwrap().unwrap();
        assert_eq!(stored.category, TypeCategory::Enum);
    }

    #[tokio::test]
    async fn bulk_delete_is_all_or_nothing() {
        let store = MemoryStorage::new();
        store
            .create_typedef(TypeCategory::Entity, json!({"name": "a"}))
            .await
            .unwrap();
        let err = store
            .delete_typedefs(&["a".to_string(), "b".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(n) if n == "b"));
        assert!(store.get_typedef_by_name("a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn relationship_guids() {
        let store = MemoryStorage::new();
        let created = store
            .create_relationship(json!({"guid": "-1", "typeName": "t"}))
            .await
            .unwrap();
        let guid = created["guid"].as_str().unwrap().to_string();
        assert!(!guid.starts_with('-'));

        let dup = store.create_relationship(created.clone()).await.unwrap_err();
        assert!(matches!(dup, StorageError::Conflict(_)));

        let missing = store
            .replace_relationship(json!({"guid": "nope", "typeName": "t"}))
            .await
            .unwrap_err();
        assert!(matches!(missing, StorageError::NotFound(_)));

        store.delete_relationship(&guid).await.unwrap();
        assert!(store.get_relationship(&guid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lineage_edges_need_known_entities() {
        let store = MemoryStorage::new();
        let a = store.put_entity(json!({"typeName": "t"})).await.unwrap();
        assert!(store.add_lineage_edge(&a, "ghost").await.is_err());
        let b = store.put_entity(json!({"typeName": "t"})).await.unwrap();
        store.add_lineage_edge(&a, &b).await.unwrap();
        assert_eq!(store.lineage_edges().await.unwrap().len(), 1);
    }
}
