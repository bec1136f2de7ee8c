//! Persistence gateway for saved schemas
//!
//! A thin layer over a sled database. Saved schemas live in a dedicated
//! tree keyed by their id; every write is flushed before returning so a
//! successful save is durable.

use std::path::Path;

use log::info;
use serde::{de::DeserializeOwned, Serialize};

use crate::schema::types::{Field, SavedSchema, SchemaError};

const SAVED_SCHEMAS_TREE: &str = "saved_schemas";

/// Sled-backed store for named schema snapshots.
#[derive(Clone)]
pub struct SchemaStore {
    db: sled::Db,
    schemas_tree: sled::Tree,
}

impl SchemaStore {
    /// Opens (or creates) the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let db = sled::open(path)?;
        Self::new(db)
    }

    /// Wraps an already-open sled database.
    pub fn new(db: sled::Db) -> Result<Self, SchemaError> {
        let schemas_tree = db.open_tree(SAVED_SCHEMAS_TREE)?;
        Ok(Self { db, schemas_tree })
    }

    /// Generic store of a serializable item, flushed to disk.
    fn store_item<T: Serialize>(
        tree: &sled::Tree,
        key: &str,
        item: &T,
    ) -> Result<(), SchemaError> {
        let bytes = serde_json::to_vec(item)
            .map_err(|e| SchemaError::InvalidData(format!("Failed to serialize item: {}", e)))?;
        tree.insert(key.as_bytes(), bytes)?;
        tree.flush()?;
        Ok(())
    }

    /// Generic retrieval of a deserializable item.
    fn get_item<T: DeserializeOwned>(
        tree: &sled::Tree,
        key: &str,
    ) -> Result<Option<T>, SchemaError> {
        match tree.get(key.as_bytes())? {
            Some(bytes) => {
                let item = serde_json::from_slice(&bytes).map_err(|e| {
                    SchemaError::InvalidData(format!("Failed to deserialize item: {}", e))
                })?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Saves a field tree as a new named schema and returns the record.
    pub fn save_schema(
        &self,
        owner: &str,
        name: &str,
        fields: &[Field],
    ) -> Result<SavedSchema, SchemaError> {
        if name.trim().is_empty() {
            return Err(SchemaError::InvalidData(
                "Schema name cannot be empty".to_string(),
            ));
        }
        if owner.trim().is_empty() {
            return Err(SchemaError::InvalidData(
                "Schema owner cannot be empty".to_string(),
            ));
        }

        let saved = SavedSchema::new(owner, name, fields.to_vec());
        Self::store_item(&self.schemas_tree, &saved.id, &saved)?;
        info!("Saved schema '{}' ({}) for {}", saved.name, saved.id, owner);
        Ok(saved)
    }

    /// Overwrites an existing record, bumping its `updated_at`.
    pub fn update_schema(&self, schema: &mut SavedSchema) -> Result<(), SchemaError> {
        if Self::get_item::<SavedSchema>(&self.schemas_tree, &schema.id)?.is_none() {
            return Err(SchemaError::NotFound(format!(
                "Schema {} not found",
                schema.id
            )));
        }
        schema.updated_at = chrono::Utc::now();
        Self::store_item(&self.schemas_tree, &schema.id, schema)?;
        info!("Updated schema '{}' ({})", schema.name, schema.id);
        Ok(())
    }

    /// Lists an owner's schemas, newest first.
    pub fn list_schemas(&self, owner: &str) -> Result<Vec<SavedSchema>, SchemaError> {
        let mut schemas = Vec::new();
        for result in self.schemas_tree.iter() {
            let (_, bytes) = result?;
            let saved: SavedSchema = serde_json::from_slice(&bytes).map_err(|e| {
                SchemaError::InvalidData(format!("Failed to deserialize schema: {}", e))
            })?;
            if saved.owner == owner {
                schemas.push(saved);
            }
        }
        schemas.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(schemas)
    }

    /// Fetches one schema by id.
    pub fn get_schema(&self, id: &str) -> Result<Option<SavedSchema>, SchemaError> {
        Self::get_item(&self.schemas_tree, id)
    }

    /// Deletes a schema by id; returns whether anything was removed.
    pub fn delete_schema(&self, id: &str) -> Result<bool, SchemaError> {
        let removed = self.schemas_tree.remove(id.as_bytes())?.is_some();
        if removed {
            self.schemas_tree.flush()?;
            info!("Deleted schema {}", id);
        }
        Ok(removed)
    }

    /// Number of stored schemas across all owners.
    pub fn len(&self) -> usize {
        self.schemas_tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas_tree.is_empty()
    }

    /// Gets a reference to the underlying database
    pub fn db(&self) -> &sled::Db {
        &self.db
    }
}
