//! Editor session orchestration
//!
//! [`SchemaSession`] owns the working field tree and coordinates the
//! pieces around it: path-addressed edits, the undo history, persistence,
//! and prompt-driven generation. Every accepted mutation bumps a
//! monotonically increasing revision; generation results are applied only
//! if the tree has not moved on since the request was issued.

use log::{info, warn};

use crate::error::SchemafoldResult;
use crate::generation::GenerationService;
use crate::schema::history::SchemaHistory;
use crate::schema::operations::{
    add_field, add_nested_field, delete_field, update_field, with_siblings_at, FieldPatch,
};
use crate::schema::templates::SchemaTemplate;
use crate::schema::types::{Field, SavedSchema, SchemaError};
use crate::store::SchemaStore;

/// A live editing session over one field tree.
#[derive(Debug, Default)]
pub struct SchemaSession {
    fields: Vec<Field>,
    history: SchemaHistory,
    revision: u64,
}

impl SchemaSession {
    /// Starts an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from an existing tree, without a history entry.
    pub fn with_fields(fields: Vec<Field>) -> Self {
        Self {
            fields,
            history: SchemaHistory::new(),
            revision: 0,
        }
    }

    /// The current working tree.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The current revision. Bumped once per accepted mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &SchemaHistory {
        &self.history
    }

    fn commit(&mut self, action: &str, fields: Vec<Field>) {
        self.fields = fields;
        self.history.record(action, &self.fields);
        self.revision += 1;
    }

    /// Appends a default field to the sibling sequence at `path`
    /// (empty path = root level).
    pub fn add_field(&mut self, path: &[usize]) -> Result<(), SchemaError> {
        let updated = with_siblings_at(&self.fields, path, |siblings| Ok(add_field(siblings)))?;
        self.commit("Field added", updated);
        Ok(())
    }

    /// Patches the field at `path`/`index`.
    pub fn update_field(
        &mut self,
        path: &[usize],
        index: usize,
        patch: FieldPatch,
    ) -> Result<(), SchemaError> {
        let updated =
            with_siblings_at(&self.fields, path, |siblings| {
                update_field(siblings, index, patch)
            })?;
        self.commit("Field updated", updated);
        Ok(())
    }

    /// Deletes the field at `path`/`index` with its subtree.
    pub fn delete_field(&mut self, path: &[usize], index: usize) -> Result<(), SchemaError> {
        let updated =
            with_siblings_at(&self.fields, path, |siblings| delete_field(siblings, index))?;
        self.commit("Field deleted", updated);
        Ok(())
    }

    /// Appends a default child under the container at `path`/`index`.
    pub fn add_nested_field(&mut self, path: &[usize], index: usize) -> Result<(), SchemaError> {
        let updated = with_siblings_at(&self.fields, path, |siblings| {
            add_nested_field(siblings, index)
        })?;
        self.commit("Nested field added", updated);
        Ok(())
    }

    /// Replaces the entire tree, recording the given action.
    pub fn replace_fields(&mut self, fields: Vec<Field>, action: &str) {
        self.commit(action, fields);
    }

    /// Loads a template's tree into the session.
    pub fn load_template(&mut self, template: &SchemaTemplate) {
        info!("Loading template '{}'", template.name);
        self.commit("Template loaded", template.fields.clone());
    }

    /// Restores the history snapshot at `index` (0 = newest) as a new
    /// edit on top of the history.
    pub fn restore_history(&mut self, index: usize) -> Result<(), SchemaError> {
        let fields = self.history.restore(index).ok_or_else(|| {
            SchemaError::NotFound(format!("No history entry at index {}", index))
        })?;
        self.commit("History restored", fields);
        Ok(())
    }

    /// Applies a generated tree, unless the session has been edited since
    /// `base_revision` was observed.
    pub fn apply_generated(
        &mut self,
        fields: Vec<Field>,
        base_revision: u64,
    ) -> Result<(), SchemaError> {
        if base_revision != self.revision {
            warn!(
                "Discarding generated schema: revision {} is stale (current {})",
                base_revision, self.revision
            );
            return Err(SchemaError::InvalidData(
                "Schema changed while generation was in flight".to_string(),
            ));
        }
        self.commit("Schema generated", fields);
        Ok(())
    }

    /// Generates a tree from a prompt and applies it, guarding against
    /// edits made while the request was in flight.
    pub async fn generate(
        &mut self,
        service: &GenerationService,
        prompt: &str,
    ) -> SchemafoldResult<()> {
        let base_revision = self.revision;
        let fields = service.generate_fields(prompt).await?;
        self.apply_generated(fields, base_revision)?;
        Ok(())
    }

    /// Persists the current tree under a name.
    pub fn save(
        &self,
        store: &SchemaStore,
        owner: &str,
        name: &str,
    ) -> Result<SavedSchema, SchemaError> {
        store.save_schema(owner, name, &self.fields)
    }

    /// Loads a saved schema into the session.
    pub fn load(&mut self, store: &SchemaStore, id: &str) -> Result<(), SchemaError> {
        let saved = store
            .get_schema(id)?
            .ok_or_else(|| SchemaError::NotFound(format!("Schema {} not found", id)))?;
        self.commit("Schema loaded", saved.schema);
        Ok(())
    }
}
