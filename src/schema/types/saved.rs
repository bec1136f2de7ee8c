use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::field::generate_id;

/// A named, persisted snapshot of a field tree, owned by one identity.
///
/// The store treats the tree as an opaque unit: loading replaces the whole
/// working tree and saving writes the whole working tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSchema {
    pub id: String,
    pub name: String,
    /// Identity of the owner, passed explicitly into every store call.
    pub owner: String,
    pub schema: Vec<Field>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedSchema {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, schema: Vec<Field>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: name.into(),
            owner: owner.into(),
            schema,
            created_at: now,
            updated_at: now,
        }
    }
}
