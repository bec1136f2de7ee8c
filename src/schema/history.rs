//! Bounded undo history for field trees
//!
//! Snapshots are full deep copies, newest first, capped at
//! [`HISTORY_CAPACITY`] entries. Restoring returns a clone and leaves the
//! history untouched, so a restore can itself be recorded as a new entry.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::types::{count_fields, generate_id, Field, FieldKind};

pub const HISTORY_CAPACITY: usize = 20;

/// One recorded snapshot of the tree.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub fields: Vec<Field>,
}

/// Recursive counts over a snapshot, for display alongside entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSummary {
    pub total: usize,
    pub strings: usize,
    pub numbers: usize,
    pub nested: usize,
}

impl HistoryEntry {
    pub fn summary(&self) -> FieldSummary {
        let mut summary = FieldSummary {
            total: count_fields(&self.fields),
            strings: 0,
            numbers: 0,
            nested: 0,
        };
        tally(&self.fields, &mut summary);
        summary
    }
}

fn tally(fields: &[Field], summary: &mut FieldSummary) {
    for field in fields {
        match field.kind {
            FieldKind::String => summary.strings += 1,
            FieldKind::Number => summary.numbers += 1,
            FieldKind::Nested | FieldKind::Object => summary.nested += 1,
            _ => {}
        }
        tally(field.child_fields(), summary);
    }
}

/// The bounded snapshot buffer. Index 0 is always the newest entry.
#[derive(Debug, Clone, Default)]
pub struct SchemaHistory {
    entries: VecDeque<HistoryEntry>,
}

impl SchemaHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot, evicting the oldest entry once full.
    pub fn record(&mut self, action: impl Into<String>, fields: &[Field]) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_back();
        }
        self.entries.push_front(HistoryEntry {
            id: generate_id(),
            timestamp: Utc::now(),
            action: action.into(),
            fields: fields.to_vec(),
        });
    }

    /// Entries newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns a copy of the snapshot at `index` (0 = newest), if any.
    pub fn restore(&self, index: usize) -> Option<Vec<Field>> {
        self.entries.get(index).map(|entry| entry.fields.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_ordering() {
        let mut history = SchemaHistory::new();
        history.record("first", &[Field::string("a", "1")]);
        history.record("second", &[Field::string("b", "2")]);
        let actions: Vec<_> = history.entries().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["second", "first"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = SchemaHistory::new();
        for i in 0..HISTORY_CAPACITY + 5 {
            history.record(format!("edit {}", i), &[]);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        let newest = history.entries().next().unwrap();
        assert_eq!(newest.action, format!("edit {}", HISTORY_CAPACITY + 4));
        let oldest = history.entries().last().unwrap();
        assert_eq!(oldest.action, "edit 5");
    }

    #[test]
    fn test_restore_is_a_deep_copy() {
        let mut history = SchemaHistory::new();
        history.record("snapshot", &[Field::string("title", "Hello")]);
        let mut restored = history.restore(0).unwrap();
        restored[0].name = "changed".to_string();
        assert_eq!(history.restore(0).unwrap()[0].name, "title");
    }

    #[test]
    fn test_restore_out_of_range_is_none() {
        let history = SchemaHistory::new();
        assert!(history.restore(0).is_none());
    }

    #[test]
    fn test_summary_counts_recursively() {
        let fields = vec![
            Field::string("title", "Hello"),
            Field::nested(
                "author",
                vec![Field::string("name", "Ada"), Field::number("age", 36.0)],
            ),
        ];
        let mut history = SchemaHistory::new();
        history.record("snapshot", &fields);
        let summary = history.entries().next().unwrap().summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.strings, 2);
        assert_eq!(summary.numbers, 1);
        assert_eq!(summary.nested, 1);
    }
}
