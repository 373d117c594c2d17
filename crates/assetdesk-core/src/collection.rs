// ── Ordered per-view record storage ──
//
// Each screen keeps the collection it fetched in one of these and patches
// it after a successful mutation instead of refetching: new ids append,
// known ids are replaced in place, deletes are removed by id.

use indexmap::IndexMap;

use crate::model::Record;

/// Insertion-ordered, id-keyed collection of records.
#[derive(Debug, Clone)]
pub struct RecordSet<T: Record> {
    by_id: IndexMap<String, T>,
}

impl<T: Record> Default for RecordSet<T> {
    fn default() -> Self {
        Self {
            by_id: IndexMap::new(),
        }
    }
}

impl<T: Record> RecordSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new record or replace the one with the same id.
    /// Returns `true` if the id was new.
    pub fn upsert(&mut self, record: T) -> bool {
        let id = record.id().to_owned();
        self.by_id.insert(id, record).is_none()
    }

    /// Remove a record, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.by_id.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id)
    }

    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.by_id.get_index(index).map(|(_, record)| record)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Owned snapshot in display order.
    pub fn to_vec(&self) -> Vec<T> {
        self.by_id.values().cloned().collect()
    }
}

impl<T: Record> FromIterator<T> for RecordSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.upsert(record);
        }
        set
    }
}

impl<T: Record> From<Vec<T>> for RecordSet<T> {
    fn from(records: Vec<T>) -> Self {
        records.into_iter().collect()
    }
}
