//! Shallow export of a record's entries.

use std::collections::HashMap;

use super::{Fallback, Record, Value};

/// A plain mapping of a record's entries together with its default.
///
/// Values are exported as stored: nested records stay records. Use
/// [`Record::to_json`] for a deep plain-data export.
#[derive(Debug, Clone, Default)]
pub struct RecordMap {
    /// Stored values by key
    pub entries: HashMap<String, Value>,
    /// The exporting record's default
    pub fallback: Fallback,
}

impl RecordMap {
    /// Gets the exported value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Gets the exported value, falling back to the default for missing keys
    pub fn get_or_default(&self, key: &str) -> Option<Value> {
        self.entries
            .get(key)
            .cloned()
            .or_else(|| self.fallback.for_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<RecordMap> for HashMap<String, Value> {
    fn from(map: RecordMap) -> Self {
        map.entries
    }
}

impl Record {
    /// Exports the top-level entries and the default
    pub fn to_record_map(&self) -> RecordMap {
        RecordMap {
            entries: self.entries.clone(),
            fallback: self.fallback.clone(),
        }
    }

    /// Consuming variant of [`Record::to_record_map`]
    pub fn into_record_map(self) -> RecordMap {
        RecordMap {
            entries: self.entries,
            fallback: self.fallback,
        }
    }
}
