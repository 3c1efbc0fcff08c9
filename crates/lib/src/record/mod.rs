//! Dynamic, attribute-style records.
//!
//! This module provides [`Record`], a string-keyed container whose nested
//! map-shaped values are always records themselves and whose sequences are
//! coerced element by element. On top of plain `get`/`set`/`has` it supports
//! default resolution, forced initialization of nested levels, recursive
//! merging and an explicit attribute-style dispatch table.
//!
//! # Usage
//!
//! ```
//! use dynrecord::record::{Record, Reply};
//! use serde_json::json;
//!
//! let mut record = Record::from_raw(json!({ "user": { "name": "Alice" } }))?;
//! record.set("age", 30);
//!
//! assert!(record.get("user").unwrap().is_record());
//! assert_eq!(record.get_as::<i64>("age"), Some(30));
//!
//! // Attribute-style access
//! record.dispatch("city=", Some("Paris".into()))?;
//! assert!(matches!(record.dispatch("city?", None)?, Reply::Present(true)));
//!
//! // Recursive merge
//! let merged = record.deep_merge(json!({ "user": { "role": "admin" } }))?;
//! assert_eq!(
//!     merged.describe(),
//!     r#"<Record age=30 city="Paris" user=<Record name="Alice" role="admin">>"#
//! );
//! # Ok::<(), dynrecord::Error>(())
//! ```

use std::{
    collections::{HashMap, hash_map},
    fmt,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub mod dispatch;
pub mod errors;
pub mod export;
pub mod key;
mod merge;
pub mod raw;
pub mod value;

pub use dispatch::{Accessor, Reply};
pub use errors::RecordError;
pub use export::RecordMap;
pub use key::{Key, normalize_key};
pub use raw::{Duplication, Raw, Shape, coerce_value};
pub use value::Value;

/// Per-key default rule
pub type DefaultFn = dyn Fn(&str) -> Value + Send + Sync;

/// What a record answers for keys it does not hold.
///
/// Configured once per record; nested records created by coercion or
/// [`Record::force_key`] start with [`Fallback::None`].
#[derive(Clone, Default)]
pub enum Fallback {
    /// No default; missing keys resolve to nothing
    #[default]
    None,
    /// A fixed default value
    Fixed(Value),
    /// A default computed from the requested key
    Computed(Arc<DefaultFn>),
}

impl Fallback {
    /// Resolves the default for a specific key
    pub fn for_key(&self, key: &str) -> Option<Value> {
        match self {
            Fallback::None => None,
            Fallback::Fixed(value) => Some(value.clone()),
            Fallback::Computed(rule) => Some(rule(key)),
        }
    }

    /// Resolves the default when no key is given.
    ///
    /// A computed rule needs a key, so only a fixed default answers here.
    pub fn without_key(&self) -> Option<Value> {
        match self {
            Fallback::Fixed(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Returns true if no default is configured
    pub fn is_none(&self) -> bool {
        matches!(self, Fallback::None)
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::None => write!(f, "None"),
            Fallback::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Fallback::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// A mapping from normalized string keys to coerced values.
///
/// # Core Operations
///
/// - **Access**: [`get`](Record::get), [`has`](Record::has), [`fetch`](Record::fetch)
/// - **Writes**: [`set`](Record::set), [`force_key`](Record::force_key), [`update`](Record::update)
/// - **Merging**: [`deep_merge`](Record::deep_merge), [`deep_merge_in_place`](Record::deep_merge_in_place)
/// - **Attribute-style access**: [`dispatch`](Record::dispatch)
/// - **Export**: [`to_record_map`](Record::to_record_map), [`describe`](Record::describe)
///
/// Equality compares stored entries only; the configured [`Fallback`] is not
/// part of a record's identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    /// Stored values indexed by normalized keys
    entries: HashMap<String, Value>,
    /// Answer for missing keys
    #[serde(skip)]
    fallback: Fallback,
}

impl Record {
    /// Creates a new empty record without a default
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record with a fixed default
    pub fn with_default(default: impl Into<Raw>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: Fallback::Fixed(coerce_value(default, Duplication::Detach)),
        }
    }

    /// Creates an empty record whose default is computed per key
    pub fn with_default_fn<F>(rule: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        Self {
            entries: HashMap::new(),
            fallback: Fallback::Computed(Arc::new(rule)),
        }
    }

    /// Builds a record from raw nested data, converting every level.
    ///
    /// Fails with [`RecordError::InvalidSourceData`] unless `source` is
    /// map-shaped. No partially built record is ever returned.
    pub fn from_raw(source: impl Into<Raw>) -> crate::Result<Self> {
        let source = source.into();
        let shape = source.shape();
        match source.into_pairs() {
            Some(pairs) => Ok(Self::from_pairs(pairs, Duplication::Share)),
            None => {
                debug!(%shape, "rejecting non-map source data");
                Err(RecordError::InvalidSourceData {
                    reason: format!("expected map-shaped data, found {shape} data"),
                }
                .into())
            }
        }
    }

    /// Builds a record from a parsed JSON document
    pub fn from_json_value(source: serde_json::Value) -> crate::Result<Self> {
        Self::from_raw(source)
    }

    /// Parses a JSON document and builds a record from it.
    ///
    /// Malformed JSON and non-object documents are both reported as
    /// [`RecordError::InvalidSourceData`].
    pub fn from_json_str(source: &str) -> crate::Result<Self> {
        let parsed: serde_json::Value =
            serde_json::from_str(source).map_err(|e| RecordError::InvalidSourceData {
                reason: format!("malformed JSON: {e}"),
            })?;
        Self::from_json_value(parsed)
    }

    pub(crate) fn from_pairs(
        pairs: impl IntoIterator<Item = (String, Raw)>,
        duplication: Duplication,
    ) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| (key, coerce_value(value, duplication)))
            .collect();
        Self {
            entries,
            fallback: Fallback::None,
        }
    }

    pub(crate) fn into_raw_pairs(self) -> Vec<(String, Raw)> {
        self.entries
            .into_iter()
            .map(|(key, value)| (key, Raw::Value(value)))
            .collect()
    }

    /// Returns the configured default
    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    /// Replaces the default with a fixed value
    pub fn set_default(&mut self, default: impl Into<Raw>) -> &mut Self {
        self.fallback = Fallback::Fixed(coerce_value(default, Duplication::Detach));
        self
    }

    /// Replaces the default with a per-key rule
    pub fn set_default_fn<F>(&mut self, rule: F) -> &mut Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.fallback = Fallback::Computed(Arc::new(rule));
        self
    }

    /// Removes any configured default
    pub fn clear_default(&mut self) -> &mut Self {
        self.fallback = Fallback::None;
        self
    }

    /// Returns the number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets the stored value for a key.
    ///
    /// Never consults the default; see [`Record::resolve_default`].
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(key.into().as_str())
    }

    /// Gets a mutable reference to the stored value for a key
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.entries.get_mut(key.into().as_str())
    }

    /// Gets a value with automatic type conversion using TryFrom.
    ///
    /// Returns `None` if the key is missing or the conversion fails.
    ///
    /// ```
    /// # use dynrecord::record::Record;
    /// let record = Record::new().with("name", "Alice").with("age", 30);
    ///
    /// assert_eq!(record.get_as::<&str>("name"), Some("Alice"));
    /// assert_eq!(record.get_as::<i64>("age"), Some(30));
    /// assert_eq!(record.get_as::<i64>("name"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: impl Into<Key>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = RecordError>,
    {
        T::try_from(self.get(key)?).ok()
    }

    /// Gets a value or fails with [`RecordError::KeyNotFound`]
    pub fn fetch(&self, key: impl Into<Key>) -> crate::Result<&Value> {
        let key = key.into();
        self.entries.get(key.as_str()).ok_or_else(|| {
            RecordError::KeyNotFound {
                key: key.into_string(),
            }
            .into()
        })
    }

    /// Gets a nested record by key
    pub fn get_record(&self, key: impl Into<Key>) -> Option<&Record> {
        self.get(key)?.as_record()
    }

    /// Stores a value, coercing nested map/sequence data on the way in.
    ///
    /// Returns the previous value if there was one.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Raw>) -> Option<Value> {
        let value = coerce_value(value, Duplication::Share);
        self.entries.insert(normalize_key(key), value)
    }

    /// Stores an already coerced value and returns a reference to it
    pub(crate) fn store(&mut self, key: String, value: Value) -> &mut Value {
        match self.entries.entry(key) {
            hash_map::Entry::Occupied(mut slot) => {
                slot.insert(value);
                slot.into_mut()
            }
            hash_map::Entry::Vacant(slot) => slot.insert(value),
        }
    }

    /// Returns true if the normalized key is stored
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(key.into().as_str())
    }

    /// Resolves the default for a key.
    ///
    /// For a symbolic key that is already stored, the default is that key's
    /// own current value. Any other key resolves through the configured
    /// [`Fallback`]; without a key only a fixed default answers.
    ///
    /// ```
    /// # use dynrecord::record::{Key, Record, Value};
    /// let mut record = Record::with_default("unset");
    /// record.set("name", "Alice");
    ///
    /// assert_eq!(record.resolve_default(Some(Key::symbol("name"))), Some(Value::from("Alice")));
    /// assert_eq!(record.resolve_default(Some("name".into())), Some(Value::from("unset")));
    /// assert_eq!(record.resolve_default(Some(Key::symbol("age"))), Some(Value::from("unset")));
    /// assert_eq!(record.resolve_default(None), Some(Value::from("unset")));
    /// ```
    pub fn resolve_default(&self, key: Option<Key>) -> Option<Value> {
        match key {
            Some(key) => {
                let symbolic = key.is_symbol();
                let key = key.into_string();
                match self.entries.get(&key) {
                    Some(value) if symbolic => Some(value.clone()),
                    _ => self.fallback.for_key(&key),
                }
            }
            None => self.fallback.without_key(),
        }
    }

    /// Materializes a nested level.
    ///
    /// If the key is absent it is set to a new empty record; either way the
    /// stored value is returned. Calling it again never resets the value.
    pub fn force_key(&mut self, key: impl Into<Key>) -> &mut Value {
        let key = normalize_key(key);
        self.entries.entry(key).or_insert_with_key(|key| {
            trace!(key = %key, "forcing empty nested record");
            Value::Record(Arc::new(Record::new()))
        })
    }

    /// Like [`Record::force_key`], but only yields the value if it is a record
    pub fn force_record(&mut self, key: impl Into<Key>) -> Option<&mut Record> {
        self.force_key(key).as_record_mut()
    }

    /// Removes a key, returning its value
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.remove(key.into().as_str())
    }

    /// Removes every stored key; the default is kept
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the whole content with `source`, keeping the default
    pub fn replace(&mut self, source: impl Into<Raw>) -> crate::Result<&mut Self> {
        let replacement = Record::from_raw(source)?;
        self.entries = replacement.entries;
        Ok(self)
    }

    /// Returns the stored `"id"` value.
    ///
    /// Records carry no identity of their own, so an unset `"id"` is simply
    /// `None` here; attribute-style reads of `id` fall back to the default.
    pub fn id(&self) -> Option<&Value> {
        self.entries.get("id")
    }

    /// Returns an iterator over all key-value pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over all key-value pairs
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.entries.iter_mut()
    }

    /// Returns an iterator over all keys in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns all keys in sorted order
    pub fn sorted_keys(&self) -> Vec<&String> {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        keys
    }

    /// Returns an iterator over all values
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Shallow duplicate.
    ///
    /// The top level is independent; nested records are the same
    /// reference-counted instances as in `self` until either side writes to
    /// them, at which point the writer gets its own copy.
    pub fn dup(&self) -> Record {
        self.clone()
    }

    /// Strict deep copy: no nested record is shared with `self`
    pub fn deep_dup(&self) -> Record {
        Record {
            entries: self
                .entries
                .iter()
                .map(|(key, value)| (key.clone(), value.detached()))
                .collect(),
            fallback: self.fallback.clone(),
        }
    }

    /// Returns true if both records hold the very same nested record at `key`
    pub fn shares_storage_with(&self, other: &Record, key: impl Into<Key>) -> bool {
        let key = key.into();
        match (self.entries.get(key.as_str()), other.entries.get(key.as_str())) {
            (Some(Value::Record(a)), Some(Value::Record(b))) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Deterministic rendering: `<Record k1=v1 k2=v2>` with keys sorted.
    pub fn describe(&self) -> String {
        let mut out = String::from("<Record");
        for key in self.sorted_keys() {
            out.push(' ');
            out.push_str(key);
            out.push('=');
            out.push_str(&self.entries[key].inspect());
        }
        out.push('>');
        out
    }

    /// Deep export to a plain `serde_json::Value`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Serializes the entries as a JSON string
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// Builder pattern methods
impl Record {
    /// Builder method to set a value and return self
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Raw>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder method to set a fixed default and return self
    pub fn with_fallback(mut self, default: impl Into<Raw>) -> Self {
        self.set_default(default);
        self
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<Key>,
    V: Into<Raw>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        record.extend(iter);
        record
    }
}

impl<K, V> Extend<(K, V)> for Record
where
    K: Into<Key>,
    V: Into<Raw>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = crate::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Record::from_json_value(value)
    }
}
