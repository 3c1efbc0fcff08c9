//! Recursive merging and single-level updates.
//!
//! Merge rules, per incoming key:
//! - both sides map-shaped: merge recursively
//! - anything else: the incoming value replaces the stored one outright,
//!   detached so it shares nothing with the caller's data
//!
//! Sequences are never merged element-wise.

use tracing::{debug, trace};

use super::{Duplication, Raw, Record, RecordError, Value, coerce_value};

/// Resolver used when no conflict resolution is requested
fn keep_incoming(_key: &str, _existing: &Value, _incoming: &Value) -> Option<Value> {
    None
}

impl Record {
    /// Merges `other` into a duplicate of this record and returns it.
    ///
    /// ```
    /// # use dynrecord::record::Record;
    /// # use serde_json::json;
    /// let base = Record::from_raw(json!({ "a": { "x": 1, "y": 2 } }))?;
    /// let merged = base.deep_merge(json!({ "a": { "y": 3, "z": 4 } }))?;
    ///
    /// assert_eq!(merged.to_json(), json!({ "a": { "x": 1, "y": 3, "z": 4 } }));
    /// assert_eq!(base.to_json(), json!({ "a": { "x": 1, "y": 2 } }));
    /// # Ok::<(), dynrecord::Error>(())
    /// ```
    pub fn deep_merge(&self, other: impl Into<Raw>) -> crate::Result<Record> {
        let mut merged = self.dup();
        merged.deep_merge_in_place(other)?;
        Ok(merged)
    }

    /// Merges `other` into this record and returns it.
    ///
    /// Fails with [`RecordError::InvalidSourceData`] if `other` is not
    /// map-shaped; the record is left untouched in that case.
    pub fn deep_merge_in_place(&mut self, other: impl Into<Raw>) -> crate::Result<&mut Self> {
        self.merge_from(other.into(), &mut keep_incoming)?;
        Ok(self)
    }

    /// Like [`Record::deep_merge`], with a resolver for replaced keys.
    ///
    /// When an incoming value would replace a value that is already stored,
    /// `resolver(key, existing, incoming)` decides what is stored instead.
    /// Keys that merge recursively never reach the resolver themselves; their
    /// nested keys do.
    ///
    /// ```
    /// # use dynrecord::record::{Record, Value};
    /// # use serde_json::json;
    /// let base = Record::from_raw(json!({ "hits": 2, "meta": { "hits": 5 } }))?;
    /// let merged = base.deep_merge_with(json!({ "hits": 3, "meta": { "hits": 1 } }), |_, old, new| {
    ///     Value::Int(old.as_int().unwrap_or(0) + new.as_int().unwrap_or(0))
    /// })?;
    ///
    /// assert_eq!(merged.to_json(), json!({ "hits": 5, "meta": { "hits": 6 } }));
    /// # Ok::<(), dynrecord::Error>(())
    /// ```
    pub fn deep_merge_with<F>(&self, other: impl Into<Raw>, resolver: F) -> crate::Result<Record>
    where
        F: FnMut(&str, &Value, &Value) -> Value,
    {
        let mut merged = self.dup();
        merged.deep_merge_in_place_with(other, resolver)?;
        Ok(merged)
    }

    /// In-place variant of [`Record::deep_merge_with`]
    pub fn deep_merge_in_place_with<F>(
        &mut self,
        other: impl Into<Raw>,
        mut resolver: F,
    ) -> crate::Result<&mut Self>
    where
        F: FnMut(&str, &Value, &Value) -> Value,
    {
        self.merge_from(
            other.into(),
            &mut |key: &str, existing: &Value, incoming: &Value| {
                Some(resolver(key, existing, incoming))
            },
        )?;
        Ok(self)
    }

    fn merge_from<F>(&mut self, other: Raw, resolver: &mut F) -> crate::Result<()>
    where
        F: FnMut(&str, &Value, &Value) -> Option<Value>,
    {
        let shape = other.shape();
        let pairs = other
            .into_pairs()
            .ok_or_else(|| RecordError::InvalidSourceData {
                reason: format!("cannot merge {shape} data into a record"),
            })?;
        debug!(keys = pairs.len(), "deep merging into record");

        for (key, incoming) in pairs {
            if incoming.is_map() {
                if let Some(existing) = self.entries.get_mut(&key).and_then(Value::as_record_mut) {
                    trace!(key = %key, "merging nested record");
                    existing.merge_from(incoming, resolver)?;
                    continue;
                }
            }

            let mut value = coerce_value(incoming, Duplication::Detach);
            if let Some(existing) = self.entries.get(&key) {
                trace!(key = %key, "replacing stored value");
                if let Some(resolved) = resolver(&key, existing, &value) {
                    value = coerce_value(resolved, Duplication::Detach);
                }
            }
            self.entries.insert(key, value);
        }
        Ok(())
    }

    /// Single-level update: every key of `other` is written with
    /// [`Record::set`], replacing whatever was stored. Nested records are
    /// never merged.
    ///
    /// Every key is settable, so there is no separate direct-write path.
    pub fn update(&mut self, other: impl Into<Raw>) -> crate::Result<&mut Self> {
        let other = other.into();
        let shape = other.shape();
        let pairs = other
            .into_pairs()
            .ok_or_else(|| RecordError::InvalidSourceData {
                reason: format!("cannot update a record from {shape} data"),
            })?;
        for (key, value) in pairs {
            self.set(key, value);
        }
        Ok(self)
    }
}
