//! Raw input data and coercion into stored values.
//!
//! [`Raw`] is the closed set of shapes a record accepts on every write or
//! construction path. [`coerce_value`] walks it and produces the canonical
//! [`Value`]: map-shaped data becomes a nested [`Record`], sequence-shaped data
//! is coerced element by element, and leaves pass through unchanged.
//!
//! ```
//! # use dynrecord::record::{coerce_value, Duplication, Raw, Value};
//! let raw = Raw::from(serde_json::json!({ "user": { "tags": [{ "id": 1 }] } }));
//! let value = coerce_value(raw, Duplication::Share);
//!
//! let user = value.as_record().unwrap().get("user").unwrap();
//! let tags = user.as_record().unwrap().get("tags").unwrap();
//! assert!(tags.as_list().unwrap()[0].is_record());
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    hash::BuildHasher,
    sync::Arc,
};

use super::{Key, Record, Value};

/// Raw, not yet coerced data.
#[derive(Debug, Clone)]
pub enum Raw {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Map-shaped data: key/value pairs with key-like keys
    Map(Vec<(Key, Raw)>),
    /// Sequence-shaped data
    Seq(Vec<Raw>),
    /// An already built record
    Record(Record),
    /// An already coerced value
    Value(Value),
}

/// Structural shape of a [`Raw`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Exposes key/value iteration
    Map,
    /// Exposes ordered element iteration
    Sequence,
    /// Neither; passes through coercion unchanged
    Leaf,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Map => write!(f, "map-shaped"),
            Shape::Sequence => write!(f, "sequence-shaped"),
            Shape::Leaf => write!(f, "scalar"),
        }
    }
}

/// Whether coercion may share already built nested records with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Duplication {
    /// Nested records that arrive already built are kept as-is
    #[default]
    Share,
    /// Every nested record gets a fresh allocation
    Detach,
}

impl Raw {
    /// Builds map-shaped raw data from key/value pairs
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Raw>,
    {
        Raw::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds sequence-shaped raw data
    pub fn seq<V: Into<Raw>>(items: impl IntoIterator<Item = V>) -> Self {
        Raw::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Classifies the value by the iteration it exposes
    pub fn shape(&self) -> Shape {
        match self {
            Raw::Map(_) | Raw::Record(_) | Raw::Value(Value::Record(_)) => Shape::Map,
            Raw::Seq(_) | Raw::Value(Value::List(_)) => Shape::Sequence,
            _ => Shape::Leaf,
        }
    }

    /// Returns true if this value is map-shaped
    pub fn is_map(&self) -> bool {
        self.shape() == Shape::Map
    }

    /// Flattens map-shaped data into normalized key/value pairs.
    ///
    /// Returns `None` for anything that is not map-shaped.
    pub(crate) fn into_pairs(self) -> Option<Vec<(String, Raw)>> {
        match self {
            Raw::Map(pairs) => Some(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into_string(), v))
                    .collect(),
            ),
            Raw::Record(record) => Some(record.into_raw_pairs()),
            Raw::Value(Value::Record(record)) => Some(Arc::unwrap_or_clone(record).into_raw_pairs()),
            _ => None,
        }
    }
}

/// Coerces raw data into its stored form.
///
/// - Map-shaped: becomes a [`Record`]. With [`Duplication::Detach`] any record
///   that arrives already built is deep-copied first.
/// - Sequence-shaped: a new list whose elements are coerced independently
///   with [`Duplication::Share`].
/// - Anything else: returned unchanged.
///
/// Coercion is idempotent: coercing an already coerced value yields an equal
/// value.
pub fn coerce_value(value: impl Into<Raw>, duplication: Duplication) -> Value {
    match value.into() {
        Raw::Null => Value::Null,
        Raw::Bool(b) => Value::Bool(b),
        Raw::Int(n) => Value::Int(n),
        Raw::Float(x) => Value::Float(x),
        Raw::Text(s) => Value::Text(s),
        Raw::Map(pairs) => {
            let pairs = pairs.into_iter().map(|(k, v)| (k.into_string(), v));
            Value::Record(Arc::new(Record::from_pairs(pairs, duplication)))
        }
        Raw::Seq(items) => Value::List(
            items
                .into_iter()
                .map(|item| coerce_value(item, Duplication::Share))
                .collect(),
        ),
        Raw::Record(record) => match duplication {
            Duplication::Share => Value::Record(Arc::new(record)),
            Duplication::Detach => Value::Record(Arc::new(record.deep_dup())),
        },
        Raw::Value(value) => match duplication {
            Duplication::Share => value,
            Duplication::Detach => value.detached(),
        },
    }
}

impl From<bool> for Raw {
    fn from(value: bool) -> Self {
        Raw::Bool(value)
    }
}

macro_rules! raw_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Raw {
                fn from(value: $ty) -> Self {
                    Raw::Int(i64::from(value))
                }
            }
        )*
    };
}

raw_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Raw {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Raw::Int(n),
            Err(_) => Raw::Float(value as f64),
        }
    }
}

impl From<usize> for Raw {
    fn from(value: usize) -> Self {
        Raw::from(value as u64)
    }
}

impl From<f32> for Raw {
    fn from(value: f32) -> Self {
        Raw::Float(f64::from(value))
    }
}

impl From<f64> for Raw {
    fn from(value: f64) -> Self {
        Raw::Float(value)
    }
}

impl From<&str> for Raw {
    fn from(value: &str) -> Self {
        Raw::Text(value.to_string())
    }
}

impl From<String> for Raw {
    fn from(value: String) -> Self {
        Raw::Text(value)
    }
}

impl From<Value> for Raw {
    fn from(value: Value) -> Self {
        Raw::Value(value)
    }
}

impl From<&Value> for Raw {
    fn from(value: &Value) -> Self {
        Raw::Value(value.clone())
    }
}

impl From<Record> for Raw {
    fn from(value: Record) -> Self {
        Raw::Record(value)
    }
}

impl From<&Record> for Raw {
    fn from(value: &Record) -> Self {
        Raw::Record(value.dup())
    }
}

impl<T: Into<Raw>> From<Option<T>> for Raw {
    fn from(value: Option<T>) -> Self {
        value.map_or(Raw::Null, Into::into)
    }
}

impl<T: Into<Raw>> From<Vec<T>> for Raw {
    fn from(value: Vec<T>) -> Self {
        Raw::seq(value)
    }
}

impl<T: Into<Raw>, const N: usize> From<[T; N]> for Raw {
    fn from(value: [T; N]) -> Self {
        Raw::seq(value)
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for Raw
where
    K: Into<Key>,
    V: Into<Raw>,
    S: BuildHasher,
{
    fn from(value: HashMap<K, V, S>) -> Self {
        Raw::map(value)
    }
}

impl<K, V> From<BTreeMap<K, V>> for Raw
where
    K: Into<Key>,
    V: Into<Raw>,
{
    fn from(value: BTreeMap<K, V>) -> Self {
        Raw::map(value)
    }
}

impl From<serde_json::Value> for Raw {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Raw::Null,
            Json::Bool(b) => Raw::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Raw::Int(i),
                None => n.as_f64().map_or(Raw::Null, Raw::Float),
            },
            Json::String(s) => Raw::Text(s),
            Json::Array(items) => Raw::seq(items),
            Json::Object(map) => Raw::map(map),
        }
    }
}
