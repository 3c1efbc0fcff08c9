//! Key-like inputs and their canonical string form.
//!
//! Every record operation accepts anything convertible into a [`Key`]. Keys
//! are stored by their textual representation only, so `Key::symbol("a")`,
//! `"a"` and `String::from("a")` all address the same entry, and `1` addresses
//! the entry `"1"`.
//!
//! ```
//! # use dynrecord::record::{Key, normalize_key};
//! assert_eq!(normalize_key("name"), "name");
//! assert_eq!(normalize_key(Key::symbol("name")), "name");
//! assert_eq!(normalize_key(42), "42");
//! ```

use std::fmt;

/// A key-like input.
///
/// The symbolic/plain distinction only matters to
/// [`Record::resolve_default`](super::Record::resolve_default); storage and
/// lookup always use the normalized string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A symbolic token, such as an attribute name
    Symbol(String),
    /// A string or any other stringifiable identifier
    Name(String),
}

impl Key {
    /// Builds a symbolic key
    pub fn symbol(name: impl Into<String>) -> Self {
        Key::Symbol(name.into())
    }

    /// Returns true if this key is a symbolic token
    pub fn is_symbol(&self) -> bool {
        matches!(self, Key::Symbol(_))
    }

    /// Returns the normalized form without consuming the key
    pub fn as_str(&self) -> &str {
        match self {
            Key::Symbol(s) | Key::Name(s) => s,
        }
    }

    /// Consumes the key, returning its normalized form
    pub fn into_string(self) -> String {
        match self {
            Key::Symbol(s) | Key::Name(s) => s,
        }
    }
}

/// Converts any key-like input to the string under which it is stored.
///
/// Two keys that render to the same string are the same key.
pub fn normalize_key(key: impl Into<Key>) -> String {
    key.into().into_string()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Name(value.clone())
    }
}

macro_rules! key_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::Name(value.to_string())
                }
            }
        )*
    };
}

key_from_display!(char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
