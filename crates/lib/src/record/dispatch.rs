//! Attribute-style access as an explicit dispatch table.
//!
//! A name is resolved in this order:
//!
//! | Name           | Arguments | Result                                   |
//! |----------------|-----------|------------------------------------------|
//! | `stem=`        | one       | [`Record::set`] → [`Reply::Assigned`]    |
//! | `stem?`        | none      | [`Record::has`] → [`Reply::Present`]     |
//! | `stem!`        | none      | [`Record::force_key`] → [`Reply::Forced`]|
//! | a stored key   | any       | [`Record::get`] → [`Reply::Found`]       |
//! | identifier     | any       | [`Record::resolve_default`] → [`Reply::Default`] |
//! | anything else  |           | [`RecordError::NoSuchAccessor`]          |
//!
//! ```
//! # use dynrecord::record::{Record, Reply, Value};
//! let mut record = Record::new();
//!
//! assert!(matches!(record.dispatch("name?", None)?, Reply::Present(false)));
//! record.dispatch("name=", Some("Alice".into()))?;
//! assert_eq!(record.dispatch("name", None)?.value(), Some(&Value::from("Alice")));
//!
//! record.dispatch("address!", None)?;
//! assert!(record.get("address").unwrap().is_record());
//!
//! assert!(record.dispatch("not-a-name", None).is_err());
//! # Ok::<(), dynrecord::Error>(())
//! ```

use tracing::debug;

use super::{Duplication, Key, Raw, Record, RecordError, Value, coerce_value, normalize_key};

/// Classification of an attribute-style name by its suffix.
///
/// Presence of the key is not considered here; [`Record::dispatch`] decides
/// what a [`Accessor::Read`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor<'n> {
    /// `stem=` with one argument
    Assign(&'n str),
    /// `stem?` with no argument
    Query(&'n str),
    /// `stem!` with no argument
    Force(&'n str),
    /// Any other name, read as-is
    Read(&'n str),
}

impl<'n> Accessor<'n> {
    /// Classifies `name` given the number of arguments supplied.
    ///
    /// Suffix forms need a non-empty stem; a bare `=`, `?` or `!` is read
    /// as-is.
    pub fn parse(name: &'n str, arity: usize) -> Self {
        let stem = |suffix: char| name.strip_suffix(suffix).filter(|s| !s.is_empty());

        match arity {
            1 => stem('=').map_or(Accessor::Read(name), Accessor::Assign),
            0 => stem('?')
                .map(Accessor::Query)
                .or_else(|| stem('!').map(Accessor::Force))
                .unwrap_or(Accessor::Read(name)),
            _ => Accessor::Read(name),
        }
    }
}

/// Result of a successful dispatch.
#[derive(Debug)]
pub enum Reply<'a> {
    /// The value just stored by a `stem=` access
    Assigned(&'a Value),
    /// Answer to a `stem?` access
    Present(bool),
    /// The value at a forced key, freshly created or pre-existing
    Forced(&'a mut Value),
    /// The stored value for a present key
    Found(&'a Value),
    /// The resolved default for an absent identifier
    Default(Option<Value>),
}

impl<'a> Reply<'a> {
    /// The value carried by this reply, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Reply::Assigned(value) | Reply::Found(value) => Some(*value),
            Reply::Forced(value) => Some(&**value),
            Reply::Default(value) => value.as_ref(),
            Reply::Present(_) => None,
        }
    }

    /// The answer of a predicate access
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Reply::Present(present) => Some(*present),
            _ => None,
        }
    }

    /// Mutable access to a forced value
    pub fn into_forced(self) -> Option<&'a mut Value> {
        match self {
            Reply::Forced(value) => Some(value),
            _ => None,
        }
    }

    /// Mutable access to a forced nested record
    pub fn into_forced_record(self) -> Option<&'a mut Record> {
        self.into_forced()?.as_record_mut()
    }
}

/// A simple identifier is made of ASCII letters, digits and underscores and
/// has at least one letter or digit.
fn is_simple_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.chars().any(|c| c.is_ascii_alphanumeric())
}

impl Record {
    /// Resolves an attribute-style access.
    ///
    /// `arg` is the single argument of a mutator form; pass `None` for
    /// reads, predicates and forcing accessors.
    pub fn dispatch(&mut self, name: &str, arg: Option<Raw>) -> crate::Result<Reply<'_>> {
        let arity = usize::from(arg.is_some());
        match Accessor::parse(name, arity) {
            Accessor::Assign(stem) => {
                let value = coerce_value(arg.unwrap_or(Raw::Null), Duplication::Share);
                Ok(Reply::Assigned(self.store(normalize_key(stem), value)))
            }
            Accessor::Query(stem) => Ok(Reply::Present(self.has(stem))),
            Accessor::Force(stem) => Ok(Reply::Forced(self.force_key(stem))),
            Accessor::Read(name) => self.read_attribute(name),
        }
    }

    fn read_attribute(&self, name: &str) -> crate::Result<Reply<'_>> {
        if let Some(value) = self.entries.get(name) {
            return Ok(Reply::Found(value));
        }
        if is_simple_identifier(name) {
            return Ok(Reply::Default(self.resolve_default(Some(Key::symbol(name)))));
        }
        debug!(name, "no accessor matches");
        Err(RecordError::NoSuchAccessor {
            name: name.to_string(),
        }
        .into())
    }

    /// Reports whether [`Record::dispatch`] would succeed for `name` with the
    /// given number of arguments, without touching the record.
    pub fn responds_to(&self, name: &str, arity: usize) -> bool {
        match Accessor::parse(name, arity) {
            Accessor::Assign(_) | Accessor::Query(_) | Accessor::Force(_) => true,
            Accessor::Read(name) => self.has(name) || is_simple_identifier(name),
        }
    }
}
