//! Helper functions for record tests

use dynrecord::record::{Record, Value};
use serde_json::json;

/// Build a record from a JSON literal, panicking on non-object input
pub fn record_from(source: serde_json::Value) -> Record {
    Record::from_raw(source).expect("test source should be map-shaped")
}

/// A profile record with nested maps and a list of maps
pub fn setup_profile() -> Record {
    record_from(json!({
        "name": "Alice",
        "age": 30,
        "address": { "city": "Paris", "zip": "75001" },
        "tags": ["admin", "ops"],
        "accounts": [{ "id": 1 }, { "id": 2 }],
    }))
}

/// Assert that a nested value matches the expected one
pub fn assert_nested_value(record: &Record, path: &[&str], expected: &Value) {
    let mut current = record;

    for &key in &path[..path.len() - 1] {
        match current.get(key) {
            Some(Value::Record(inner)) => current = inner.as_ref(),
            other => panic!("Expected record at path segment '{key}' in path {path:?}, got {other:?}"),
        }
    }

    let final_key = path.last().expect("Path should not be empty");
    match current.get(*final_key) {
        Some(actual) => assert_eq!(actual, expected, "Value mismatch at path {path:?}"),
        None => panic!("No value found at path {path:?}"),
    }
}
