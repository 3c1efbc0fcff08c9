//! Core accessor tests: get/set/has, defaults, forced keys and duplication

use dynrecord::record::{Duplication, Fallback, Key, Record, Value, coerce_value};
use serde_json::json;

use super::helpers::*;

// ===== BASIC OPERATIONS =====

#[test]
fn test_record_basic_operations() {
    let mut record = Record::new();

    assert!(record.is_empty());
    assert_eq!(record.len(), 0);

    let old = record.set("name", "Alice");
    assert!(old.is_none());
    assert_eq!(record.len(), 1);

    record.set("age", 30);
    assert_eq!(record.len(), 2);

    assert!(record.has("name"));
    assert!(record.has("age"));
    assert!(!record.has("nonexistent"));

    assert_eq!(record.get_as::<String>("name"), Some("Alice".to_string()));
    assert_eq!(record.get_as::<i64>("age"), Some(30));
    assert!(record.get("nonexistent").is_none());
}

#[test]
fn test_set_returns_previous_value() {
    let mut record = Record::new();

    record.set("key", "original");
    let old = record.set("key", "modified");

    assert_eq!(old, Some(Value::from("original")));
    assert_eq!(record.get_as::<&str>("key"), Some("modified"));
    assert_eq!(record.len(), 1);
}

#[test]
fn test_set_then_get_matches_coercion() {
    let mut record = Record::new();
    let raw = json!({ "inner": { "list": [1, { "deep": true }] } });

    record.set("k", raw.clone());

    assert_eq!(record.get("k"), Some(&coerce_value(raw, Duplication::Share)));
}

#[test]
fn test_has_before_and_after_set() {
    let mut record = Record::new();

    for key in ["a", "b", "with space", ""] {
        assert!(!record.has(key));
        record.set(key, Value::Null);
        assert!(record.has(key), "key {key:?} should be present after set");
    }
}

#[test]
fn test_null_is_a_stored_value() {
    let mut record = Record::new();
    record.set("nothing", Value::Null);

    assert!(record.has("nothing"));
    assert_eq!(record.get("nothing"), Some(&Value::Null));
}

// ===== KEY NORMALIZATION =====

#[test]
fn test_key_normalization() {
    let mut record = Record::new();

    record.set(Key::symbol("name"), "Alice");
    assert_eq!(record.get("name"), Some(&Value::from("Alice")));
    assert_eq!(record.get(String::from("name")), Some(&Value::from("Alice")));

    record.set(1, "one");
    assert!(record.has("1"));
    assert_eq!(record.get(1), Some(&Value::from("one")));

    record.set('c', true);
    assert_eq!(record.get("c"), Some(&Value::Bool(true)));

    let keys: Vec<&String> = record.sorted_keys();
    assert_eq!(keys, ["1", "c", "name"]);
}

#[test]
fn test_nested_keys_are_normalized() {
    let record = record_from(json!({ "outer": { "7": "seven" } }));

    assert_nested_value(&record, &["outer", "7"], &Value::from("seven"));
    assert_eq!(record.get_record("outer").unwrap().get(7), Some(&Value::from("seven")));
}

// ===== STRICT ACCESS AND REMOVAL =====

#[test]
fn test_fetch_missing_key() {
    let record = Record::new().with("present", 1);

    assert_eq!(record.fetch("present").unwrap(), &Value::Int(1));

    let err = record.fetch("missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.module(), "record");
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_delete_and_clear() {
    let mut record = setup_profile();

    assert_eq!(record.delete("age"), Some(Value::Int(30)));
    assert!(!record.has("age"));
    assert_eq!(record.delete("age"), None);

    record.clear();
    assert!(record.is_empty());
}

#[test]
fn test_replace_keeps_default() {
    let mut record = Record::with_default("none").with("old", 1);

    record.replace(json!({ "new": 2 })).unwrap();

    assert!(!record.has("old"));
    assert_eq!(record.get("new"), Some(&Value::Int(2)));
    assert_eq!(record.resolve_default(None), Some(Value::from("none")));
}

#[test]
fn test_id_lookup() {
    let mut record = Record::new();
    assert_eq!(record.id(), None);

    record.set("id", 42);
    assert_eq!(record.id(), Some(&Value::Int(42)));
}

// ===== DEFAULTS =====

#[test]
fn test_get_never_uses_default() {
    let record = Record::with_default(0);
    assert_eq!(record.get("missing"), None);
}

#[test]
fn test_resolve_default_self_reference() {
    let mut record = Record::with_default("fallback");
    record.set("present", "stored");

    // Symbolic key that is stored: echoes its own value
    assert_eq!(
        record.resolve_default(Some(Key::symbol("present"))),
        Some(Value::from("stored"))
    );
    // Symbolic key that is absent: the fixed default
    assert_eq!(
        record.resolve_default(Some(Key::symbol("absent"))),
        Some(Value::from("fallback"))
    );
    // Plain string key never self-references
    assert_eq!(
        record.resolve_default(Some(Key::from("present"))),
        Some(Value::from("fallback"))
    );
    assert_eq!(record.resolve_default(None), Some(Value::from("fallback")));
}

#[test]
fn test_falsy_defaults_are_returned() {
    for default in [Value::Bool(false), Value::Int(0), Value::from(""), Value::Null] {
        let record = Record::with_default(default.clone());
        assert_eq!(record.resolve_default(Some(Key::symbol("x"))), Some(default));
    }
}

#[test]
fn test_resolve_default_without_configuration() {
    let mut record = Record::new();
    record.set("present", 1);

    assert_eq!(record.resolve_default(Some(Key::symbol("absent"))), None);
    assert_eq!(record.resolve_default(None), None);
    assert_eq!(
        record.resolve_default(Some(Key::symbol("present"))),
        Some(Value::Int(1))
    );
}

#[test]
fn test_computed_default() {
    let mut record = Record::with_default_fn(|key| Value::Text(format!("<{key}>")));
    record.set("name", "Alice");

    assert_eq!(
        record.resolve_default(Some(Key::symbol("missing"))),
        Some(Value::from("<missing>"))
    );
    assert_eq!(
        record.resolve_default(Some(Key::symbol("name"))),
        Some(Value::from("Alice"))
    );
    // A per-key rule has nothing to answer without a key
    assert_eq!(record.resolve_default(None), None);
}

#[test]
fn test_default_configuration_changes() {
    let mut record = Record::new();
    assert!(record.fallback().is_none());

    record.set_default(5);
    assert!(matches!(record.fallback(), Fallback::Fixed(Value::Int(5))));

    record.set_default_fn(|_| Value::Null);
    assert!(matches!(record.fallback(), Fallback::Computed(_)));

    record.clear_default();
    assert!(record.fallback().is_none());
}

#[test]
fn test_nested_records_do_not_inherit_default() {
    let mut record = Record::with_default(1);
    record.set("nested", json!({}));
    record.force_key("forced");

    assert!(record.get_record("nested").unwrap().fallback().is_none());
    assert!(record.get_record("forced").unwrap().fallback().is_none());
}

// ===== FORCED KEYS =====

#[test]
fn test_force_key_creates_empty_record() {
    let mut record = Record::new();

    let forced = record.force_key("settings");
    assert_eq!(forced, &Value::from(Record::new()));
    assert!(record.has("settings"));
}

#[test]
fn test_force_key_is_idempotent() {
    let mut record = Record::new();

    record
        .force_record("settings")
        .unwrap()
        .set("theme", "dark");

    // Second call returns the same populated record, not a fresh one
    let again = record.force_record("settings").unwrap();
    assert_eq!(again.get("theme"), Some(&Value::from("dark")));
    assert_eq!(record.len(), 1);
}

#[test]
fn test_force_key_keeps_existing_scalar() {
    let mut record = Record::new().with("count", 3);

    assert_eq!(record.force_key("count"), &Value::Int(3));
    assert!(record.force_record("count").is_none());
    assert_eq!(record.get("count"), Some(&Value::Int(3)));
}

#[test]
fn test_force_key_chains_nested_levels() {
    let mut record = Record::new();

    record
        .force_record("a")
        .unwrap()
        .force_record("b")
        .unwrap()
        .set("c", 1);

    assert_nested_value(&record, &["a", "b", "c"], &Value::Int(1));
}

// ===== DUPLICATION =====

#[test]
fn test_dup_is_independent_at_top_level() {
    let mut original = Record::new();
    original.set("k", "v1");

    let mut copy = original.dup();
    copy.set("k", "v2");

    assert_eq!(original.get("k"), Some(&Value::from("v1")));
    assert_eq!(copy.get("k"), Some(&Value::from("v2")));
}

#[test]
fn test_dup_shares_nested_records() {
    let original = setup_profile();
    let copy = original.dup();

    assert!(copy.shares_storage_with(&original, "address"));
    assert_eq!(copy, original);
}

#[test]
fn test_nested_writes_through_dup_leave_original_intact() {
    let original = setup_profile();
    let mut copy = original.dup();

    copy.force_record("address").unwrap().set("city", "Lyon");

    assert_nested_value(&original, &["address", "city"], &Value::from("Paris"));
    assert_nested_value(&copy, &["address", "city"], &Value::from("Lyon"));
}

#[test]
fn test_deep_dup_shares_nothing() {
    let original = setup_profile();
    let copy = original.deep_dup();

    assert_eq!(copy, original);
    assert!(!copy.shares_storage_with(&original, "address"));
}

#[test]
fn test_dup_keeps_default() {
    let original = Record::with_default("d");
    let copy = original.dup();

    assert_eq!(copy.resolve_default(None), Some(Value::from("d")));
}

// ===== EQUALITY =====

#[test]
fn test_equality_is_order_independent() {
    let a = Record::new().with("x", 1).with("y", 2);
    let b = Record::new().with("y", 2).with("x", 1);

    assert_eq!(a, b);
    assert_ne!(a, b.clone().with("z", 3));
    assert_ne!(a, Record::new().with("x", 1).with("y", "2"));
}

// ===== COLLECTION HELPERS =====

#[test]
fn test_collect_and_extend() {
    let mut record: Record = [("a", 1), ("b", 2)].into_iter().collect();
    record.extend([("c", 3)]);

    assert_eq!(record.len(), 3);
    assert_eq!(record.get("c"), Some(&Value::Int(3)));

    let total: i64 = record.values().filter_map(Value::as_int).sum();
    assert_eq!(total, 6);
}
