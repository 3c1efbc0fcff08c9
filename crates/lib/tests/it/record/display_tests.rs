//! Rendering and shallow export tests

use std::collections::HashMap;

use dynrecord::record::{Record, Value};
use serde_json::json;

use super::helpers::*;

// ===== DESCRIBE =====

#[test]
fn test_describe_empty_record() {
    assert_eq!(Record::new().describe(), "<Record>");
}

#[test]
fn test_describe_sorts_keys() {
    let mut record = Record::new();
    record.set("b", 1);
    record.set("a", "x");

    assert_eq!(record.describe(), r#"<Record a="x" b=1>"#);
}

#[test]
fn test_describe_is_deterministic_across_insertion_order() {
    let forward: Record = [("one", 1), ("two", 2), ("three", 3)].into_iter().collect();
    let backward: Record = [("three", 3), ("two", 2), ("one", 1)].into_iter().collect();

    assert_eq!(forward.describe(), backward.describe());
}

#[test]
fn test_describe_nested_records() {
    let record = setup_profile();

    assert_eq!(
        record.describe(),
        concat!(
            r#"<Record accounts=[<Record id=1>, <Record id=2>] "#,
            r#"address=<Record city="Paris" zip="75001"> "#,
            r#"age=30 name="Alice" tags=["admin", "ops"]>"#
        )
    );
}

#[test]
fn test_display_matches_describe() {
    let record = record_from(json!({ "k": { "v": null } }));

    assert_eq!(record.to_string(), record.describe());
    assert_eq!(format!("{record}"), "<Record k=<Record v=nil>>");
}

// ===== INSPECT =====

#[test]
fn test_inspect_leaves() {
    assert_eq!(Value::Null.inspect(), "nil");
    assert_eq!(Value::Bool(true).inspect(), "true");
    assert_eq!(Value::Int(-4).inspect(), "-4");
    assert_eq!(Value::Float(1.0).inspect(), "1.0");
    assert_eq!(Value::from("say \"hi\"").inspect(), r#""say \"hi\"""#);
}

#[test]
fn test_inspect_list() {
    let list = Value::List(vec![Value::Int(1), Value::from("a"), Value::Null]);

    assert_eq!(list.inspect(), r#"[1, "a", nil]"#);
    assert_eq!(Value::List(vec![]).inspect(), "[]");
}

#[test]
fn test_value_display_leaves_text_unquoted() {
    assert_eq!(Value::from("plain").to_string(), "plain");
    assert_eq!(Value::Int(3).to_string(), "3");
}

// ===== SHALLOW EXPORT =====

#[test]
fn test_record_map_keeps_nested_records() {
    let record = setup_profile();
    let exported = record.to_record_map();

    assert_eq!(exported.len(), record.len());
    assert!(exported.get("address").unwrap().is_record());
    assert_eq!(exported.get("name"), Some(&Value::from("Alice")));
}

#[test]
fn test_record_map_carries_default() {
    let record = Record::with_default("n/a").with("present", 1);
    let exported = record.into_record_map();

    assert_eq!(exported.get_or_default("present"), Some(Value::Int(1)));
    assert_eq!(exported.get_or_default("absent"), Some(Value::from("n/a")));

    let plain: HashMap<String, Value> = exported.into();
    assert_eq!(plain.len(), 1);
}

#[test]
fn test_record_map_of_empty_record() {
    let exported = Record::new().to_record_map();

    assert!(exported.is_empty());
    assert_eq!(exported.get_or_default("anything"), None);
}
