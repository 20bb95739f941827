use serde_json::json;

use roster::api::users::{record_from_value, records_from_value};

#[test]
fn test_record_decodes_numeric_id() {
    let rec = record_from_value(&json!({"id": 5, "name": "Alice", "email": "a@x.com"})).unwrap();
    assert_eq!(rec.id, "5");
    assert_eq!(rec.name, "Alice");
    assert_eq!(rec.email, "a@x.com");
}

#[test]
fn test_record_decodes_string_id() {
    let rec = record_from_value(&json!({"id": "u-42", "name": "Bob", "email": "b@x.com"})).unwrap();
    assert_eq!(rec.id, "u-42");
}

#[test]
fn test_record_without_id_is_dropped() {
    assert!(record_from_value(&json!({"name": "Ghost", "email": "g@x.com"})).is_none());
}

#[test]
fn test_record_missing_fields_decode_as_empty_text() {
    let rec = record_from_value(&json!({"id": 1})).unwrap();
    assert_eq!(rec.name, "");
    assert_eq!(rec.email, "");
}

#[test]
fn test_records_skip_undecodable_rows() {
    let payload = json!([
        {"id": 1, "name": "Alice", "email": "a@x.com"},
        {"name": "no id"},
        "not an object",
        {"id": 2, "name": "Bob", "email": "b@x.com"}
    ]);
    let records = records_from_value(&payload);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "1");
    assert_eq!(records[1].id, "2");
}

#[test]
fn test_records_from_non_array_payload_is_empty() {
    assert!(records_from_value(&json!({"message": "oops"})).is_empty());
    assert!(records_from_value(&json!(null)).is_empty());
}
