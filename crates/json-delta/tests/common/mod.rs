#![allow(dead_code)]

use serde_json::{json, Value};

pub fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("valid JSON")
}

pub fn person_before() -> Value {
    json!({"name": "John", "age": 24, "height": 3.21})
}

pub fn person_after() -> Value {
    json!({"name": "John", "age": 25, "height": 3.86})
}

pub fn append_patch() -> Value {
    json!([{"op": "add", "path": "/items/-", "value": "x"}])
}

/// Same members as [`nested_document`], declared in a different order.
pub fn nested_document_reordered() -> Value {
    serde_json::from_str(
        r#"{"tags":["b","a"],"meta":{"v":2,"owner":{"id":7,"name":"n"}},"id":"doc-1"}"#,
    )
    .expect("valid JSON")
}

pub fn nested_document() -> Value {
    serde_json::from_str(
        r#"{"id":"doc-1","meta":{"owner":{"name":"n","id":7},"v":2},"tags":["b","a"]}"#,
    )
    .expect("valid JSON")
}
