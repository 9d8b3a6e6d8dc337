//! JSON codec for JSON Patch operations.
//!
//! Converts operations to/from `serde_json::Value` in RFC 6902 format.
//! Encoded members are written in a fixed order (`op`, `from`, `path`,
//! `value`) so serialized patches are reproducible byte for byte.

use json_delta_pointer::{format_json_pointer, try_parse_json_pointer};
use serde_json::{Map, Value};

use crate::json_patch::types::{Op, Patch, PatchError};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &[String]) -> Value {
    Value::String(format_json_pointer(path))
}

fn decode_path(map: &Map<String, Value>, member: &str, code: &str) -> Result<Vec<String>, String> {
    let s = map
        .get(member)
        .and_then(Value::as_str)
        .ok_or_else(|| code.to_string())?;
    try_parse_json_pointer(s).map_err(|e| format!("{code}: {e}"))
}

fn decode_value(map: &Map<String, Value>) -> Result<Value, String> {
    map.get("value").cloned().ok_or_else(|| "OP_VALUE_MISSING".to_string())
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
pub fn to_json(op: &Op) -> Value {
    let mut m = Map::new();
    m.insert("op".into(), Value::String(op.op_name().to_string()));
    if let Some(from) = op.from() {
        m.insert("from".into(), encode_path(from));
    }
    m.insert("path".into(), encode_path(op.path()));
    if let Some(value) = op.value() {
        m.insert("value".into(), value.clone());
    }
    Value::Object(m)
}

/// Serialize a list of ops to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

fn decode_op(v: &Value) -> Result<Op, String> {
    let map = v.as_object().ok_or_else(|| "OP_INVALID".to_string())?;
    let op_name = map
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| "OP_MISSING".to_string())?;
    let path = decode_path(map, "path", "OP_PATH_INVALID")?;
    match op_name {
        "add" => Ok(Op::Add { path, value: decode_value(map)? }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace { path, value: decode_value(map)? }),
        "move" => Ok(Op::Move { from: decode_path(map, "from", "OP_FROM_INVALID")?, path }),
        "copy" => Ok(Op::Copy { from: decode_path(map, "from", "OP_FROM_INVALID")?, path }),
        "test" => Ok(Op::Test { path, value: decode_value(map)? }),
        other => Err(format!("OP_UNKNOWN: {other:?}")),
    }
}

/// Deserialize a single operation from its JSON object form.
///
/// Unknown extra members are ignored.
///
/// # Errors
///
/// [`PatchError::Decode`] if the object is not a well-formed RFC 6902
/// operation.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    decode_op(v).map_err(PatchError::Decode)
}

/// Deserialize a JSON array into a list of ops.
///
/// # Errors
///
/// [`PatchError::Decode`] naming the first malformed operation as
/// `Error in operation [index = N] (REASON).`
pub fn from_json_patch(v: &Value) -> Result<Patch, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::Decode("Patch must be an array.".to_string()))?;
    arr.iter()
        .enumerate()
        .map(|(i, op)| {
            decode_op(op).map_err(|reason| {
                PatchError::Decode(format!("Error in operation [index = {i}] ({reason})."))
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────
