//! JSON Patch diff: generate a JSON Patch from two document values.
//!
//! The differ walks both documents together. Object members are visited in
//! lexicographic key order, never in the map's own iteration order, so the
//! same inputs always produce the same patch. Arrays are replaced as a whole
//! unless [`ArrayStrategy::Lcs`] is selected.

mod array;

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::json_equal::identical;
use crate::json_patch::types::{Op, Patch, Path};

// ── Options ───────────────────────────────────────────────────────────────

/// How unequal arrays are turned into operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayStrategy {
    /// One `replace` of the whole target array.
    #[default]
    Replace,
    /// Element-level `add`/`remove` around a longest common subsequence,
    /// recursing into elements that changed in place.
    Lcs,
}

/// Options for [`diff_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    pub arrays: ArrayStrategy,
}

impl DiffOptions {
    pub fn with_arrays(mut self, arrays: ArrayStrategy) -> Self {
        self.arrays = arrays;
        self
    }
}

// ── Public API ────────────────────────────────────────────────────────────

/// Generate a JSON Patch (list of operations) that transforms `src` into `dst`.
///
/// Uses the default [`DiffOptions`]. An unchanged subtree yields no
/// operations, so `diff(a, a)` is empty.
///
/// # Example
///
/// ```
/// use json_delta::json_patch_diff::diff;
/// use json_delta::json_patch::to_json_patch;
/// use serde_json::json;
///
/// let ops = diff(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 3}));
/// assert_eq!(
///     to_json_patch(&ops),
///     json!([
///         {"op": "remove", "path": "/b"},
///         {"op": "add", "path": "/c", "value": 3}
///     ])
/// );
/// ```
pub fn diff(src: &Value, dst: &Value) -> Patch {
    diff_with_options(src, dst, &DiffOptions::default())
}

/// Generate a JSON Patch from `src` to `dst` with explicit options.
pub fn diff_with_options(src: &Value, dst: &Value, options: &DiffOptions) -> Patch {
    let mut ops = Vec::new();
    let mut path = Vec::new();
    diff_at_path(&mut ops, &mut path, src, dst, options);
    debug!(ops = ops.len(), arrays = ?options.arrays, "diff computed");
    ops
}

// ── Core recursive differ ─────────────────────────────────────────────────

/// `path` is a scratch stack: every callee leaves it as it found it.
fn diff_at_path(
    ops: &mut Vec<Op>,
    path: &mut Path,
    src: &Value,
    dst: &Value,
    options: &DiffOptions,
) {
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => diff_obj(ops, path, s, d, options),
        (Value::Array(s), Value::Array(d)) => diff_arr(ops, path, s, d, options),
        _ => diff_val(ops, path, src, dst),
    }
}

fn diff_val(ops: &mut Vec<Op>, path: &[String], src: &Value, dst: &Value) {
    if identical(src, dst) {
        return;
    }
    ops.push(Op::Replace {
        path: path.to_vec(),
        value: dst.clone(),
    });
}

fn diff_obj(
    ops: &mut Vec<Op>,
    path: &mut Path,
    src: &Map<String, Value>,
    dst: &Map<String, Value>,
    options: &DiffOptions,
) {
    let keys: BTreeSet<&String> = src.keys().chain(dst.keys()).collect();
    for key in keys {
        path.push(key.clone());
        match (src.get(key), dst.get(key)) {
            (Some(src_val), Some(dst_val)) => diff_at_path(ops, path, src_val, dst_val, options),
            (Some(_), None) => ops.push(Op::Remove { path: path.clone() }),
            (None, Some(dst_val)) => ops.push(Op::Add {
                path: path.clone(),
                value: dst_val.clone(),
            }),
            (None, None) => {}
        }
        path.pop();
    }
}

fn diff_arr(
    ops: &mut Vec<Op>,
    path: &mut Path,
    src: &[Value],
    dst: &[Value],
    options: &DiffOptions,
) {
    match options.arrays {
        ArrayStrategy::Replace => {
            let equal = src.len() == dst.len() && src.iter().zip(dst).all(|(s, d)| identical(s, d));
            if !equal {
                ops.push(Op::Replace {
                    path: path.clone(),
                    value: Value::Array(dst.to_vec()),
                });
            }
        }
        ArrayStrategy::Lcs => array::diff_lcs(ops, path, src, dst, options),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
