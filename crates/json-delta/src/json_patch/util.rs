//! Utility functions for JSON Patch operations.
//!
//! Helpers for narrowing a patch to a subtree and for summarising which
//! locations a patch touches.

use std::collections::BTreeSet;

use json_delta_pointer::format_json_pointer;

use super::types::Op;

// ── Path matcher ───────────────────────────────────────────────────────────

/// Creates a closure that returns `true` if an `Op` touches the subtree
/// rooted at `prefix`.
///
/// An op matches when its path, or the `from` path of a `move`/`copy`, is
/// equal to the prefix or lies below it.
///
/// # Example
///
/// ```
/// use json_delta::json_patch::{Op, util::matcher};
///
/// let prefix: Vec<String> = vec!["foo".to_string()];
/// let is_under_foo = matcher(&prefix);
///
/// let add_under_foo = Op::Add {
///     path: vec!["foo".to_string(), "bar".to_string()],
///     value: serde_json::json!(1),
/// };
/// assert!(is_under_foo(&add_under_foo));
///
/// let add_elsewhere = Op::Add {
///     path: vec!["baz".to_string()],
///     value: serde_json::json!(2),
/// };
/// assert!(!is_under_foo(&add_elsewhere));
/// ```
pub fn matcher(prefix: &[String]) -> impl Fn(&Op) -> bool + '_ {
    move |op: &Op| {
        path_starts_with(op.path(), prefix)
            || op.from().is_some_and(|from| path_starts_with(from, prefix))
    }
}

/// Returns `true` if `path` starts with `prefix` (path == prefix, or path
/// has more components and all prefix components match).
pub fn path_starts_with(path: &[String], prefix: &[String]) -> bool {
    path.len() >= prefix.len() && path[..prefix.len()] == *prefix
}

/// Formatted pointers read or written by a patch, sorted and de-duplicated.
pub fn touched_paths(ops: &[Op]) -> BTreeSet<String> {
    ops.iter()
        .flat_map(|op| std::iter::once(op.path()).chain(op.from()))
        .map(|path| format_json_pointer(path))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────
