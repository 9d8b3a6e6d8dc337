//! `json-cli` — string-level logic behind the `json-delta` binary.
//!
//! - `json-delta diff`  — print the patch between two documents
//! - `json-delta apply` — apply a patch to a document

use json_delta_pointer::try_parse_json_pointer;
use serde_json::Value;
use tracing::debug;

use crate::json_patch::util::matcher;
use crate::json_patch::{to_json_patch, PatchError};
use crate::json_patch_diff::DiffOptions;
use crate::patch_service::PatchService;

fn render(value: &Value, pretty: bool) -> Result<String, PatchError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.map_err(|e| PatchError::Encode(e.to_string()))
}

// ── diff ──────────────────────────────────────────────────────────────────

/// Diff two JSON documents and render the patch.
///
/// With `only`, operations outside the subtree at that pointer (by `path` or
/// `from`) are dropped from the output.
pub fn diff_json(
    source: &str,
    target: &str,
    options: &DiffOptions,
    only: Option<&str>,
    pretty: bool,
) -> Result<String, PatchError> {
    let mut ops = PatchService::with_options(*options).diff(source.as_bytes(), target.as_bytes())?;
    if let Some(pointer) = only {
        let prefix = try_parse_json_pointer(pointer)
            .map_err(|e| PatchError::Decode(format!("--only: {e}")))?;
        let keep = matcher(&prefix);
        ops.retain(|op| keep(op));
        debug!(pointer, ops = ops.len(), "patch narrowed");
    }
    render(&to_json_patch(&ops), pretty)
}

// ── apply ─────────────────────────────────────────────────────────────────

/// Apply a JSON Patch (RFC 6902) to a document and render the result.
pub fn apply_json(document: &str, patch: &str, pretty: bool) -> Result<String, PatchError> {
    let result = PatchService::default().apply(document.as_bytes(), patch.as_bytes())?;
    render(&result, pretty)
}

// ── Tests ─────────────────────────────────────────────────────────────────
