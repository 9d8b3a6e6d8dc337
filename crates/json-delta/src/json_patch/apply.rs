//! JSON Patch apply logic.
//!
//! [`apply_op`] mutates a document in place and may leave it half-changed
//! when a compound operation (`move`) fails midway. [`apply_patch`] and
//! [`apply_patch_in_place`] run every operation against a private working
//! copy and only publish it once the whole patch succeeded.

use json_delta_pointer::{find, find_mut, is_child, split_last, ArrayStep, JsonPointerError};
use serde_json::Value;
use tracing::{debug, trace};

use super::types::{Fault, FaultKind, Op, PatchError};
use super::util::touched_paths;

// ── Path navigation ───────────────────────────────────────────────────────

/// Attribute a pointer failure to the operation's pointer.
fn fault(path: &[String]) -> impl Fn(JsonPointerError) -> Fault + '_ {
    move |err| Fault::new(FaultKind::from(err), path)
}

fn existing<'a>(doc: &'a Value, path: &[String]) -> Result<&'a Value, Fault> {
    find(doc, path).map_err(fault(path))
}

/// Resolves the container that receives or loses the last step of `path`.
fn parent_mut<'a, 'p>(
    doc: &'a mut Value,
    path: &'p [String],
) -> Result<(&'a mut Value, &'p str), Fault> {
    let (parent_path, key) = split_last(path).map_err(fault(path))?;
    let parent = find_mut(doc, parent_path).map_err(fault(path))?;
    Ok((parent, key))
}

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<(), Fault> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent, key) = parent_mut(doc, path)?;
    match parent {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = ArrayStep::try_parse(key).map_err(fault(path))?.position(arr.len());
            if idx > arr.len() {
                return Err(Fault::new(FaultKind::Path, path));
            }
            arr.insert(idx, value);
            Ok(())
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(fault(path)(JsonPointerError::NotContainer))
        }
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<Value, Fault> {
    let (parent, key) = parent_mut(doc, path)?;
    match parent {
        Value::Object(map) => map.remove(key).ok_or_else(|| Fault::new(FaultKind::Path, path)),
        Value::Array(arr) => match ArrayStep::try_parse(key).map_err(fault(path))? {
            ArrayStep::Index(idx) if idx < arr.len() => Ok(arr.remove(idx)),
            ArrayStep::Index(_) | ArrayStep::End => Err(Fault::new(FaultKind::Path, path)),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(fault(path)(JsonPointerError::NotContainer))
        }
    }
}

fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<(), Fault> {
    *find_mut(doc, path).map_err(fault(path))? = value;
    Ok(())
}

fn apply_move(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), Fault> {
    existing(doc, from)?;
    if is_child(from, path) {
        return Err(Fault::new(FaultKind::TypeMismatch, path));
    }
    if from == path {
        return Ok(());
    }
    let value = apply_remove(doc, from)?;
    apply_add(doc, path, value)
}

fn apply_copy(doc: &mut Value, path: &[String], from: &[String]) -> Result<(), Fault> {
    let value = existing(doc, from)?.clone();
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &[String], expected: &Value) -> Result<(), Fault> {
    if crate::json_equal::deep_equal(existing(doc, path)?, expected) {
        Ok(())
    } else {
        Err(Fault::new(FaultKind::TestFailed, path))
    }
}

// ── Main apply functions ──────────────────────────────────────────────────

/// Apply a single operation to the document (in-place mutation).
///
/// # Errors
///
/// Returns a [`Fault`] naming the pointer that could not be satisfied. On
/// error the document may be partially modified; use [`apply_patch`] for
/// all-or-nothing semantics.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), Fault> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path).map(drop),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
        Op::Move { from, path } => apply_move(doc, path, from),
        Op::Copy { from, path } => apply_copy(doc, path, from),
        Op::Test { path, value } => apply_test(doc, path, value),
    }
}

/// Apply a patch and return the patched document.
///
/// `doc` is never modified. Operations run in order against one private
/// working copy; the first failure discards it and is reported with the
/// failing operation's index and pointer.
///
/// Note that `add` at the `-` array marker is not idempotent: applying the
/// same append patch twice appends twice.
///
/// # Errors
///
/// [`PatchError::Path`], [`PatchError::TypeMismatch`] or
/// [`PatchError::TestFailed`] for the first operation that fails.
pub fn apply_patch(doc: &Value, patch: &[Op]) -> Result<Value, PatchError> {
    debug!(ops = patch.len(), touched = ?touched_paths(patch), "applying patch");
    let mut working = doc.clone();
    for (index, op) in patch.iter().enumerate() {
        trace!(index, op = op.op_name(), "applying operation");
        apply_op(&mut working, op).map_err(|fault| {
            let err = PatchError::at(index, op, fault);
            debug!(index, op = op.op_name(), error = %err, "patch rejected");
            err
        })?;
    }
    Ok(working)
}

/// Apply a patch to a document the caller owns mutably.
///
/// On success `*doc` holds the patched document; on error it is unchanged.
///
/// # Errors
///
/// Same as [`apply_patch`].
pub fn apply_patch_in_place(doc: &mut Value, patch: &[Op]) -> Result<(), PatchError> {
    *doc = apply_patch(doc, patch)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────
