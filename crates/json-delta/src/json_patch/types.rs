//! Core types for the JSON Patch module.

use json_delta_pointer::{format_json_pointer, JsonPointerError};
use serde_json::Value;
use thiserror::Error;

pub use json_delta_pointer::Path;

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch (RFC 6902) operation.
///
/// Each variant carries exactly the members its operation requires, so a
/// decoded `Op` is always complete.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Move { from: Path, path: Path },
    Copy { from: Path, path: Path },
    Test { path: Path, value: Value },
}

/// An ordered sequence of operations. Each one sees the result of the
/// previous one.
pub type Patch = Vec<Op>;

impl Op {
    /// Returns the operation name as it appears in the `op` member.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    /// Returns the target path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// Returns the source path for `move` and `copy`.
    pub fn from(&self) -> Option<&Path> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            Op::Add { .. } | Op::Remove { .. } | Op::Replace { .. } | Op::Test { .. } => None,
        }
    }

    /// Returns the operand value for `add`, `replace` and `test`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
                Some(value)
            }
            Op::Remove { .. } | Op::Move { .. } | Op::Copy { .. } => None,
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Why a single operation could not be applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The pointer does not resolve to a location the operation requires.
    #[error("PATH")]
    Path,
    /// The located node has the wrong kind for the operation, or a `move`
    /// would place a value inside itself.
    #[error("TYPE_MISMATCH")]
    TypeMismatch,
    /// A `test` operation found a different value.
    #[error("TEST_FAILED")]
    TestFailed,
}

/// Missing nodes are `Path`; a step into a node of the wrong kind is
/// `TypeMismatch`. The rule is the same at every depth and for every
/// operation.
impl From<JsonPointerError> for FaultKind {
    fn from(err: JsonPointerError) -> Self {
        match err {
            JsonPointerError::NotFound | JsonPointerError::NoParent => FaultKind::Path,
            JsonPointerError::InvalidIndex | JsonPointerError::NotContainer => {
                FaultKind::TypeMismatch
            }
        }
    }
}

/// Failure of a single operation, before it is attributed to a position in
/// a patch. `path` is the pointer that failed: the `from` path when the
/// source of a `move`/`copy` is missing, the target path otherwise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at {:?}", format_json_pointer(.path))]
pub struct Fault {
    pub kind: FaultKind,
    pub path: Path,
}

impl Fault {
    pub(crate) fn new(kind: FaultKind, path: &[String]) -> Self {
        Self { kind, path: path.to_vec() }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    /// Input bytes are not valid JSON, or not valid JSON Patch syntax.
    #[error("DECODE: {0}")]
    Decode(String),
    /// A result could not be serialized.
    #[error("ENCODE: {0}")]
    Encode(String),
    #[error("PATH: operation {index} ({op}) cannot resolve {pointer:?}")]
    Path {
        index: usize,
        op: &'static str,
        pointer: String,
    },
    #[error("TYPE_MISMATCH: operation {index} ({op}) does not fit the node at {pointer:?}")]
    TypeMismatch {
        index: usize,
        op: &'static str,
        pointer: String,
    },
    #[error("TEST_FAILED: operation {index} found a different value at {pointer:?}")]
    TestFailed { index: usize, pointer: String },
}

impl PatchError {
    /// Attribute a single-op fault to position `index` of a patch.
    pub fn at(index: usize, op: &Op, fault: Fault) -> Self {
        let pointer = format_json_pointer(&fault.path);
        match fault.kind {
            FaultKind::Path => PatchError::Path { index, op: op.op_name(), pointer },
            FaultKind::TypeMismatch => {
                PatchError::TypeMismatch { index, op: op.op_name(), pointer }
            }
            FaultKind::TestFailed => PatchError::TestFailed { index, pointer },
        }
    }

    /// Index of the failing operation, for errors raised while applying.
    pub fn index(&self) -> Option<usize> {
        match self {
            PatchError::Path { index, .. }
            | PatchError::TypeMismatch { index, .. }
            | PatchError::TestFailed { index, .. } => Some(*index),
            PatchError::Decode(_) | PatchError::Encode(_) => None,
        }
    }

    /// Pointer the failing operation could not satisfy.
    pub fn pointer(&self) -> Option<&str> {
        match self {
            PatchError::Path { pointer, .. }
            | PatchError::TypeMismatch { pointer, .. }
            | PatchError::TestFailed { pointer, .. } => Some(pointer),
            PatchError::Decode(_) | PatchError::Encode(_) => None,
        }
    }
}
