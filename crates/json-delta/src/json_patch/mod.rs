//! JSON Patch implementation (RFC 6902).
//!
//! # Operations
//!
//! `add`, `remove`, `replace`, `move`, `copy`, `test`.
//!
//! Patches apply transactionally: [`apply_patch`] either returns the fully
//! patched document or an error identifying the failing operation, and never
//! touches its input.

pub mod types;
pub mod apply;
pub mod codec;
pub mod util;

pub use types::{Fault, FaultKind, Op, Patch, PatchError, Path};
pub use apply::{apply_op, apply_patch, apply_patch_in_place};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
