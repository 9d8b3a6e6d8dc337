//! json-delta — structural JSON diff and JSON Patch (RFC 6902).
//!
//! [`json_patch_diff`] turns two documents into a patch, [`json_patch`]
//! applies it, and [`patch_service`] wraps both behind a byte-in/byte-out
//! interface for callers that only deal in serialized JSON.

pub mod json_equal;
pub mod json_patch;
pub mod json_patch_diff;
pub mod patch_service;
pub mod json_cli;

pub use json_patch::{Op, Patch, PatchError};
pub use json_patch_diff::{diff, diff_with_options, ArrayStrategy, DiffOptions};
pub use patch_service::{apply_patch, create_patch, PatchService};
