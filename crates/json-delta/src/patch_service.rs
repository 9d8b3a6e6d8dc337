//! Byte-level façade over the differ and the applier.
//!
//! Callers hand over serialized JSON and get serialized JSON back. Inputs are
//! fully decoded before any diff or apply work starts, so a decode failure
//! never leaves partial output behind.

use serde_json::Value;
use tracing::debug;

use crate::json_patch::{
    apply_patch as apply_ops, from_json_patch, to_json_patch, Patch, PatchError,
};
use crate::json_patch_diff::{diff_with_options, DiffOptions};

/// Creates and applies JSON Patches over UTF-8 JSON bytes.
///
/// Holds no state besides its [`DiffOptions`], so it can live in a `static`
/// and be shared across threads.
///
/// # Example
///
/// ```
/// use json_delta::patch_service::PatchService;
///
/// let service = PatchService::default();
/// let patch = service.create_patch(br#"{"a":1}"#, br#"{"a":2}"#).unwrap();
/// assert_eq!(patch, br#"[{"op":"replace","path":"/a","value":2}]"#);
///
/// let doc = service.apply_patch(br#"{"a":1}"#, &patch).unwrap();
/// assert_eq!(doc, br#"{"a":2}"#);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchService {
    options: DiffOptions,
}

impl PatchService {
    pub const fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Operations that turn `source_json` into `target_json`.
    ///
    /// # Errors
    ///
    /// [`PatchError::Decode`] if either input is not valid JSON.
    pub fn diff(&self, source_json: &[u8], target_json: &[u8]) -> Result<Patch, PatchError> {
        let source = decode_document("source", source_json)?;
        let target = decode_document("target", target_json)?;
        Ok(diff_with_options(&source, &target, &self.options))
    }

    /// Document produced by applying `patch_json` to `source_json`.
    ///
    /// # Errors
    ///
    /// [`PatchError::Decode`] for malformed input, or the error of the first
    /// operation that failed.
    pub fn apply(&self, source_json: &[u8], patch_json: &[u8]) -> Result<Value, PatchError> {
        let source = decode_document("source", source_json)?;
        let ops = from_json_patch(&decode_document("patch", patch_json)?)?;
        let result = apply_ops(&source, &ops)?;
        debug!(ops = ops.len(), "patch applied");
        Ok(result)
    }

    /// Serialized patch that turns `source_json` into `target_json`.
    ///
    /// # Errors
    ///
    /// [`PatchError::Decode`] if either input is not valid JSON.
    pub fn create_patch(
        &self,
        source_json: &[u8],
        target_json: &[u8],
    ) -> Result<Vec<u8>, PatchError> {
        let ops = self.diff(source_json, target_json)?;
        debug!(ops = ops.len(), "patch created");
        encode(&to_json_patch(&ops))
    }

    /// Applies `patch_json` to `source_json` and serializes the result.
    ///
    /// # Errors
    ///
    /// Same as [`PatchService::apply`].
    pub fn apply_patch(
        &self,
        source_json: &[u8],
        patch_json: &[u8],
    ) -> Result<Vec<u8>, PatchError> {
        encode(&self.apply(source_json, patch_json)?)
    }
}

static DEFAULT_SERVICE: PatchService = PatchService::with_options(DiffOptions {
    arrays: crate::json_patch_diff::ArrayStrategy::Replace,
});

/// [`PatchService::create_patch`] with default options.
pub fn create_patch(source_json: &[u8], target_json: &[u8]) -> Result<Vec<u8>, PatchError> {
    DEFAULT_SERVICE.create_patch(source_json, target_json)
}

/// [`PatchService::apply_patch`] with default options.
pub fn apply_patch(source_json: &[u8], patch_json: &[u8]) -> Result<Vec<u8>, PatchError> {
    DEFAULT_SERVICE.apply_patch(source_json, patch_json)
}

/// Decode errors name the input they came from.
fn decode_document(label: &str, bytes: &[u8]) -> Result<Value, PatchError> {
    serde_json::from_slice(bytes).map_err(|e| PatchError::Decode(format!("{label}: {e}")))
}

fn encode(value: &Value) -> Result<Vec<u8>, PatchError> {
    serde_json::to_vec(value).map_err(|e| PatchError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_patch_diff::ArrayStrategy;
    use serde_json::json;

    fn to_value(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn service_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<PatchService>();
        assert_eq!(PatchService::default().options().arrays, ArrayStrategy::Replace);
    }

    #[test]
    fn create_then_apply() {
        let src = br#"{"a":[1,2],"b":{"c":true}}"#;
        let dst = br#"{"a":[1,2,3],"b":{}}"#;
        let patch = create_patch(src, dst).unwrap();
        assert_eq!(to_value(&apply_patch(src, &patch).unwrap()), to_value(dst));
    }

    #[test]
    fn options_select_array_strategy() {
        let lcs = DiffOptions::default().with_arrays(ArrayStrategy::Lcs);
        let service = PatchService::with_options(lcs);
        let patch = service.create_patch(b"[1,2]", b"[1,2,3]").unwrap();
        assert_eq!(to_value(&patch), json!([{"op": "add", "path": "/2", "value": 3}]));
        let patch = create_patch(b"[1,2]", b"[1,2,3]").unwrap();
        assert_eq!(to_value(&patch), json!([{"op": "replace", "path": "", "value": [1, 2, 3]}]));
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        assert!(matches!(create_patch(b"{", b"{}"), Err(PatchError::Decode(_))));
        assert!(matches!(create_patch(b"{}", b"nope"), Err(PatchError::Decode(_))));
        assert!(matches!(apply_patch(b"{}", b"[{]"), Err(PatchError::Decode(_))));
        assert!(matches!(apply_patch(b"{}", br#"{"op":"add"}"#), Err(PatchError::Decode(_))));
    }

    #[test]
    fn decode_errors_name_the_input() {
        let service = PatchService::default();
        let messages = [
            service.diff(b"{", b"{}").unwrap_err().to_string(),
            service.diff(b"{}", b"{").unwrap_err().to_string(),
            service.apply(b"{}", b"[").unwrap_err().to_string(),
        ];
        assert!(messages[0].starts_with("DECODE: source:"), "{}", messages[0]);
        assert!(messages[1].starts_with("DECODE: target:"), "{}", messages[1]);
        assert!(messages[2].starts_with("DECODE: patch:"), "{}", messages[2]);
    }

    #[test]
    fn value_and_byte_entry_points_agree() {
        let service = PatchService::default();
        let (src, dst) = (br#"{"a":[1],"b":1}"#, br#"{"a":[2]}"#);
        let ops = service.diff(src, dst).unwrap();
        assert_eq!(to_value(&service.create_patch(src, dst).unwrap()), to_json_patch(&ops));
        let patch = service.create_patch(src, dst).unwrap();
        assert_eq!(service.apply(src, &patch).unwrap(), to_value(dst));
    }

    #[test]
    fn apply_reports_operation_failure() {
        let patch = br#"[{"op":"test","path":"/a","value":2}]"#;
        let err = apply_patch(br#"{"a":1}"#, patch).unwrap_err();
        assert_eq!(err, PatchError::TestFailed { index: 0, pointer: "/a".to_string() });
    }
}
