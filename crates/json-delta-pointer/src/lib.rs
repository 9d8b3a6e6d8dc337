//! JSON Pointer (RFC 6901) utilities.
//!
//! Paths are handled as vectors of unescaped steps ([`Path`]). Pointer strings
//! are only used at the edges: parsing incoming patches and formatting
//! pointers for output and error messages.
//!
//! # Example
//!
//! ```
//! use json_delta_pointer::{parse_json_pointer, format_json_pointer, find};
//!
//! let path = parse_json_pointer("/foo/bar");
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//!
//! let pointer = format_json_pointer(&path);
//! assert_eq!(pointer, "/foo/bar");
//!
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! assert_eq!(find(&doc, &path), Ok(&serde_json::json!(42)));
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{ArrayStep, Path};

pub mod validate;
pub use validate::{validate_json_pointer, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    /// A key, index or `-` step names no existing node.
    #[error("NOT_FOUND")]
    NotFound,
    /// A step into an array is neither a canonical index nor `-`.
    #[error("INVALID_INDEX")]
    InvalidIndex,
    /// A step into a scalar, which has no children.
    #[error("NOT_CONTAINER")]
    NotContainer,
    #[error("NO_PARENT")]
    NoParent,
}

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_delta_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use json_delta_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into path components.
///
/// - Empty string returns the root path
/// - The leading `/` is stripped
/// - Each component is unescaped
///
/// This does not reject malformed pointers; run [`validate_json_pointer`]
/// first (or use [`try_parse_json_pointer`]) on untrusted input.
///
/// # Example
///
/// ```
/// use json_delta_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/"), vec![""]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/').map(unescape_component).collect()
}

/// Validate and parse a JSON Pointer string.
///
/// # Errors
///
/// Returns the [`ValidationError`] from [`validate_json_pointer`].
pub fn try_parse_json_pointer(pointer: &str) -> Result<Path, ValidationError> {
    validate_json_pointer(pointer)?;
    Ok(parse_json_pointer(pointer))
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use json_delta_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["foo".to_string(), "a/b".to_string()]), "/foo/a~1b");
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    let mut out = String::with_capacity(path.iter().map(|s| s.len() + 1).sum());
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if `child` lies strictly below `parent`.
///
/// # Example
///
/// ```
/// use json_delta_pointer::is_child;
///
/// let parent = vec!["foo".to_string()];
/// let child = vec!["foo".to_string(), "bar".to_string()];
/// assert!(is_child(&parent, &child));
/// assert!(!is_child(&child, &parent));
/// assert!(!is_child(&parent, &parent));
/// ```
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}

/// Split a path into its parent path and last step.
///
/// # Errors
///
/// Returns [`JsonPointerError::NoParent`] for the root path.
///
/// # Example
///
/// ```
/// use json_delta_pointer::split_last;
///
/// let path = vec!["a".to_string(), "b".to_string()];
/// let (parent, last) = split_last(&path).unwrap();
/// assert_eq!(parent, ["a".to_string()]);
/// assert_eq!(last, "b");
/// assert!(split_last(&[]).is_err());
/// ```
pub fn split_last(path: &[String]) -> Result<(&[String], &str), JsonPointerError> {
    match path.split_last() {
        Some((last, parent)) => Ok((parent, last.as_str())),
        None => Err(JsonPointerError::NoParent),
    }
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use json_delta_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    let bytes = index.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

/// Resolve one step below `node`.
fn child<'a>(node: &'a Value, step: &str) -> Result<&'a Value, JsonPointerError> {
    match node {
        Value::Object(map) => map.get(step).ok_or(JsonPointerError::NotFound),
        Value::Array(arr) => match ArrayStep::try_parse(step)? {
            ArrayStep::Index(idx) => arr.get(idx).ok_or(JsonPointerError::NotFound),
            ArrayStep::End => Err(JsonPointerError::NotFound),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(JsonPointerError::NotContainer)
        }
    }
}

fn child_mut<'a>(node: &'a mut Value, step: &str) -> Result<&'a mut Value, JsonPointerError> {
    match node {
        Value::Object(map) => map.get_mut(step).ok_or(JsonPointerError::NotFound),
        Value::Array(arr) => match ArrayStep::try_parse(step)? {
            ArrayStep::Index(idx) => arr.get_mut(idx).ok_or(JsonPointerError::NotFound),
            ArrayStep::End => Err(JsonPointerError::NotFound),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            Err(JsonPointerError::NotContainer)
        }
    }
}

/// Find a value in a JSON document by path.
///
/// The first step that fails decides the error, whatever its depth.
///
/// # Errors
///
/// [`JsonPointerError::NotContainer`] for a step into a scalar,
/// [`JsonPointerError::InvalidIndex`] for a non-index step into an array, and
/// [`JsonPointerError::NotFound`] for a missing key, an out-of-range index or
/// `-` (which never names an existing element).
///
/// # Example
///
/// ```
/// use json_delta_pointer::{find, JsonPointerError};
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": [1, 2]}, "n": 1});
/// assert_eq!(find(&doc, &["foo".into(), "bar".into(), "1".into()]), Ok(&json!(2)));
/// assert_eq!(find(&doc, &["missing".into()]), Err(JsonPointerError::NotFound));
/// let deep: Vec<String> = vec!["n".into(), "x".into(), "y".into()];
/// assert_eq!(find(&doc, &deep), Err(JsonPointerError::NotContainer));
/// ```
pub fn find<'a>(val: &'a Value, path: &[String]) -> Result<&'a Value, JsonPointerError> {
    path.iter().try_fold(val, |node, step| child(node, step))
}

/// Mutable counterpart of [`find`], with the same errors.
pub fn find_mut<'a>(
    val: &'a mut Value,
    path: &[String],
) -> Result<&'a mut Value, JsonPointerError> {
    let mut current = val;
    for step in path {
        current = child_mut(current, step)?;
    }
    Ok(current)
}
