//! Validation functions for JSON Pointer.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("POINTER_INVALID: {0:?} must be empty or start with '/'")]
    PointerInvalid(String),
    #[error("POINTER_ESCAPE_INVALID: {0:?} contains '~' not followed by '0' or '1'")]
    InvalidEscape(String),
}

/// Validate a JSON Pointer string.
///
/// # Errors
///
/// Returns an error if:
/// - The pointer is non-empty but doesn't start with `/`
/// - A `~` is not part of a `~0` or `~1` escape sequence
///
/// # Example
///
/// ```
/// use json_delta_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();  // Root is valid
/// validate_json_pointer("/foo/bar").unwrap();  // Valid absolute pointer
/// validate_json_pointer("foo").unwrap_err();  // Missing leading /
/// validate_json_pointer("/a~2").unwrap_err();  // Bad escape
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(ValidationError::PointerInvalid(pointer.to_string()));
    }
    let mut bytes = pointer.bytes();
    while let Some(b) = bytes.next() {
        if b == b'~' && !matches!(bytes.next(), Some(b'0' | b'1')) {
            return Err(ValidationError::InvalidEscape(pointer.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_root_and_absolute_pointers() {
        assert!(validate_json_pointer("").is_ok());
        assert!(validate_json_pointer("/").is_ok());
        assert!(validate_json_pointer("/a/b/0/-").is_ok());
        assert!(validate_json_pointer("/a~0b/c~1d").is_ok());
    }

    #[test]
    fn rejects_relative_pointers() {
        assert_eq!(
            validate_json_pointer("a/b"),
            Err(ValidationError::PointerInvalid("a/b".to_string()))
        );
        assert!(validate_json_pointer("#/a").is_err());
    }

    #[test]
    fn rejects_dangling_and_unknown_escapes() {
        assert!(matches!(
            validate_json_pointer("/a~"),
            Err(ValidationError::InvalidEscape(_))
        ));
        assert!(matches!(
            validate_json_pointer("/a~2b"),
            Err(ValidationError::InvalidEscape(_))
        ));
    }

    #[test]
    fn multibyte_keys_are_fine() {
        assert!(validate_json_pointer("/ключ/日本").is_ok());
    }
}
