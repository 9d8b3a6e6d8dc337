//! Type definitions for JSON Pointer.

use crate::JsonPointerError;

/// A JSON Pointer path. The empty path addresses the document root.
///
/// Steps are always stored unescaped. Whether a step is an object key or an
/// array index is decided by the container it is applied to.
pub type Path = Vec<String>;

/// A path step interpreted against an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStep {
    /// A position inside (or one past the end of) the array.
    Index(usize),
    /// The `-` marker: the position after the last element.
    End,
}

impl ArrayStep {
    /// Interpret `step` as an array position.
    ///
    /// # Errors
    ///
    /// [`JsonPointerError::InvalidIndex`] for anything that is neither `-`
    /// nor a canonical decimal index (no sign, no leading zeros). A canonical
    /// index too large for `usize` cannot exist in any array and is
    /// [`JsonPointerError::NotFound`].
    pub fn try_parse(step: &str) -> Result<Self, JsonPointerError> {
        if step == "-" {
            return Ok(ArrayStep::End);
        }
        if !crate::is_valid_index(step) {
            return Err(JsonPointerError::InvalidIndex);
        }
        step.parse()
            .map(ArrayStep::Index)
            .map_err(|_| JsonPointerError::NotFound)
    }

    /// Resolve to a concrete position in an array of length `len`.
    pub fn position(self, len: usize) -> usize {
        match self {
            ArrayStep::Index(i) => i,
            ArrayStep::End => len,
        }
    }
}
