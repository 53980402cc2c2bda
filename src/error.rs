//! Error type shared by every decoding component.
//!
//! [`CtcError`] is returned synchronously from the offending call.  Decoding
//! is pure, so none of these are retryable without changing the input.

use thiserror::Error;

// ---------------------------------------------------------------------------
// CtcError
// ---------------------------------------------------------------------------

/// All errors that can arise from vocabulary lookups and decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CtcError {
    /// A symbol that is not part of the vocabulary was looked up.
    #[error("unknown symbol: {0:?}")]
    UnknownSymbol(char),

    /// A decode index lies outside `[0, size)`.  Usually means the model
    /// and the vocabulary disagree.
    #[error("index {index} out of range for vocabulary of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// A probability table row does not have one column per vocabulary
    /// symbol.
    #[error("shape mismatch: expected {expected} columns, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Invalid construction parameters (empty alphabet, zero beam width …).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A probability table entry is negative, NaN or infinite.
    #[error("invalid probability {value} at row {row}, column {col}")]
    InvalidProbability { row: usize, col: usize, value: f64 },
}
