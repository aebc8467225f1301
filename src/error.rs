//! Error type shared by the arrays and the value kinds
//!
//! Every fallible operation reports one of three broad kinds (see [`ErrorKind`]):
//! memory could not be obtained, text could not be parsed, or an index was out of
//! range. Failed operations never leave partial state behind.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::value::ValueKind;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Growth, deep copy or a heap-backed set could not obtain memory
    Allocation,
    /// Text could not be interpreted as the target value kind
    Format,
    /// An index argument was outside the valid range
    Range,
}

/// Error returned by array and value operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The allocator refused to grow a buffer
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Growth would exceed the configured item limit of the array
    #[error("cannot hold {requested} items, limit is {limit}")]
    CapacityLimit { requested: usize, limit: usize },

    /// Input text is not a valid representation of `kind`
    #[error("cannot parse {input:?} as {kind}")]
    Format { kind: ValueKind, input: String },

    /// Index outside `0..=len` (insertion) or `0..len` (access, removal)
    #[error("index {index} out of range for length {len}")]
    Range { index: usize, len: usize },
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Allocation(_) | Error::CapacityLimit { .. } => ErrorKind::Allocation,
            Error::Format { .. } => ErrorKind::Format,
            Error::Range { .. } => ErrorKind::Range,
        }
    }

    pub(crate) fn format(kind: ValueKind, input: &str) -> Self {
        Error::Format {
            kind,
            input: input.to_owned(),
        }
    }
}

/// Result type for array and value operations
pub type Result<T> = std::result::Result<T, Error>;
