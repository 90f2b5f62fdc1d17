//! Error types for the core primitives.

use std::error::Error;
use std::fmt;

/// Errors from decoding a [`Structure`](crate::Structure) string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructureError {
    /// The encoded structure was not exactly four characters long.
    InvalidLength {
        /// Number of characters actually supplied.
        len: usize,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => {
                write!(f, "structure string must be 4 chars long, got {len}")
            }
        }
    }
}

impl Error for StructureError {}
