//! Error types for the puzzle engine.

use std::error::Error;
use std::fmt;

use jigsnap_core::{Direction, StructureError};

use crate::id::PieceId;

/// A connection was requested between pieces that cannot connect.
///
/// Raised by the non-`try` connect operations when the pieces are not
/// close enough, their inserts do not match, or a connection requirement
/// rejected them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionError {
    /// The forward direction of the connector that refused.
    pub direction: Direction,
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "can not connect {}!", self.direction)
    }
}

impl Error for ConnectionError {}

/// Errors from puzzle settings validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Piece radius must be finite and positive on both axes.
    InvalidPieceSize {
        /// The offending radius component.
        value: f64,
    },
    /// Proximity must be finite and non-negative.
    InvalidProximity {
        /// The configured proximity.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPieceSize { value } => {
                write!(f, "piece radius must be finite and positive, got {value}")
            }
            Self::InvalidProximity { value } => {
                write!(f, "proximity must be finite and non-negative, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from puzzle and piece operations.
#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleError {
    /// Two pieces could not be connected.
    Connection(ConnectionError),
    /// A piece that already has a central anchor was centered again.
    ///
    /// Use `recenter_around` or `relocate_to` to move a placed piece.
    AlreadyCentered {
        /// The piece, when it belongs to a puzzle.
        piece: Option<PieceId>,
    },
    /// A persisted structure string could not be decoded.
    Structure(StructureError),
    /// No template was defined under the requested name.
    UnknownTemplate {
        /// The requested template name.
        name: String,
    },
    /// No piece carries the requested external id.
    UnknownPiece {
        /// The requested id, rendered as JSON.
        id: String,
    },
    /// Settings failed validation.
    Config(ConfigError),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(e) => write!(f, "{e}"),
            Self::AlreadyCentered { piece: Some(id) } => write!(
                f,
                "piece {id} has already been centered, use recenter_around instead"
            ),
            Self::AlreadyCentered { piece: None } => write!(
                f,
                "piece has already been centered, use recenter_around instead"
            ),
            Self::Structure(e) => write!(f, "invalid structure: {e}"),
            Self::UnknownTemplate { name } => write!(f, "unknown template '{name}'"),
            Self::UnknownPiece { id } => write!(f, "no piece with id {id}"),
            Self::Config(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl Error for PuzzleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(e) => Some(e),
            Self::Structure(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConnectionError> for PuzzleError {
    fn from(e: ConnectionError) -> Self {
        Self::Connection(e)
    }
}

impl From<StructureError> for PuzzleError {
    fn from(e: StructureError) -> Self {
        Self::Structure(e)
    }
}

impl From<ConfigError> for PuzzleError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_names_the_direction() {
        let e = ConnectionError {
            direction: Direction::Right,
        };
        assert_eq!(e.to_string(), "can not connect right!");
        let e = ConnectionError {
            direction: Direction::Down,
        };
        assert_eq!(e.to_string(), "can not connect down!");
    }

    #[test]
    fn puzzle_error_chains_its_source() {
        let e = PuzzleError::from(StructureError::InvalidLength { len: 2 });
        assert!(e.source().is_some());
        assert!(e.to_string().contains("4 chars"));
        assert!(PuzzleError::UnknownTemplate { name: "corner".into() }
            .source()
            .is_none());
    }
}
