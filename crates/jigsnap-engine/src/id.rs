//! Piece handles.

use std::fmt;

/// Handle to a piece inside its [`Puzzle`](crate::Puzzle).
///
/// `PieceId(n)` is the n-th piece registered in the puzzle. Neighbour links
/// are stored as `PieceId`s, never as references, so a puzzle is free to
/// hand out `&mut Piece` while the connection graph stays intact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl PieceId {
    /// The arena slot this handle points at.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PieceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
