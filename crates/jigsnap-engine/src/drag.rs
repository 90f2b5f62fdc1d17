//! Drag policies.

use jigsnap_core::Axis;

use crate::id::PieceId;
use crate::puzzle::Puzzle;

/// Decides whether dragging a piece breaks its connections.
///
/// When a drag disconnects, the piece is detached and moved alone;
/// otherwise it is pushed together with its connected group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Disconnect only when the move does not pull against an existing
    /// connection on either axis.
    #[default]
    TryDisconnection,
    /// Always disconnect.
    ForceDisconnection,
    /// Never disconnect.
    ForceConnection,
}

impl DragMode {
    /// Whether dragging `piece` by `(dx, dy)` should disconnect it.
    pub fn drag_should_disconnect(self, puzzle: &Puzzle, piece: PieceId, dx: f64, dy: f64) -> bool {
        match self {
            DragMode::TryDisconnection => {
                let p = puzzle.piece(piece);
                puzzle.connector_for(piece, Axis::Horizontal).open_movement(p, dx)
                    && puzzle.connector_for(piece, Axis::Vertical).open_movement(p, dy)
            }
            DragMode::ForceDisconnection => true,
            DragMode::ForceConnection => false,
        }
    }
}
