//! Position-based validation through metadata.
//!
//! Pieces record where they belong under the `targetPosition` metadata key
//! (and optionally where they were last seen under `currentPosition`). The
//! conditions here compare those targets with the pieces' actual anchors.

use jigsnap_core::Vector;
use serde::Deserialize;
use serde_json::Value;

use crate::metadata::Metadata;
use crate::piece::Piece;
use crate::puzzle::Puzzle;
use crate::validator::{self, equal_diffs};

/// Metadata key for a piece's solved position.
pub const TARGET_POSITION: &str = "targetPosition";

/// Metadata key for a piece's last known position.
pub const CURRENT_POSITION: &str = "currentPosition";

/// Fill in spatial metadata, keeping values already present.
///
/// `currentPosition` falls back to `current`, then to a copy of the target.
pub fn initialize(metadata: &mut Metadata, target: Vector, current: Option<Vector>) {
    if read(metadata, TARGET_POSITION).is_none() {
        metadata.insert(TARGET_POSITION.into(), to_value(target));
    }
    if read(metadata, CURRENT_POSITION).is_none() {
        let current = current
            .or_else(|| read(metadata, TARGET_POSITION))
            .unwrap_or(target);
        metadata.insert(CURRENT_POSITION.into(), to_value(current));
    }
}

/// The target position recorded for `piece`.
pub fn target_position(piece: &Piece) -> Option<Vector> {
    read(piece.metadata(), TARGET_POSITION)
}

/// Pieces sit at their targets up to a common offset, and are connected.
pub fn solved(puzzle: &Puzzle) -> bool {
    relative_position(puzzle) && validator::connected(puzzle)
}

/// Every piece is offset from its target exactly as the head piece is.
pub fn relative_position(puzzle: &Puzzle) -> bool {
    let Some(head) = puzzle.head() else {
        return true;
    };
    let Some(diff0) = diff_to_target(puzzle.piece(head)) else {
        return false;
    };
    puzzle
        .pieces()
        .iter()
        .all(|piece| diff_to_target(piece).is_some_and(|d| equal_diffs(diff0, d)))
}

/// The piece is exactly at its target.
pub fn absolute_position(piece: &Piece) -> bool {
    match (piece.central_anchor(), target_position(piece)) {
        (Some(anchor), Some(target)) => anchor.as_vector().equal(&target, 0.0),
        _ => false,
    }
}

fn diff_to_target(piece: &Piece) -> Option<(f64, f64)> {
    let target = target_position(piece)?;
    let anchor = piece.central_anchor()?;
    Some(target.diff(&anchor.as_vector()))
}

fn read(metadata: &Metadata, key: &str) -> Option<Vector> {
    metadata
        .get(key)
        .and_then(|v| Vector::deserialize(v).ok())
}

fn to_value(v: Vector) -> Value {
    serde_json::json!({"x": v.x, "y": v.y})
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initialize_keeps_existing_values() {
        let mut metadata = Metadata::new();
        initialize(&mut metadata, Vector::new(1.0, 2.0), None);
        assert_eq!(
            Value::Object(metadata.clone()),
            json!({
                "targetPosition": {"x": 1.0, "y": 2.0},
                "currentPosition": {"x": 1.0, "y": 2.0}
            })
        );

        initialize(&mut metadata, Vector::new(9.0, 9.0), Some(Vector::new(8.0, 8.0)));
        assert_eq!(read(&metadata, TARGET_POSITION), Some(Vector::new(1.0, 2.0)));
        assert_eq!(read(&metadata, CURRENT_POSITION), Some(Vector::new(1.0, 2.0)));
    }

    #[test]
    fn initialize_uses_current_when_given() {
        let mut metadata = Metadata::new();
        initialize(&mut metadata, Vector::new(1.0, 2.0), Some(Vector::new(3.0, 4.0)));
        assert_eq!(read(&metadata, CURRENT_POSITION), Some(Vector::new(3.0, 4.0)));
    }

    #[test]
    fn absolute_position_needs_a_target() {
        let mut piece = Piece::new(Default::default(), Default::default());
        piece.locate_at(1.0, 1.0).unwrap();
        assert!(!absolute_position(&piece));
        initialize(piece.metadata_mut(), Vector::new(1.0, 1.0), None);
        assert!(absolute_position(&piece));
        piece.translate(0.5, 0.0, true);
        assert!(!absolute_position(&piece));
    }
}
