//! The per-axis connection protocol.
//!
//! A [`Connector`] knows which edge of a piece faces forward on its axis
//! (right for horizontal, down for vertical) and which faces backward. Two
//! pieces can connect along an axis when the forward anchor of the first is
//! within proximity of the backward anchor of the second, their facing
//! inserts match, and the optional [`Requirement`] accepts them.
//!
//! Connecting first *attracts* the pieces: one of them (the iron) is pushed
//! so that the facing anchors coincide exactly. Because the correction is a
//! push, the iron's whole connected group follows it.

use std::fmt;
use std::rc::Rc;

use jigsnap_core::{Axis, Direction};
use tracing::debug;

use crate::error::ConnectionError;
use crate::id::PieceId;
use crate::piece::Piece;
use crate::puzzle::Puzzle;

/// An extra predicate a connector consults before allowing a connection.
pub type Requirement = Rc<dyn Fn(&Piece, &Piece) -> bool>;

/// Attraction, matching and connection along one axis.
#[derive(Clone)]
pub struct Connector {
    axis: Axis,
    forward: Direction,
    backward: Direction,
    requirement: Option<Requirement>,
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("axis", &self.axis)
            .field("forward", &self.forward)
            .field("backward", &self.backward)
            .field("has_requirement", &self.requirement.is_some())
            .finish()
    }
}

impl Connector {
    /// Create a connector for `axis` with the given facing directions.
    pub fn new(axis: Axis, forward: Direction, backward: Direction) -> Self {
        Self {
            axis,
            forward,
            backward,
            requirement: None,
        }
    }

    /// The canonical horizontal connector: `x`, right, left.
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal, Direction::Right, Direction::Left)
    }

    /// The canonical vertical connector: `y`, down, up.
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical, Direction::Down, Direction::Up)
    }

    /// The canonical connector for `axis`.
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::horizontal(),
            Axis::Vertical => Self::vertical(),
        }
    }

    /// The axis this connector works on.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The edge facing increasing coordinates.
    pub fn forward(&self) -> Direction {
        self.forward
    }

    /// The edge facing decreasing coordinates.
    pub fn backward(&self) -> Direction {
        self.backward
    }

    /// The attached requirement, if any.
    pub fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }

    /// Install a requirement, replacing any previous one.
    pub fn attach_requirement(&mut self, requirement: impl Fn(&Piece, &Piece) -> bool + 'static) {
        self.requirement = Some(Rc::new(requirement));
    }

    /// Install an already shared requirement.
    pub fn attach_shared_requirement(&mut self, requirement: Requirement) {
        self.requirement = Some(requirement);
    }

    /// Remove the requirement. Every close, matching pair connects again.
    pub fn clear_requirement(&mut self) {
        self.requirement = None;
    }

    /// Whether `one`'s forward anchor is within `proximity` of `other`'s
    /// backward anchor on both axes. Unplaced pieces are never close.
    pub fn close_to(&self, one: &Piece, other: &Piece, proximity: f64) -> bool {
        match (one.anchor(self.forward), other.anchor(self.backward)) {
            (Some(forward), Some(backward)) => forward.close_to(&backward, proximity),
            _ => false,
        }
    }

    /// Whether `one`'s forward insert locks with `other`'s backward insert.
    pub fn matches(&self, one: &Piece, other: &Piece) -> bool {
        one.insert(self.forward).matches(other.insert(self.backward))
    }

    /// Whether the requirement, if any, accepts the pair.
    pub fn meets_requirement(&self, one: &Piece, other: &Piece) -> bool {
        self.requirement.as_ref().is_none_or(|r| r(one, other))
    }

    /// Whether `one` can connect forward with `other`.
    pub fn can_connect_with(&self, one: &Piece, other: &Piece, proximity: f64) -> bool {
        self.close_to(one, other, proximity)
            && self.matches(one, other)
            && self.meets_requirement(one, other)
    }

    /// Whether moving `one` by `delta` along this axis leaves its
    /// connections intact.
    pub fn open_movement(&self, one: &Piece, delta: f64) -> bool {
        delta == 0.0
            || (delta > 0.0 && one.connection(self.forward).is_none())
            || (delta < 0.0 && one.connection(self.backward).is_none())
    }

    /// Snap two pieces together by pushing one of them.
    ///
    /// With `back == false` the iron (the piece that moves) is `other` and
    /// the magnet is `one`; `back == true` swaps them. The facing anchors
    /// are chosen from the pieces' relative position on this axis, so the
    /// iron never ends up overlapping the magnet.
    pub fn attract(&self, puzzle: &mut Puzzle, one: PieceId, other: PieceId, back: bool) {
        let (iron, magnet) = if back { (one, other) } else { (other, one) };
        let (iron_piece, magnet_piece) = (puzzle.piece(iron), puzzle.piece(magnet));
        let (Some(iron_center), Some(magnet_center)) =
            (iron_piece.central_anchor(), magnet_piece.central_anchor())
        else {
            return;
        };

        let magnet_ahead = self.axis.at_vector(&magnet_center.as_vector())
            > self.axis.at_vector(&iron_center.as_vector());
        let (magnet_side, iron_side) = if magnet_ahead {
            (self.backward, self.forward)
        } else {
            (self.forward, self.backward)
        };
        let (Some(magnet_anchor), Some(iron_anchor)) =
            (magnet_piece.anchor(magnet_side), iron_piece.anchor(iron_side))
        else {
            return;
        };

        let (dx, dy) = magnet_anchor.diff(&iron_anchor);
        puzzle.push(iron, dx, dy, false);
    }

    /// Connect `one` forward with `other`.
    ///
    /// Fails when [`can_connect_with`](Connector::can_connect_with) does.
    /// Connecting pieces that are already linked this way is a no-op;
    /// otherwise the pair is attracted, linked on both sides and `one`
    /// fires its connect listeners.
    pub fn connect_with(
        &self,
        puzzle: &mut Puzzle,
        one: PieceId,
        other: PieceId,
        proximity: f64,
        back: bool,
    ) -> Result<(), ConnectionError> {
        if !self.can_connect_with(puzzle.piece(one), puzzle.piece(other), proximity) {
            return Err(ConnectionError {
                direction: self.forward,
            });
        }
        if puzzle.piece(one).connection(self.forward) == Some(other) {
            return Ok(());
        }
        self.attract(puzzle, other, one, back);
        puzzle.link(one, other, self.forward);
        debug!(%one, %other, direction = %self.forward, "pieces connected");
        puzzle.fire_connect(one, other);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceConfig;
    use jigsnap_core::{Insert, Structure, Vector};

    fn placed(structure: Structure, x: f64, y: f64) -> Piece {
        let mut piece = Piece::new(structure, PieceConfig::default());
        piece
            .locate_at(x, y)
            .expect("fresh pieces are not centered");
        piece
    }

    #[test]
    fn factories_pick_canonical_directions() {
        let h = Connector::horizontal();
        assert_eq!(
            (h.axis(), h.forward(), h.backward()),
            (Axis::Horizontal, Direction::Right, Direction::Left)
        );
        let v = Connector::for_axis(Axis::Vertical);
        assert_eq!(
            (v.axis(), v.forward(), v.backward()),
            (Axis::Vertical, Direction::Down, Direction::Up)
        );
    }

    #[test]
    fn close_to_uses_facing_anchors() {
        let h = Connector::horizontal();
        let a = placed(Structure::flat().with_right(Insert::Tab), 0.0, 0.0);
        let b = placed(Structure::flat().with_left(Insert::Slot), 3.0, 0.0);
        let far = placed(Structure::flat().with_left(Insert::Slot), 5.5, 0.0);
        assert!(h.close_to(&a, &b, 1.0));
        assert!(!h.close_to(&b, &a, 1.0));
        assert!(!h.close_to(&a, &far, 1.0));
    }

    #[test]
    fn unplaced_pieces_are_never_close() {
        let h = Connector::horizontal();
        let a = Piece::new(Structure::flat().with_right(Insert::Tab), PieceConfig::default());
        let b = placed(Structure::flat().with_left(Insert::Slot), 3.0, 0.0);
        assert!(!h.close_to(&a, &b, 100.0));
    }

    #[test]
    fn requirement_gates_connection() {
        let mut h = Connector::horizontal();
        let a = placed(Structure::flat().with_right(Insert::Tab), 0.0, 0.0);
        let b = placed(Structure::flat().with_left(Insert::Slot), 4.0, 0.0);
        assert!(h.can_connect_with(&a, &b, 1.0));

        h.attach_requirement(|one, _| one.central_anchor().is_some_and(|c| c.x > 10.0));
        assert!(!h.can_connect_with(&a, &b, 1.0));

        h.clear_requirement();
        assert!(h.can_connect_with(&a, &b, 1.0));
    }

    #[test]
    fn open_movement_follows_delta_sign() {
        let h = Connector::horizontal();
        let a = placed(Structure::flat(), 0.0, 0.0);
        assert!(h.open_movement(&a, 0.0));
        assert!(h.open_movement(&a, 3.0));
        assert!(h.open_movement(&a, -3.0));
        assert_eq!(
            a.anchor(Direction::Right).map(|x| x.as_vector()),
            Some(Vector::new(2.0, 0.0))
        );
    }
}
