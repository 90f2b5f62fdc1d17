//! Edge-triggered puzzle validation.
//!
//! A [`Validator`] wraps a condition over a puzzle (or over each of its
//! pieces) and remembers the last result. [`Validator::validate`] fires the
//! valid listeners only on a transition from not-valid to valid, so calling
//! it after every move reports a solved puzzle exactly once.

use std::fmt;

use jigsnap_core::pair::{self, Pair};

use crate::piece::Piece;
use crate::puzzle::Puzzle;

/// Tolerance used when comparing position differences.
pub const DIFF_DELTA: f64 = 0.01;

/// Called when a puzzle becomes valid.
pub type ValidationListener = Box<dyn FnMut(&Puzzle)>;

/// What a validator checks.
pub enum Condition {
    /// Every piece must satisfy the predicate.
    Piece(Box<dyn Fn(&Piece) -> bool>),
    /// The puzzle as a whole must satisfy the predicate.
    Puzzle(Box<dyn Fn(&Puzzle) -> bool>),
    /// Never valid.
    Null,
}

/// A condition plus its cached result and listeners.
pub struct Validator {
    condition: Condition,
    listeners: Vec<ValidationListener>,
    valid: Option<bool>,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.condition {
            Condition::Piece(_) => "piece",
            Condition::Puzzle(_) => "puzzle",
            Condition::Null => "null",
        };
        f.debug_struct("Validator")
            .field("condition", &kind)
            .field("listeners", &self.listeners.len())
            .field("valid", &self.valid)
            .finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::null()
    }
}

impl Validator {
    fn with_condition(condition: Condition) -> Self {
        Self {
            condition,
            listeners: Vec::new(),
            valid: None,
        }
    }

    /// Valid when every piece satisfies `f`.
    pub fn piece(f: impl Fn(&Piece) -> bool + 'static) -> Self {
        Self::with_condition(Condition::Piece(Box::new(f)))
    }

    /// Valid when the puzzle satisfies `f`.
    pub fn puzzle(f: impl Fn(&Puzzle) -> bool + 'static) -> Self {
        Self::with_condition(Condition::Puzzle(Box::new(f)))
    }

    /// Never valid. The default for new puzzles.
    pub fn null() -> Self {
        Self::with_condition(Condition::Null)
    }

    /// Whether this is the never-valid validator.
    pub fn is_null(&self) -> bool {
        matches!(self.condition, Condition::Null)
    }

    /// Evaluate the condition without touching the cache.
    pub fn is_valid(&self, puzzle: &Puzzle) -> bool {
        match &self.condition {
            Condition::Piece(f) => puzzle.pieces().iter().all(|p| f(p)),
            Condition::Puzzle(f) => f(puzzle),
            Condition::Null => false,
        }
    }

    /// Re-evaluate and cache the result without firing listeners.
    pub fn update_validity(&mut self, puzzle: &Puzzle) {
        self.record(self.is_valid(puzzle));
    }

    /// Re-evaluate, firing listeners if the puzzle just became valid.
    pub fn validate(&mut self, puzzle: &Puzzle) {
        if self.record(self.is_valid(puzzle)) {
            for listener in self.listeners.iter_mut() {
                listener(puzzle);
            }
        }
    }

    /// Cache `valid`. Returns whether this is a not-valid to valid transition.
    pub(crate) fn record(&mut self, valid: bool) -> bool {
        let was_valid = self.valid == Some(true);
        self.valid = Some(valid);
        valid && !was_valid
    }

    pub(crate) fn take_listeners(&mut self) -> Vec<ValidationListener> {
        std::mem::take(&mut self.listeners)
    }

    pub(crate) fn restore_listeners(&mut self, mut listeners: Vec<ValidationListener>) {
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    /// Register a listener for the not-valid to valid transition.
    pub fn on_valid(&mut self, f: impl FnMut(&Puzzle) + 'static) {
        self.listeners.push(Box::new(f));
    }

    /// The cached result, `None` before the first evaluation.
    pub fn valid(&self) -> Option<bool> {
        self.valid
    }
}

// ── Conditions ──────────────────────────────────────────────────

/// Every piece is linked to at least one neighbour.
pub fn connected(puzzle: &Puzzle) -> bool {
    puzzle.connected()
}

/// Whether two differences agree within [`DIFF_DELTA`].
pub fn equal_diffs(one: Pair, other: Pair) -> bool {
    pair::equal(one.0, one.1, other.0, other.1, DIFF_DELTA)
}

/// The puzzle's [`refs`](Puzzle::refs) equal `expected` up to a common offset.
///
/// `expected[i]` is compared with the i-th piece. A puzzle with an unplaced
/// piece, or with a different number of pieces, never matches.
pub fn relative_refs(expected: Vec<Pair>) -> impl Fn(&Puzzle) -> bool {
    move |puzzle| {
        let refs = puzzle.refs();
        if refs.len() != puzzle.len() || refs.len() != expected.len() {
            return false;
        }
        let diff = |(x, y): Pair, (ex, ey): Pair| pair::diff(x, y, ex, ey);
        let Some(diff0) = refs.first().zip(expected.first()).map(|(r, e)| diff(*r, *e)) else {
            return true;
        };
        refs.iter()
            .zip(&expected)
            .all(|(r, e)| equal_diffs(diff0, diff(*r, *e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    fn two_piece_puzzle() -> Puzzle {
        let mut puzzle = Puzzle::default();
        puzzle.new_piece("----".parse().unwrap(), PieceConfig::at((0.0, 0.0)));
        puzzle.new_piece("----".parse().unwrap(), PieceConfig::at((4.0, 0.0)));
        puzzle
    }

    #[test]
    fn null_validator_is_never_valid() {
        let puzzle = two_piece_puzzle();
        let mut v = Validator::null();
        assert!(v.is_null());
        assert!(!v.is_valid(&puzzle));
        v.validate(&puzzle);
        assert_eq!(v.valid(), Some(false));
    }

    #[test]
    fn piece_validator_checks_every_piece() {
        let puzzle = two_piece_puzzle();
        assert!(Validator::piece(|p| p.central_anchor().is_some()).is_valid(&puzzle));
        assert!(!Validator::piece(|p| p.is_at(0.0, 0.0)).is_valid(&puzzle));
    }

    #[test]
    fn listeners_fire_only_on_rising_edge() {
        let puzzle = two_piece_puzzle();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut v = Validator::puzzle(|p| p.pieces().len() == 2);
        v.on_valid(move |_| counter.set(counter.get() + 1));

        assert_eq!(v.valid(), None);
        v.validate(&puzzle);
        v.validate(&puzzle);
        v.validate(&puzzle);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn update_validity_does_not_fire() {
        let puzzle = two_piece_puzzle();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let mut v = Validator::puzzle(|_| true);
        v.on_valid(move |_| flag.set(true));
        v.update_validity(&puzzle);
        assert_eq!(v.valid(), Some(true));
        v.validate(&puzzle);
        assert!(!fired.get());
    }

    #[test]
    fn relative_refs_ignore_common_offset() {
        let puzzle = two_piece_puzzle();
        assert!(relative_refs(vec![(0.0, 0.0), (1.0, 0.0)])(&puzzle));
        assert!(relative_refs(vec![(5.0, 5.0), (6.0, 5.0)])(&puzzle));
        assert!(relative_refs(vec![(5.0, 5.0), (6.005, 5.0)])(&puzzle));
        assert!(!relative_refs(vec![(0.0, 0.0), (0.0, 1.0)])(&puzzle));
        assert!(!relative_refs(vec![(0.0, 0.0)])(&puzzle));
    }

    #[test]
    fn relative_refs_reject_unplaced_pieces() {
        let mut puzzle = two_piece_puzzle();
        puzzle.new_piece("----".parse().unwrap(), PieceConfig::default());
        assert_eq!(puzzle.refs().len(), 2);
        assert!(!relative_refs(vec![(0.0, 0.0), (1.0, 0.0)])(&puzzle));
        assert!(!relative_refs(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])(&puzzle));
    }

    #[test]
    fn equal_diffs_tolerance() {
        assert!(equal_diffs((1.0, 1.0), (1.005, 0.995)));
        assert!(!equal_diffs((1.0, 1.0), (1.02, 1.0)));
    }
}
