//! Shuffling whole puzzles.

use jigsnap_core::Vector;
use jigsnap_engine::shuffler::{Grid, Noop, Padder, Random};
use jigsnap_engine::{Piece, Puzzle};
use jigsnap_test_utils::fixtures::{block, line_puzzle};

#[test]
fn noop_keeps_a_connected_puzzle_connected() {
    let (mut puzzle, _) = line_puzzle();
    puzzle.autoconnect();
    assert!(puzzle.connected());

    puzzle.shuffle_with(&mut Noop);
    assert_eq!(puzzle.len(), 4);
    assert!(puzzle.connected());
}

#[test]
fn noop_connects_a_disconnected_puzzle() {
    let (mut puzzle, _) = line_puzzle();
    assert!(!puzzle.connected());

    puzzle.shuffle_with(&mut Noop);
    assert!(puzzle.connected());
}

#[test]
fn random_shuffle_keeps_every_piece() {
    let (mut puzzle, _) = line_puzzle();
    puzzle.autoconnect();
    puzzle.shuffle(100.0, 100.0);
    assert_eq!(puzzle.len(), 4);
    assert_eq!(puzzle.points().len(), 4);

    let (mut puzzle, _) = line_puzzle();
    puzzle.shuffle_with(&mut Random::seeded(100.0, 100.0, 11));
    assert_eq!(puzzle.points().len(), 4);
}

#[test]
fn padding_breaks_every_link() {
    let mut puzzle = block(3, 2);
    assert!(puzzle.connected());

    puzzle.shuffle_with(&mut Padder::new(5.0, 3, 2));
    assert!(puzzle.pieces().iter().all(|p| !p.connected()));
    assert_eq!(puzzle.points()[4], (13.0, 13.0));
}

#[test]
fn grid_shuffle_permutes_positions() {
    let mut puzzle = block(2, 1);
    puzzle.shuffle_with(&mut Grid::seeded(0));
    let mut points = puzzle.points();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert_eq!(points, vec![(4.0, 4.0), (8.0, 4.0)]);
}

#[test]
fn closures_can_shuffle() {
    let (mut puzzle, _) = line_puzzle();
    let mut to_origin = |pieces: &[Piece]| vec![Vector::zero(); pieces.len()];
    puzzle.shuffle_with(&mut to_origin);
    assert!(puzzle.points().iter().all(|p| *p == (0.0, 0.0)));
}

#[test]
fn empty_puzzle_shuffles() {
    let mut puzzle = Puzzle::default();
    puzzle.shuffle(10.0, 10.0);
    assert!(puzzle.is_empty());
    assert!(puzzle.connected());
}
