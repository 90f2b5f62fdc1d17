//! Standard puzzles.
//!
//! - [`line_puzzle`]: the four-piece puzzle with a corner, used by most
//!   connection and push scenarios.
//! - [`block`]: a manufactured, fully connected rectangle.

use jigsnap_core::{Insert, Structure};
use jigsnap_engine::{InsertSequence, Manufacturer, PieceConfig, PieceId, Puzzle, PuzzleSettings};

/// Pieces of [`line_puzzle`].
#[derive(Clone, Copy, Debug)]
pub struct LinePieces {
    pub a: PieceId,
    pub b: PieceId,
    pub c: PieceId,
    pub d: PieceId,
}

/// Four unconnected pieces with default settings (radius 2, proximity 1):
///
/// ```text
/// a(0,0) -T S- b(3,0) -T S- c(6,0)
///                              S
///                              T
///                            d(6,3)
/// ```
pub fn line_puzzle() -> (Puzzle, LinePieces) {
    let mut puzzle = Puzzle::default();
    let a = puzzle.new_piece(
        Structure::flat().with_right(Insert::Tab),
        PieceConfig::at((0.0, 0.0)),
    );
    let b = puzzle.new_piece(
        Structure::flat()
            .with_left(Insert::Slot)
            .with_right(Insert::Tab),
        PieceConfig::at((3.0, 0.0)),
    );
    let c = puzzle.new_piece(
        Structure::flat()
            .with_left(Insert::Slot)
            .with_right(Insert::Tab)
            .with_down(Insert::Slot),
        PieceConfig::at((6.0, 0.0)),
    );
    let d = puzzle.new_piece(
        Structure::flat().with_up(Insert::Tab),
        PieceConfig::at((6.0, 3.0)),
    );
    (puzzle, LinePieces { a, b, c, d })
}

/// A `width × height` manufactured puzzle with every neighbour linked.
///
/// Uses the `flipflop` generator and default settings, so pieces sit one
/// diameter (4 units) apart starting at (4, 4).
pub fn block(width: usize, height: usize) -> Puzzle {
    block_with(width, height, PuzzleSettings::default())
}

/// [`block`] with explicit settings.
pub fn block_with(width: usize, height: usize, settings: PuzzleSettings) -> Puzzle {
    let mut puzzle = match Manufacturer::new()
        .with_dimensions(width, height)
        .with_inserts_generator(InsertSequence::flipflop())
        .with_settings(settings)
        .build()
    {
        Ok(puzzle) => puzzle,
        Err(e) => panic!("fixture settings rejected: {e}"),
    };
    puzzle.autoconnect();
    puzzle
}
