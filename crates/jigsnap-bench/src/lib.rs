//! Benchmark profiles for the jigsnap puzzle engine.
//!
//! - [`reference_profile`]: a 20x20 grid (400 pieces), unconnected
//! - [`stress_profile`]: a 60x60 grid (3600 pieces), unconnected
//! - [`connected_profile`]: any grid, fully autoconnected

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use jigsnap_engine::{InsertSequence, Manufacturer, Puzzle};

/// Build a `width × height` puzzle with seeded random inserts.
///
/// # Panics
///
/// Never in practice: the default settings always validate.
pub fn grid_profile(width: usize, height: usize, seed: u64) -> Puzzle {
    Manufacturer::new()
        .with_dimensions(width, height)
        .with_inserts_generator(InsertSequence::random(Some(seed)))
        .build()
        .expect("default settings are valid")
}

/// 20x20 grid (400 pieces), unconnected.
pub fn reference_profile(seed: u64) -> Puzzle {
    grid_profile(20, 20, seed)
}

/// 60x60 grid (3600 pieces), unconnected.
pub fn stress_profile(seed: u64) -> Puzzle {
    grid_profile(60, 60, seed)
}

/// A `width × height` grid with every neighbour linked.
pub fn connected_profile(width: usize, height: usize, seed: u64) -> Puzzle {
    let mut puzzle = grid_profile(width, height, seed);
    puzzle.autoconnect();
    puzzle
}
