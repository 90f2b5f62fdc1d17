//! Strategies that scatter pieces.
//!
//! A [`Shuffler`] looks at the pieces in registration order and returns one
//! target position per piece. It never moves anything itself; see
//! [`Puzzle::shuffle_with`](crate::Puzzle::shuffle_with). Unplaced pieces
//! are treated as sitting at the origin.
//!
//! Randomized strategies own a [`ChaCha8Rng`] and offer a `seeded`
//! constructor for reproducible output.

use indexmap::IndexMap;
use jigsnap_core::{Anchor, Vector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::piece::Piece;

/// Computes index-aligned target positions for a set of pieces.
pub trait Shuffler {
    /// One target per piece, in the same order.
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector>;
}

impl<F> Shuffler for F
where
    F: FnMut(&[Piece]) -> Vec<Vector>,
{
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        self(pieces)
    }
}

fn entropy() -> ChaCha8Rng {
    ChaCha8Rng::from_rng(&mut rand::rng())
}

fn positions(pieces: &[Piece]) -> Vec<Vector> {
    pieces
        .iter()
        .map(|p| p.central_anchor().map_or(Vector::zero(), |a| a.as_vector()))
        .collect()
}

// ── Random ──────────────────────────────────────────────────────

/// Uniform positions in `[0, max_x] × [0, max_y]`.
#[derive(Clone, Debug)]
pub struct Random {
    max: Vector,
    rng: ChaCha8Rng,
}

impl Random {
    /// Seeded from the thread-local generator.
    pub fn new(max_x: f64, max_y: f64) -> Self {
        Self {
            max: Vector::new(max_x, max_y),
            rng: entropy(),
        }
    }

    /// Reproducible variant.
    pub fn seeded(max_x: f64, max_y: f64, seed: u64) -> Self {
        Self {
            max: Vector::new(max_x, max_y),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for Random {
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        pieces
            .iter()
            .map(|_| Anchor::at_random(&mut self.rng, self.max.x, self.max.y).as_vector())
            .collect()
    }
}

// ── Grid ────────────────────────────────────────────────────────

/// Permutes the current positions among all pieces.
#[derive(Clone, Debug)]
pub struct Grid {
    rng: ChaCha8Rng,
}

impl Grid {
    /// Seeded from the thread-local generator.
    pub fn new() -> Self {
        Self { rng: entropy() }
    }

    /// Reproducible variant.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for Grid {
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        let mut destinations = positions(pieces);
        let len = destinations.len();
        for i in 0..len {
            let j = self.rng.random_range(0..len);
            destinations.swap(i, j);
        }
        destinations
    }
}

// ── Columns ─────────────────────────────────────────────────────

/// Permutes `y` among pieces sharing the same `x`.
#[derive(Clone, Debug)]
pub struct Columns {
    rng: ChaCha8Rng,
}

impl Columns {
    /// Seeded from the thread-local generator.
    pub fn new() -> Self {
        Self { rng: entropy() }
    }

    /// Reproducible variant.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for Columns {
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        let mut destinations = positions(pieces);
        let mut columns: IndexMap<u64, Vec<usize>> = IndexMap::new();
        for (index, destination) in destinations.iter().enumerate() {
            // -0.0 and 0.0 share a column
            let key = (destination.x + 0.0).to_bits();
            columns.entry(key).or_default().push(index);
        }
        for column in columns.values() {
            for &i in column {
                let j = column[self.rng.random_range(0..column.len())];
                let (a, b) = (destinations[i].y, destinations[j].y);
                destinations[i].y = b;
                destinations[j].y = a;
            }
        }
        destinations
    }
}

// ── Line ────────────────────────────────────────────────────────

/// Lays the pieces on the `y = 0` line.
///
/// Pieces left of the first column boundary take random slots among the
/// first positions; the rest take random slots among the remaining ones.
/// Slots are spaced by the column width, or by the first piece's diameter
/// when every piece shares one column.
#[derive(Clone, Debug)]
pub struct Line {
    rng: ChaCha8Rng,
}

impl Line {
    /// Seeded from the thread-local generator.
    pub fn new() -> Self {
        Self { rng: entropy() }
    }

    /// Reproducible variant.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for Line {
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        let mut destinations = positions(pieces);
        let Some(first) = pieces.first() else {
            return destinations;
        };

        let min_x = destinations.iter().map(|d| d.x).fold(f64::INFINITY, f64::min);
        let max_x = destinations.iter().map(|d| d.x).fold(f64::NEG_INFINITY, f64::max);
        let mut xs: Vec<u64> = destinations.iter().map(|d| (d.x + 0.0).to_bits()).collect();
        xs.sort_unstable();
        xs.dedup();
        let width = if xs.len() > 1 {
            (max_x - min_x) / (xs.len() - 1) as f64
        } else {
            first.diameter().x
        };
        let pivot = min_x + width / 2.0;

        let split = destinations.iter().filter(|d| d.x < pivot).count();
        let mut init: Vec<f64> = (0..split).map(|k| k as f64 * width).collect();
        let mut tail: Vec<f64> = (split..destinations.len())
            .map(|k| k as f64 * width)
            .collect();

        for destination in &mut destinations {
            let source = if destination.x < pivot {
                &mut init
            } else {
                &mut tail
            };
            let index = self.rng.random_range(0..source.len());
            destination.x = source.swap_remove(index);
            destination.y = 0.0;
        }
        destinations
    }
}

// ── Padder ──────────────────────────────────────────────────────

/// Spreads a `width × height` grid apart by `padding` between neighbours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padder {
    padding: f64,
    width: usize,
    height: usize,
}

impl Padder {
    /// Pad a row-major grid of `width × height` pieces.
    pub fn new(padding: f64, width: usize, height: usize) -> Self {
        Self {
            padding,
            width,
            height,
        }
    }
}

impl Shuffler for Padder {
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        let mut destinations = positions(pieces);
        for j in 0..self.height {
            for i in 0..self.width {
                if let Some(destination) = destinations.get_mut(i + self.width * j) {
                    destination.x += i as f64 * self.padding;
                    destination.y += j as f64 * self.padding;
                }
            }
        }
        destinations
    }
}

// ── Noise ───────────────────────────────────────────────────────

/// Moves each piece by a uniform offset in `[-max, max]` per axis.
#[derive(Clone, Debug)]
pub struct Noise {
    max_distance: Vector,
    rng: ChaCha8Rng,
}

impl Noise {
    /// Seeded from the thread-local generator.
    pub fn new(max_distance: impl Into<Vector>) -> Self {
        Self {
            max_distance: max_distance.into(),
            rng: entropy(),
        }
    }

    /// Reproducible variant.
    pub fn seeded(max_distance: impl Into<Vector>, seed: u64) -> Self {
        Self {
            max_distance: max_distance.into(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for Noise {
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        let max = self.max_distance;
        positions(pieces)
            .into_iter()
            .map(|center| {
                let offset = Anchor::at_random(&mut self.rng, 2.0 * max.x, 2.0 * max.y);
                offset.as_vector() - max + center
            })
            .collect()
    }
}

// ── Noop ────────────────────────────────────────────────────────

/// Keeps every piece where it is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Noop;

impl Shuffler for Noop {
    fn shuffle(&mut self, pieces: &[Piece]) -> Vec<Vector> {
        positions(pieces)
    }
}
