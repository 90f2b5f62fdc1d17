//! Piece outline generation.
//!
//! An [`Outline`] turns the four edge inserts of a piece into the boundary
//! a rendering backend can stroke or fill. Two strategies are provided:
//!
//! - [`Squared`]: a 16-vertex polygon on a 5×5 grid, where each insert
//!   pushes the middle vertex of its edge in or out.
//! - [`Rounded`]: a cubic bezier path with rounded inserts and optional
//!   bezels on flat corners.
//!
//! Both work in the piece's local frame, with `(0, 0)` at its top-left
//! corner and `size` its full extent.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod rounded;
pub mod squared;

pub use rounded::{Rounded, RoundedBuilder};
pub use squared::{Squared, CLASSIC};

use jigsnap_core::{Insert, Structure, Vector};

/// A strategy that computes the boundary of a piece.
pub trait Outline {
    /// Compute the boundary of a piece with the given edges.
    ///
    /// `size` is the full piece extent and `border_fill` grows the boundary
    /// outwards to hide seams between adjacent pieces.
    fn draw(&self, structure: &Structure, size: Vector, border_fill: Vector) -> Vec<Vector>;

    /// Whether [`draw`](Outline::draw) returns bezier control points
    /// (a start point followed by triples) rather than polygon vertices.
    fn is_bezier(&self) -> bool;
}

/// Pick one of three values according to an insert.
pub(crate) fn select<T>(insert: Insert, tab: T, slot: T, none: T) -> T {
    match insert {
        Insert::Tab => tab,
        Insert::Slot => slot,
        Insert::None => none,
    }
}
