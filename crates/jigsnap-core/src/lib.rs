//! Core types for the jigsnap puzzle engine.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! geometric primitives ([`Vector`], [`Anchor`], [`Size`]), the edge
//! vocabulary ([`Insert`], [`Structure`]) and the grid orientation types
//! ([`Axis`], [`Direction`]) shared by every other jigsnap crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod anchor;
pub mod direction;
pub mod error;
pub mod insert;
pub mod pair;
pub mod size;
pub mod structure;
pub mod vector;

pub use anchor::Anchor;
pub use direction::{Axis, Direction};
pub use error::StructureError;
pub use insert::Insert;
pub use size::Size;
pub use structure::Structure;
pub use vector::Vector;
