//! Jigsnap: a jigsaw puzzle engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all jigsnap sub-crates. For most users, adding `jigsnap` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use jigsnap::prelude::*;
//!
//! // A 3×2 puzzle with alternating tabs and slots, then scattered.
//! let mut puzzle = Manufacturer::new()
//!     .with_dimensions(3, 2)
//!     .with_inserts_generator(InsertSequence::flipflop())
//!     .build()
//!     .unwrap();
//! puzzle.attach_validator(Validator::puzzle(jigsnap::engine::validator::connected));
//!
//! puzzle.autoconnect();
//! puzzle.validate();
//! assert_eq!(puzzle.valid(), Some(true));
//!
//! puzzle.shuffle_with(&mut jigsnap::engine::shuffler::Padder::new(5.0, 3, 2));
//! puzzle.update_validity();
//! assert_eq!(puzzle.valid(), Some(false));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `jigsnap-core` | Vectors, anchors, inserts, structures, sizes |
//! | [`outline`] | `jigsnap-outline` | Squared and rounded boundary generators |
//! | [`engine`] | `jigsnap-engine` | Pieces, puzzles, connectors, validators, shufflers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Geometry and edge primitives (`jigsnap-core`).
pub use jigsnap_core as types;

/// Boundary generators (`jigsnap-outline`).
///
/// [`outline::Squared`] produces straight polygons, [`outline::Rounded`]
/// produces bezier paths.
pub use jigsnap_outline as outline;

/// The puzzle engine (`jigsnap-engine`).
///
/// [`engine::Puzzle`] owns the pieces; strategies live in
/// [`engine::shuffler`], [`engine::validator`] and [`engine::spatial`].
pub use jigsnap_engine as engine;

/// Common imports for typical jigsnap usage.
///
/// ```rust
/// use jigsnap::prelude::*;
/// ```
pub mod prelude {
    // Primitives
    pub use jigsnap_core::{Anchor, Axis, Direction, Insert, Size, Structure, Vector};

    // Outlines
    pub use jigsnap_outline::{Outline, Rounded, Squared};

    // Errors
    pub use jigsnap_engine::{ConfigError, ConnectionError, PuzzleError};

    // Engine
    pub use jigsnap_engine::{
        Connector, DragMode, ExportOptions, InsertSequence, Manufacturer, Piece, PieceConfig,
        PieceId, PieceTemplate, Puzzle, PuzzleDump, PuzzleSettings, Shuffler, Validator,
    };
}
