//! The jigsnap puzzle engine.
//!
//! A [`Puzzle`] is an arena of [`Piece`]s linked through their four edges.
//! Pieces snap together when a tab faces a slot within the puzzle's
//! proximity, and connected groups move as rigid bodies: pushing one piece
//! pushes everything reachable from it exactly once.
//!
//! Around that core the crate provides:
//!
//! - [`Connector`]: the per-axis attract/match/connect protocol.
//! - [`DragMode`]: the policy deciding whether a drag breaks connections.
//! - [`Validator`]: edge-triggered "solved" detection.
//! - [`Manufacturer`]: rectangular puzzle generation from an
//!   [`InsertSequence`] strategy.
//! - [`shuffler`]: strategies that scatter pieces.
//! - [`dump`]: serde records for persistence.
//!
//! Everything is single-threaded. Listeners are plain closures invoked
//! synchronously in registration order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod connector;
pub mod drag;
pub mod dump;
pub mod error;
pub mod id;
pub mod manufacturer;
pub mod metadata;
pub mod piece;
pub mod puzzle;
pub mod sequence;
pub mod shuffler;
pub mod spatial;
pub mod template;
pub mod validator;

pub use config::PuzzleSettings;
pub use connector::{Connector, Requirement};
pub use drag::DragMode;
pub use dump::{ExportOptions, PieceDump, PuzzleDump};
pub use error::{ConfigError, ConnectionError, PuzzleError};
pub use id::PieceId;
pub use manufacturer::Manufacturer;
pub use metadata::Metadata;
pub use piece::{Piece, PieceConfig};
pub use puzzle::Puzzle;
pub use sequence::InsertSequence;
pub use shuffler::Shuffler;
pub use template::PieceTemplate;
pub use validator::Validator;
