//! Persistence records.
//!
//! These are plain serde structs mirroring the JSON shapes pieces and
//! puzzles are saved as. Links between pieces are recorded by external id
//! only and are never restored on import: the puzzle re-runs autoconnect
//! instead.

use jigsnap_core::{Direction, Vector};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::PieceId;
use crate::metadata::Metadata;

/// Options for exporting pieces and puzzles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Omit connection data.
    pub compact: bool,
}

/// A persisted piece.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceDump {
    /// Central anchor, or null for unplaced pieces.
    pub central_anchor: Option<Vector>,
    /// Four-character structure: right, down, left, up.
    pub structure: String,
    /// Size override, when the piece has its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeDump>,
    /// Metadata bag.
    #[serde(default)]
    pub metadata: Metadata,
    /// Neighbour ids, omitted by compact exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<ConnectionsDump>,
}

/// A persisted size override.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeDump {
    /// Piece radius.
    pub radius: Vector,
}

/// Persisted links, one per direction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionsDump {
    /// Right neighbour.
    pub right: Option<ConnectionRef>,
    /// Bottom neighbour.
    pub down: Option<ConnectionRef>,
    /// Left neighbour.
    pub left: Option<ConnectionRef>,
    /// Top neighbour.
    pub up: Option<ConnectionRef>,
}

impl ConnectionsDump {
    /// Record `links`, resolving each neighbour to its external id.
    pub fn from_links(links: [Option<PieceId>; 4], id_of: impl Fn(PieceId) -> Value) -> Self {
        let [right, down, left, up] =
            links.map(|link| link.map(|other| ConnectionRef { id: id_of(other) }));
        Self {
            right,
            down,
            left,
            up,
        }
    }

    /// The reference recorded for `direction`.
    pub fn get(&self, direction: Direction) -> Option<&ConnectionRef> {
        match direction {
            Direction::Right => self.right.as_ref(),
            Direction::Down => self.down.as_ref(),
            Direction::Left => self.left.as_ref(),
            Direction::Up => self.up.as_ref(),
        }
    }
}

/// A neighbour, by external id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRef {
    /// The neighbour's metadata id, null if it has none.
    pub id: Value,
}

/// Either a scalar or a vector, as accepted for piece sizes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VectorLike {
    /// Square value.
    Scalar(f64),
    /// Per-axis value.
    Vector(Vector),
}

impl From<VectorLike> for Vector {
    fn from(v: VectorLike) -> Self {
        match v {
            VectorLike::Scalar(s) => Vector::square(s),
            VectorLike::Vector(v) => v,
        }
    }
}

/// A persisted puzzle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDump {
    /// Radius inherited by pieces. Takes precedence over `piece_size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_radius: Option<VectorLike>,
    /// Diameter inherited by pieces, used when no radius is recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_size: Option<VectorLike>,
    /// Connection proximity.
    #[serde(default = "default_proximity")]
    pub proximity: f64,
    /// Pieces in registration order.
    pub pieces: Vec<PieceDump>,
}

fn default_proximity() -> f64 {
    1.0
}
