//! Opaque per-piece metadata.
//!
//! Metadata is a JSON object owned by the caller. The engine only reads the
//! `id` key, used as the piece's external identity in persisted records,
//! and the spatial keys described in [`spatial`](crate::spatial).

use serde_json::{Map, Value};

/// A piece's metadata bag.
pub type Metadata = Map<String, Value>;

/// Key holding a piece's external id.
pub const ID: &str = "id";

/// Merge `other` into `metadata`, overwriting existing keys.
pub fn merge(metadata: &mut Metadata, other: Metadata) {
    for (key, value) in other {
        metadata.insert(key, value);
    }
}

/// The external id, if present and not null.
pub fn id(metadata: &Metadata) -> Option<&Value> {
    metadata.get(ID).filter(|v| !v.is_null())
}
