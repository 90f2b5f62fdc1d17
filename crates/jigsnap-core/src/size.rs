//! Piece dimensions.

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// The extent of a piece, stored both as radius and diameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Half the piece extent on each axis.
    pub radius: Vector,
    /// Full piece extent on each axis.
    pub diameter: Vector,
}

impl Size {
    /// Build a size from its radius. Scalars make square pieces.
    pub fn from_radius(radius: impl Into<Vector>) -> Self {
        let radius = radius.into();
        Self {
            radius,
            diameter: radius * 2.0,
        }
    }

    /// Build a size from its diameter. Scalars make square pieces.
    pub fn from_diameter(diameter: impl Into<Vector>) -> Self {
        let diameter = diameter.into();
        Self {
            radius: diameter / 2.0,
            diameter,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::from_radius(2.0)
    }
}
