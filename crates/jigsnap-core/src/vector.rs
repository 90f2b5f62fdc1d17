//! Two-dimensional vectors with scalar broadcasting.
//!
//! Arithmetic is componentwise. Every operator also accepts an `f64`,
//! which is broadcast to `(v, v)` before applying.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::pair::{self, Pair};

/// A point or displacement in the puzzle plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector {
    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The `(0, 0)` vector.
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// A square vector `(v, v)`.
    pub const fn square(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Compare with `other` using a per-axis tolerance.
    pub fn equal(&self, other: &Vector, delta: f64) -> bool {
        pair::equal(self.x, self.y, other.x, other.y, delta)
    }

    /// The componentwise difference `self - other`.
    pub fn diff(&self, other: &Vector) -> Pair {
        pair::diff(self.x, self.y, other.x, other.y)
    }

    /// Whether both components are zero.
    pub fn is_null(&self) -> bool {
        pair::is_null(self.x, self.y)
    }

    /// Componentwise minimum.
    pub fn min(self, other: impl Into<Vector>) -> Vector {
        let other = other.into();
        Vector::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Componentwise maximum.
    pub fn max(self, other: impl Into<Vector>) -> Vector {
        let other = other.into();
        Vector::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// The smaller of the two components.
    pub fn inner_min(&self) -> f64 {
        self.x.min(self.y)
    }

    /// The larger of the two components.
    pub fn inner_max(&self) -> f64 {
        self.x.max(self.y)
    }
}

impl From<f64> for Vector {
    fn from(v: f64) -> Self {
        Self::square(v)
    }
}

impl From<Pair> for Vector {
    fn from((x, y): Pair) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<Vector> for Vector {
            type Output = Vector;

            fn $method(self, rhs: Vector) -> Vector {
                Vector::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl $trait<f64> for Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                Vector::new(self.x $op rhs, self.y $op rhs)
            }
        }

        impl $trait<Vector> for f64 {
            type Output = Vector;

            fn $method(self, rhs: Vector) -> Vector {
                Vector::new(self $op rhs.x, self $op rhs.y)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);
componentwise!(Mul, mul, *);
componentwise!(Div, div, /);

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scalar_broadcast() {
        assert_eq!(Vector::new(1.0, 2.0) * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(10.0 - Vector::new(1.0, 2.0), Vector::new(9.0, 8.0));
        assert_eq!(Vector::from(3.0), Vector::new(3.0, 3.0));
    }

    #[test]
    fn min_max_and_inner() {
        let v = Vector::new(3.0, -1.0);
        assert_eq!(v.min(0.0), Vector::new(0.0, -1.0));
        assert_eq!(v.max(Vector::new(4.0, -2.0)), Vector::new(4.0, -1.0));
        assert_eq!(v.inner_min(), -1.0);
        assert_eq!(v.inner_max(), 3.0);
    }

    #[test]
    fn tolerant_equality() {
        let a = Vector::new(1.0, 1.0);
        assert!(a.equal(&Vector::new(1.005, 0.995), 0.01));
        assert!(!a.equal(&Vector::new(1.02, 1.0), 0.01));
        assert!(Vector::zero().is_null());
    }

    proptest! {
        #[test]
        fn sub_then_add_restores(
            x in -1e6f64..1e6, y in -1e6f64..1e6,
            dx in -1e6f64..1e6, dy in -1e6f64..1e6,
        ) {
            let v = Vector::new(x, y);
            let d = Vector::new(dx, dy);
            prop_assert!(((v - d) + d).equal(&v, 1e-6));
        }

        #[test]
        fn diff_matches_subtraction(
            x in -1e3f64..1e3, y in -1e3f64..1e3,
            ox in -1e3f64..1e3, oy in -1e3f64..1e3,
        ) {
            let a = Vector::new(x, y);
            let b = Vector::new(ox, oy);
            prop_assert_eq!(Vector::from(a.diff(&b)), a - b);
        }
    }
}
