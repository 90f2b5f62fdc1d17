//! Mutable reference points used to locate pieces.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pair::{self, Pair};
use crate::vector::Vector;

/// A mutable 2D point that locates a piece or one of its edges.
///
/// A piece owns exactly one central anchor; the edge anchors are derived
/// from it on demand and never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Anchor {
    /// Create an anchor at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create an anchor uniformly distributed in `[0, max_x) × [0, max_y)`.
    pub fn at_random<R: Rng + ?Sized>(rng: &mut R, max_x: f64, max_y: f64) -> Self {
        Self::new(rng.random::<f64>() * max_x, rng.random::<f64>() * max_y)
    }

    /// Whether this anchor sits exactly at `(x, y)`.
    pub fn is_at(&self, x: f64, y: f64) -> bool {
        pair::equal(self.x, self.y, x, y, 0.0)
    }

    /// Move this anchor in place.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// A translated copy of this anchor.
    pub fn translated(&self, dx: f64, dy: f64) -> Anchor {
        Anchor::new(self.x + dx, self.y + dy)
    }

    /// Whether `other` lies within `tolerance` on each axis independently.
    ///
    /// This is a square neighbourhood, not a Euclidean distance.
    pub fn close_to(&self, other: &Anchor, tolerance: f64) -> bool {
        between(self.x, other.x - tolerance, other.x + tolerance)
            && between(self.y, other.y - tolerance, other.y + tolerance)
    }

    /// The difference `self - other`.
    pub fn diff(&self, other: &Anchor) -> Pair {
        pair::diff(self.x, self.y, other.x, other.y)
    }

    /// This anchor as a raw pair.
    pub fn as_pair(&self) -> Pair {
        (self.x, self.y)
    }

    /// This anchor as a vector.
    pub fn as_vector(&self) -> Vector {
        Vector::new(self.x, self.y)
    }
}

impl From<Vector> for Anchor {
    fn from(v: Vector) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Anchor> for Vector {
    fn from(a: Anchor) -> Self {
        a.as_vector()
    }
}

fn between(value: f64, min: f64, max: f64) -> bool {
    min <= value && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn translate_mutates_translated_copies() {
        let mut a = Anchor::new(1.0, 1.0);
        let b = a.translated(2.0, 3.0);
        assert!(a.is_at(1.0, 1.0));
        assert!(b.is_at(3.0, 4.0));
        a.translate(-1.0, -1.0);
        assert!(a.is_at(0.0, 0.0));
    }

    #[test]
    fn close_to_is_axis_independent() {
        let a = Anchor::new(0.0, 0.0);
        assert!(a.close_to(&Anchor::new(1.0, 1.0), 1.0));
        assert!(a.close_to(&Anchor::new(-1.0, 0.5), 1.0));
        assert!(!a.close_to(&Anchor::new(1.1, 0.0), 1.0));
        assert!(!a.close_to(&Anchor::new(0.0, -1.1), 1.0));
    }

    #[test]
    fn diff_points_away_from_other() {
        assert_eq!(Anchor::new(0.0, 0.0).diff(&Anchor::new(1.0, -2.0)), (-1.0, 2.0));
    }

    #[test]
    fn at_random_is_bounded_and_seeded() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = Anchor::at_random(&mut rng, 10.0, 5.0);
        assert!((0.0..10.0).contains(&a.x));
        assert!((0.0..5.0).contains(&a.y));

        let mut again = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(Anchor::at_random(&mut again, 10.0, 5.0), a);
    }

    proptest! {
        #[test]
        fn closeness_is_symmetric(
            x in -100.0f64..100.0, y in -100.0f64..100.0,
            ox in -100.0f64..100.0, oy in -100.0f64..100.0,
            tolerance in 0.0f64..50.0,
        ) {
            let a = Anchor::new(x, y);
            let b = Anchor::new(ox, oy);
            prop_assert_eq!(a.close_to(&b, tolerance), b.close_to(&a, tolerance));
        }
    }
}
