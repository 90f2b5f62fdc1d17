//! Helpers for raw `(x, y)` coordinate pairs.

/// A raw coordinate pair.
pub type Pair = (f64, f64);

/// Whether both components are zero.
pub fn is_null(x: f64, y: f64) -> bool {
    equal(x, y, 0.0, 0.0, 0.0)
}

/// Whether two pairs are equal on each axis within `delta`.
pub fn equal(x1: f64, y1: f64, x2: f64, y2: f64, delta: f64) -> bool {
    (x1 - x2).abs() <= delta && (y1 - y2).abs() <= delta
}

/// The componentwise difference `(x1 - x2, y1 - y2)`.
pub fn diff(x1: f64, y1: f64, x2: f64, y2: f64) -> Pair {
    (x1 - x2, y1 - y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_pair() {
        assert!(is_null(0.0, 0.0));
        assert!(is_null(-0.0, 0.0));
        assert!(!is_null(0.0, 0.1));
    }

    #[test]
    fn equal_uses_per_axis_tolerance() {
        assert!(equal(0.0, 0.0, 0.5, -0.5, 0.5));
        assert!(!equal(0.0, 0.0, 0.6, 0.0, 0.5));
        assert!(equal(1.0, 2.0, 1.0, 2.0, 0.0));
    }

    #[test]
    fn diff_is_first_minus_second() {
        assert_eq!(diff(1.0, 2.0, 4.0, 0.0), (-3.0, 2.0));
    }
}
