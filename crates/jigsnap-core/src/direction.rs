//! Grid orientation: the two axes and the four edge directions.

use std::fmt;

use crate::vector::Vector;

/// One of the two axes of the puzzle plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The `x` axis.
    Horizontal,
    /// The `y` axis.
    Vertical,
}

impl Axis {
    /// The component of `v` along this axis.
    pub fn at_vector(self, v: &Vector) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

/// One of the four edges of a piece.
///
/// Declared in persistence order: right, down, left, up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards increasing `x`.
    Right,
    /// Towards increasing `y`.
    Down,
    /// Towards decreasing `x`.
    Left,
    /// Towards decreasing `y`.
    Up,
}

impl Direction {
    /// All directions in persistence order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// The facing direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    /// The axis this direction moves along.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Right | Direction::Left => Axis::Horizontal,
            Direction::Down | Direction::Up => Axis::Vertical,
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The lowercase name used in persisted records.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Up => "up",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
