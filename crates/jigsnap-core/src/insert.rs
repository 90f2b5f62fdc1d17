//! The shape of a single piece edge.

use std::fmt;

/// The connector shape carried by one edge of a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Insert {
    /// A protruding knob.
    Tab,
    /// A cavity that accepts a tab.
    Slot,
    /// A flat border edge.
    #[default]
    None,
}

impl Insert {
    /// The insert that fits into this one.
    pub fn complement(self) -> Insert {
        match self {
            Insert::Tab => Insert::Slot,
            Insert::Slot => Insert::Tab,
            Insert::None => Insert::None,
        }
    }

    /// Whether this insert can lock with `other`.
    ///
    /// Only a tab and a slot match; flat edges never do.
    pub fn matches(self, other: Insert) -> bool {
        matches!(
            (self, other),
            (Insert::Tab, Insert::Slot) | (Insert::Slot, Insert::Tab)
        )
    }

    /// Whether this is a flat edge.
    pub fn is_none(self) -> bool {
        self == Insert::None
    }

    /// The one-character encoding: `T`, `S` or `-`.
    pub fn as_char(self) -> char {
        match self {
            Insert::Tab => 'T',
            Insert::Slot => 'S',
            Insert::None => '-',
        }
    }

    /// Decode one character. Anything but `T` or `S` is a flat edge.
    pub fn from_char(c: char) -> Insert {
        match c {
            'T' => Insert::Tab,
            'S' => Insert::Slot,
            _ => Insert::None,
        }
    }
}

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insert::Tab => write!(f, "Tab"),
            Insert::Slot => write!(f, "Slot"),
            Insert::None => write!(f, "None"),
        }
    }
}
