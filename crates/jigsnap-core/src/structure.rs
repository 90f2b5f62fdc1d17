//! The four-edge description of a piece.
//!
//! A [`Structure`] encodes as four characters in the order right, down,
//! left, up, each being `T` (tab), `S` (slot) or `-` (flat). For example
//! `"TS--"` is a piece with a tab on its right and a slot at the bottom.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::StructureError;
use crate::insert::Insert;

/// The inserts on each edge of a piece. Missing edges are flat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Structure {
    /// Top edge.
    pub up: Insert,
    /// Left edge.
    pub left: Insert,
    /// Bottom edge.
    pub down: Insert,
    /// Right edge.
    pub right: Insert,
}

impl Structure {
    /// A structure with every edge flat.
    pub const fn flat() -> Self {
        Self {
            up: Insert::None,
            left: Insert::None,
            down: Insert::None,
            right: Insert::None,
        }
    }

    /// Set the right edge.
    pub fn with_right(mut self, insert: Insert) -> Self {
        self.right = insert;
        self
    }

    /// Set the bottom edge.
    pub fn with_down(mut self, insert: Insert) -> Self {
        self.down = insert;
        self
    }

    /// Set the left edge.
    pub fn with_left(mut self, insert: Insert) -> Self {
        self.left = insert;
        self
    }

    /// Set the top edge.
    pub fn with_up(mut self, insert: Insert) -> Self {
        self.up = insert;
        self
    }

    /// The insert on the edge facing `direction`.
    pub fn get(&self, direction: Direction) -> Insert {
        match direction {
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Up => self.up,
        }
    }

    /// Replace the insert on the edge facing `direction`.
    pub fn set(&mut self, direction: Direction, insert: Insert) {
        match direction {
            Direction::Right => self.right = insert,
            Direction::Down => self.down = insert,
            Direction::Left => self.left = insert,
            Direction::Up => self.up = insert,
        }
    }

    /// Encode as four characters: right, down, left, up.
    pub fn serialize(&self) -> String {
        Direction::ALL
            .iter()
            .map(|d| self.get(*d).as_char())
            .collect()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Structure {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(StructureError::InvalidLength { len: chars.len() });
        }
        let mut structure = Structure::flat();
        for (direction, c) in Direction::ALL.iter().zip(chars) {
            structure.set(*direction, Insert::from_char(c));
        }
        Ok(structure)
    }
}

impl TryFrom<String> for Structure {
    type Error = StructureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Structure> for String {
    fn from(value: Structure) -> Self {
        value.serialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn insert_strategy() -> impl Strategy<Value = Insert> {
        prop_oneof![Just(Insert::Tab), Just(Insert::Slot), Just(Insert::None)]
    }

    #[test]
    fn serializes_right_down_left_up() {
        let s = Structure::flat()
            .with_right(Insert::Tab)
            .with_down(Insert::Slot);
        assert_eq!(s.serialize(), "TS--");
        assert_eq!(Structure::default().serialize(), "----");
    }

    #[test]
    fn parses_positionally() {
        let s: Structure = "-TS-".parse().unwrap();
        assert_eq!(s.right, Insert::None);
        assert_eq!(s.down, Insert::Tab);
        assert_eq!(s.left, Insert::Slot);
        assert_eq!(s.up, Insert::None);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            "TS-".parse::<Structure>(),
            Err(StructureError::InvalidLength { len: 3 })
        );
        assert_eq!(
            "TS--S".parse::<Structure>(),
            Err(StructureError::InvalidLength { len: 5 })
        );
    }

    #[test]
    fn unknown_characters_become_flat() {
        let s: Structure = "xTyS".parse().unwrap();
        assert_eq!(s.serialize(), "-T-S");
    }

    proptest! {
        #[test]
        fn encoding_round_trips(
            up in insert_strategy(),
            left in insert_strategy(),
            down in insert_strategy(),
            right in insert_strategy(),
        ) {
            let s = Structure { up, left, down, right };
            prop_assert_eq!(s.serialize().parse::<Structure>(), Ok(s));
        }
    }
}
