//! Rectangular puzzle generation.

use jigsnap_core::{Structure, Vector};
use serde_json::Value;
use tracing::debug;

use crate::config::PuzzleSettings;
use crate::error::ConfigError;
use crate::metadata::{self, Metadata};
use crate::piece::PieceConfig;
use crate::puzzle::Puzzle;
use crate::sequence::InsertSequence;

/// Builds `width × height` grids of interlocking pieces.
///
/// Horizontal inserts come from a sequence restarted on every row; vertical
/// inserts come from a single sequence advanced once per row. Outer edges
/// are always flat.
///
/// ```
/// use jigsnap_engine::{InsertSequence, Manufacturer};
///
/// let puzzle = Manufacturer::new()
///     .with_dimensions(3, 2)
///     .with_inserts_generator(InsertSequence::flipflop())
///     .build()
///     .unwrap();
/// assert_eq!(puzzle.len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct Manufacturer {
    width: usize,
    height: usize,
    sequence: InsertSequence,
    head: Option<Vector>,
    settings: PuzzleSettings,
    metadata: Vec<Metadata>,
}

impl Default for Manufacturer {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            sequence: InsertSequence::fixed(),
            head: None,
            settings: PuzzleSettings::default(),
            metadata: Vec::new(),
        }
    }
}

impl Manufacturer {
    /// An empty 0×0 manufacturer using the `fixed` generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid size in pieces.
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Strategy for generating inserts. Each row and the column pass use a
    /// restarted copy.
    pub fn with_inserts_generator(mut self, sequence: InsertSequence) -> Self {
        self.sequence = sequence;
        self
    }

    /// Center of the first piece. Defaults to one piece diameter from the
    /// origin.
    pub fn with_head_at(mut self, head: impl Into<Vector>) -> Self {
        self.head = Some(head.into());
        self
    }

    /// Settings of the generated puzzle.
    pub fn with_settings(mut self, settings: PuzzleSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Metadata for the generated pieces, in row-major order.
    pub fn with_metadata(mut self, metadata: Vec<Metadata>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Generate the puzzle. Pieces are not connected.
    pub fn build(&self) -> Result<Puzzle, ConfigError> {
        let mut puzzle = Puzzle::new(self.settings)?;
        let diameter = puzzle.piece_diameter();
        let offset = self.head.unwrap_or(diameter);

        let mut vertical = self.new_sequence();
        for y in 0..self.height {
            let mut horizontal = self.new_sequence();
            vertical.next();
            for x in 0..self.width {
                horizontal.next();
                let structure = Structure {
                    up: vertical.previous_complement(),
                    left: horizontal.previous_complement(),
                    down: vertical.current(self.height),
                    right: horizontal.current(self.width),
                };
                let position = Vector::new(x as f64, y as f64) * diameter + offset;
                let index = y * self.width + x;
                let config = PieceConfig::at(position).with_metadata(self.metadata_for(index));
                puzzle.new_piece(structure, config);
            }
        }
        debug!(width = self.width, height = self.height, "puzzle manufactured");
        Ok(puzzle)
    }

    fn new_sequence(&self) -> InsertSequence {
        let mut sequence = self.sequence.clone();
        sequence.restart();
        sequence
    }

    fn metadata_for(&self, index: usize) -> Metadata {
        let mut annotation = self.metadata.get(index).cloned().unwrap_or_default();
        if metadata::id(&annotation).is_none() {
            annotation.insert(metadata::ID.into(), Value::from(index + 1));
        }
        annotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jigsnap_core::{Direction, Insert};
    use serde_json::json;

    #[test]
    fn two_by_one_fixed() {
        let puzzle = Manufacturer::new().with_dimensions(2, 1).build().unwrap();
        let [first, second] = puzzle.pieces() else {
            panic!("expected two pieces");
        };
        assert_eq!(first.structure().serialize(), "T---");
        assert_eq!(second.structure().serialize(), "--S-");
    }

    #[test]
    fn outer_edges_are_flat() {
        let puzzle = Manufacturer::new()
            .with_dimensions(3, 3)
            .with_inserts_generator(InsertSequence::random(Some(3)))
            .build()
            .unwrap();
        for (index, piece) in puzzle.pieces().iter().enumerate() {
            let (x, y) = (index % 3, index / 3);
            assert_eq!(piece.insert(Direction::Left).is_none(), x == 0);
            assert_eq!(piece.insert(Direction::Right).is_none(), x == 2);
            assert_eq!(piece.insert(Direction::Up).is_none(), y == 0);
            assert_eq!(piece.insert(Direction::Down).is_none(), y == 2);
        }
    }

    #[test]
    fn neighbours_lock() {
        let puzzle = Manufacturer::new()
            .with_dimensions(4, 1)
            .with_inserts_generator(InsertSequence::two_and_two())
            .build()
            .unwrap();
        for pair in puzzle.pieces().windows(2) {
            assert!(pair[0]
                .insert(Direction::Right)
                .matches(pair[1].insert(Direction::Left)));
        }
        assert_eq!(puzzle.pieces()[0].insert(Direction::Right), Insert::Tab);
    }

    #[test]
    fn positions_default_to_one_diameter_offset() {
        let puzzle = Manufacturer::new().with_dimensions(2, 2).build().unwrap();
        assert_eq!(
            puzzle.points(),
            vec![(4.0, 4.0), (8.0, 4.0), (4.0, 8.0), (8.0, 8.0)]
        );
    }

    #[test]
    fn head_anchor_moves_the_grid() {
        let puzzle = Manufacturer::new()
            .with_dimensions(2, 1)
            .with_head_at((10.0, 20.0))
            .build()
            .unwrap();
        assert_eq!(puzzle.points(), vec![(10.0, 20.0), (14.0, 20.0)]);
    }

    #[test]
    fn ids_default_to_position() {
        let extra = json!({"id": "X", "color": "red"}).as_object().cloned().unwrap();
        let puzzle = Manufacturer::new()
            .with_dimensions(2, 2)
            .with_metadata(vec![Metadata::new(), extra])
            .build()
            .unwrap();
        let ids: Vec<_> = puzzle.pieces().iter().map(|p| p.id().cloned()).collect();
        assert_eq!(
            ids,
            vec![Some(json!(1)), Some(json!("X")), Some(json!(3)), Some(json!(4))]
        );
        assert_eq!(puzzle.pieces()[1].metadata()["color"], json!("red"));
    }

    #[test]
    fn invalid_settings_fail() {
        let settings = PuzzleSettings::default().with_proximity(-1.0);
        assert!(Manufacturer::new().with_settings(settings).build().is_err());
    }
}
