//! Puzzle settings and their validation.

use jigsnap_core::{Size, Vector};

use crate::error::ConfigError;

/// Settings shared by every piece of a [`Puzzle`](crate::Puzzle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PuzzleSettings {
    /// Size inherited by pieces without their own. Default: radius 2.
    pub piece_size: Size,
    /// Maximum per-axis gap between facing anchors for a connection. Default: 1.
    pub proximity: f64,
}

impl Default for PuzzleSettings {
    fn default() -> Self {
        Self {
            piece_size: Size::default(),
            proximity: 1.0,
        }
    }
}

impl PuzzleSettings {
    /// Set the inherited piece size.
    pub fn with_piece_size(mut self, size: Size) -> Self {
        self.piece_size = size;
        self
    }

    /// Set the inherited piece radius. Scalars make square pieces.
    pub fn with_piece_radius(mut self, radius: impl Into<Vector>) -> Self {
        self.piece_size = Size::from_radius(radius);
        self
    }

    /// Set the connection proximity.
    pub fn with_proximity(mut self, proximity: f64) -> Self {
        self.proximity = proximity;
        self
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.piece_size.radius;
        for value in [radius.x, radius.y] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidPieceSize { value });
            }
        }
        if !self.proximity.is_finite() || self.proximity < 0.0 {
            return Err(ConfigError::InvalidProximity {
                value: self.proximity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = PuzzleSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.piece_size.diameter, Vector::new(4.0, 4.0));
        assert_eq!(settings.proximity, 1.0);
    }

    #[test]
    fn rejects_degenerate_radius() {
        let settings = PuzzleSettings::default().with_piece_radius(Vector::new(2.0, 0.0));
        match settings.validate() {
            Err(ConfigError::InvalidPieceSize { value }) => assert_eq!(value, 0.0),
            other => panic!("expected InvalidPieceSize, got {other:?}"),
        }
        let settings = PuzzleSettings::default().with_piece_radius(f64::NAN);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_negative_proximity() {
        let settings = PuzzleSettings::default().with_proximity(-0.5);
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvalidProximity { value: -0.5 })
        );
        assert!(PuzzleSettings::default().with_proximity(0.0).validate().is_ok());
    }
}
