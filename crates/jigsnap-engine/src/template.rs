//! Named piece templates.

use jigsnap_core::{Size, Structure};

use crate::metadata::Metadata;
use crate::piece::PieceConfig;

/// A reusable piece description, registered on a puzzle by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceTemplate {
    /// Edges of every piece built from the template.
    pub structure: Structure,
    /// Size override, if any.
    pub size: Option<Size>,
    /// Metadata copied into every piece.
    pub metadata: Metadata,
}

impl PieceTemplate {
    /// A template with the given edges.
    pub fn new(structure: Structure) -> Self {
        Self {
            structure,
            ..Self::default()
        }
    }

    /// Override the piece size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the base metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Combine the template with per-piece settings, which take precedence.
    pub(crate) fn instantiate(&self, config: PieceConfig) -> (Structure, PieceConfig) {
        let mut metadata = self.metadata.clone();
        if let Some(extra) = config.metadata {
            crate::metadata::merge(&mut metadata, extra);
        }
        (
            self.structure,
            PieceConfig {
                central_anchor: config.central_anchor,
                metadata: Some(metadata),
                size: config.size.or(self.size),
            },
        )
    }
}
