//! Pieces: edges, position, size, links and listeners.
//!
//! A [`Piece`] holds everything that concerns a single piece. Operations
//! that involve its neighbours (connecting, pushing, dragging) need the
//! rest of the graph and live on [`Puzzle`](crate::Puzzle), keyed by
//! [`PieceId`].

use std::cell::OnceCell;
use std::fmt;
use std::mem;

use jigsnap_core::{Anchor, Axis, Direction, Insert, Size, Structure, Vector};
use serde_json::Value;
use smallvec::SmallVec;

use crate::connector::Connector;
use crate::dump::{ConnectionsDump, ExportOptions, PieceDump, SizeDump};
use crate::error::PuzzleError;
use crate::id::PieceId;
use crate::metadata::{self, Metadata};

/// Called after a piece moves, with the piece and the applied delta.
pub type TranslationListener = Box<dyn FnMut(&Piece, f64, f64)>;

/// Called when a piece connects with or disconnects from a neighbour.
pub type ConnectionListener = Box<dyn FnMut(&Piece, &Piece)>;

/// Optional attributes for a new piece.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceConfig {
    /// Where to center the piece.
    pub central_anchor: Option<Vector>,
    /// Metadata merged into the piece.
    pub metadata: Option<Metadata>,
    /// Size overriding the one inherited from the puzzle.
    pub size: Option<Size>,
}

impl PieceConfig {
    /// Center the piece at `position`.
    pub fn at(position: impl Into<Vector>) -> Self {
        Self {
            central_anchor: Some(position.into()),
            ..Self::default()
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Override the inherited size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

/// A single puzzle piece.
pub struct Piece {
    slot: Option<PieceId>,
    structure: Structure,
    metadata: Metadata,
    central_anchor: Option<Anchor>,
    size: Option<Size>,
    inherited_size: Option<Size>,
    connections: [Option<PieceId>; 4],
    horizontal_connector: OnceCell<Connector>,
    vertical_connector: OnceCell<Connector>,
    translate_listeners: Vec<TranslationListener>,
    pub(crate) connect_listeners: Vec<ConnectionListener>,
    pub(crate) disconnect_listeners: Vec<ConnectionListener>,
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("slot", &self.slot)
            .field("structure", &self.structure.serialize())
            .field("central_anchor", &self.central_anchor)
            .field("size", &self.size)
            .field("connections", &self.connections)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl Piece {
    /// Create an unregistered piece.
    pub fn new(structure: Structure, config: PieceConfig) -> Self {
        Self {
            slot: None,
            structure,
            metadata: config.metadata.unwrap_or_default(),
            central_anchor: config.central_anchor.map(Anchor::from),
            size: config.size,
            inherited_size: None,
            connections: [None; 4],
            horizontal_connector: OnceCell::new(),
            vertical_connector: OnceCell::new(),
            translate_listeners: Vec::new(),
            connect_listeners: Vec::new(),
            disconnect_listeners: Vec::new(),
        }
    }

    /// Rebuild a piece from its persisted record. Links are not restored.
    pub fn import(dump: &PieceDump) -> Result<Self, PuzzleError> {
        let structure: Structure = dump.structure.parse()?;
        Ok(Self::new(
            structure,
            PieceConfig {
                central_anchor: dump.central_anchor,
                metadata: Some(dump.metadata.clone()),
                size: dump.size.map(|s| Size::from_radius(s.radius)),
            },
        ))
    }

    /// Apply a configuration to an existing piece.
    ///
    /// Fails if the configuration carries an anchor and the piece is
    /// already centered.
    pub fn configure(&mut self, config: PieceConfig) -> Result<(), PuzzleError> {
        if let Some(anchor) = config.central_anchor {
            self.center_around(anchor.into())?;
        }
        if let Some(metadata) = config.metadata {
            self.annotate(metadata);
        }
        if let Some(size) = config.size {
            self.resize(size);
        }
        Ok(())
    }

    pub(crate) fn belong_to(&mut self, slot: PieceId, size: Size) {
        self.slot = Some(slot);
        self.inherited_size = Some(size);
    }

    /// This piece's handle in its puzzle, once registered.
    pub fn slot(&self) -> Option<PieceId> {
        self.slot
    }

    // ── Metadata ────────────────────────────────────────────────

    /// The metadata bag.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access to the metadata bag.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Merge `metadata` into this piece's metadata.
    pub fn annotate(&mut self, metadata: Metadata) {
        metadata::merge(&mut self.metadata, metadata);
    }

    /// Replace this piece's metadata.
    pub fn reannotate(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    /// The external id stored in the metadata.
    pub fn id(&self) -> Option<&Value> {
        metadata::id(&self.metadata)
    }

    // ── Edges ───────────────────────────────────────────────────

    /// The piece's edges.
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// The insert on the edge facing `direction`.
    pub fn insert(&self, direction: Direction) -> Insert {
        self.structure.get(direction)
    }

    /// Inserts in persistence order: right, down, left, up.
    pub fn inserts(&self) -> [Insert; 4] {
        Direction::ALL.map(|d| self.structure.get(d))
    }

    // ── Position ────────────────────────────────────────────────

    /// The central anchor, once placed.
    pub fn central_anchor(&self) -> Option<Anchor> {
        self.central_anchor
    }

    /// Place the piece. Fails if it is already centered.
    pub fn center_around(&mut self, anchor: Anchor) -> Result<(), PuzzleError> {
        if self.central_anchor.is_some() {
            return Err(PuzzleError::AlreadyCentered { piece: self.slot });
        }
        self.central_anchor = Some(anchor);
        Ok(())
    }

    /// Place the piece at `(x, y)`. Fails if it is already centered.
    pub fn locate_at(&mut self, x: f64, y: f64) -> Result<(), PuzzleError> {
        self.center_around(Anchor::new(x, y))
    }

    /// Whether the piece is centered exactly at `(x, y)`.
    pub fn is_at(&self, x: f64, y: f64) -> bool {
        self.central_anchor.is_some_and(|a| a.is_at(x, y))
    }

    /// Move the piece so it is centered at `anchor`.
    ///
    /// An unplaced piece is simply placed there, without firing listeners.
    pub fn recenter_around(&mut self, anchor: Anchor, quiet: bool) {
        match self.central_anchor {
            Some(current) => {
                let (dx, dy) = anchor.diff(&current);
                self.translate(dx, dy, quiet);
            }
            None => self.central_anchor = Some(anchor),
        }
    }

    /// Move the piece so it is centered at `(x, y)`.
    pub fn relocate_to(&mut self, x: f64, y: f64, quiet: bool) {
        self.recenter_around(Anchor::new(x, y), quiet);
    }

    /// Move this piece alone, ignoring its connections.
    ///
    /// A null delta or an unplaced piece is a no-op. Translate listeners
    /// fire unless `quiet`.
    pub fn translate(&mut self, dx: f64, dy: f64, quiet: bool) {
        if jigsnap_core::pair::is_null(dx, dy) {
            return;
        }
        let Some(anchor) = self.central_anchor.as_mut() else {
            return;
        };
        anchor.translate(dx, dy);
        if !quiet {
            self.fire_translate(dx, dy);
        }
    }

    /// The anchor at the middle of the edge facing `direction`.
    pub fn anchor(&self, direction: Direction) -> Option<Anchor> {
        let radius = self.radius();
        self.central_anchor.map(|c| match direction {
            Direction::Right => c.translated(radius.x, 0.0),
            Direction::Down => c.translated(0.0, radius.y),
            Direction::Left => c.translated(-radius.x, 0.0),
            Direction::Up => c.translated(0.0, -radius.y),
        })
    }

    /// The middle of the top edge.
    pub fn up_anchor(&self) -> Option<Anchor> {
        self.anchor(Direction::Up)
    }

    /// The middle of the bottom edge.
    pub fn down_anchor(&self) -> Option<Anchor> {
        self.anchor(Direction::Down)
    }

    /// The middle of the left edge.
    pub fn left_anchor(&self) -> Option<Anchor> {
        self.anchor(Direction::Left)
    }

    /// The middle of the right edge.
    pub fn right_anchor(&self) -> Option<Anchor> {
        self.anchor(Direction::Right)
    }

    // ── Size ────────────────────────────────────────────────────

    /// Override the inherited size.
    pub fn resize(&mut self, size: Size) {
        self.size = Some(size);
    }

    /// Own size, else the puzzle's, else the default.
    pub fn size(&self) -> Size {
        self.size.or(self.inherited_size).unwrap_or_default()
    }

    /// The size set on this piece itself, if any.
    pub fn own_size(&self) -> Option<Size> {
        self.size
    }

    /// Half the piece extent.
    pub fn radius(&self) -> Vector {
        self.size().radius
    }

    /// Full piece extent.
    pub fn diameter(&self) -> Vector {
        self.size().diameter
    }

    // ── Links ───────────────────────────────────────────────────

    /// The neighbour linked on the edge facing `direction`.
    pub fn connection(&self, direction: Direction) -> Option<PieceId> {
        self.connections[direction.index()]
    }

    pub(crate) fn set_connection(&mut self, direction: Direction, other: Option<PieceId>) {
        self.connections[direction.index()] = other;
    }

    /// All four links in persistence order.
    pub fn connections(&self) -> [Option<PieceId>; 4] {
        self.connections
    }

    /// The neighbours actually linked, in persistence order.
    pub fn present_connections(&self) -> SmallVec<[PieceId; 4]> {
        self.connections.iter().flatten().copied().collect()
    }

    /// Whether any edge is linked.
    pub fn connected(&self) -> bool {
        self.connections.iter().any(Option::is_some)
    }

    // ── Connectors ──────────────────────────────────────────────

    /// The private connector for `axis`, if one was created.
    pub fn own_connector(&self, axis: Axis) -> Option<&Connector> {
        self.connector_cell(axis).get()
    }

    /// The connector this piece uses along `axis`, when it can be decided
    /// without the puzzle.
    ///
    /// A piece outside any puzzle creates a canonical private connector on
    /// first use. A registered piece without one of its own returns `None`:
    /// it follows the puzzle's shared connector, see
    /// [`Puzzle::connector_for`](crate::Puzzle::connector_for).
    pub fn connector(&self, axis: Axis) -> Option<&Connector> {
        let cell = self.connector_cell(axis);
        if self.slot.is_some() {
            return cell.get();
        }
        Some(cell.get_or_init(|| Connector::for_axis(axis)))
    }

    /// Give this piece its own connector, overriding the puzzle's.
    pub fn attach_connector(&mut self, connector: Connector) {
        let axis = connector.axis();
        let cell = OnceCell::from(connector);
        match axis {
            Axis::Horizontal => self.horizontal_connector = cell,
            Axis::Vertical => self.vertical_connector = cell,
        }
    }

    fn connector_cell(&self, axis: Axis) -> &OnceCell<Connector> {
        match axis {
            Axis::Horizontal => &self.horizontal_connector,
            Axis::Vertical => &self.vertical_connector,
        }
    }

    // ── Listeners ───────────────────────────────────────────────

    /// Register a translate listener.
    pub fn on_translate(&mut self, f: impl FnMut(&Piece, f64, f64) + 'static) {
        self.translate_listeners.push(Box::new(f));
    }

    /// Register a connect listener, called with this piece and its new neighbour.
    pub fn on_connect(&mut self, f: impl FnMut(&Piece, &Piece) + 'static) {
        self.connect_listeners.push(Box::new(f));
    }

    /// Register a disconnect listener, called once per former neighbour.
    pub fn on_disconnect(&mut self, f: impl FnMut(&Piece, &Piece) + 'static) {
        self.disconnect_listeners.push(Box::new(f));
    }

    fn fire_translate(&mut self, dx: f64, dy: f64) {
        let mut listeners = mem::take(&mut self.translate_listeners);
        for listener in listeners.iter_mut() {
            listener(self, dx, dy);
        }
        self.translate_listeners = listeners;
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Persist this piece.
    ///
    /// `neighbour_id` resolves a linked neighbour to its external id; links
    /// are only recorded by id, never by handle.
    pub fn export(
        &self,
        options: ExportOptions,
        neighbour_id: impl Fn(PieceId) -> Value,
    ) -> PieceDump {
        PieceDump {
            central_anchor: self.central_anchor.map(|a| a.as_vector()),
            structure: self.structure.serialize(),
            size: self.size.map(|s| SizeDump { radius: s.radius }),
            metadata: self.metadata.clone(),
            connections: (!options.compact)
                .then(|| ConnectionsDump::from_links(self.connections, neighbour_id)),
        }
    }
}
