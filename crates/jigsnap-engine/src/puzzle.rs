//! The piece arena and every operation that spans more than one piece.

use std::fmt;
use std::mem;
use std::rc::Rc;

use indexmap::IndexMap;
use jigsnap_core::pair::{self, Pair};
use jigsnap_core::{Axis, Direction, Size, Structure, Vector};
use serde_json::Value;
use tracing::{debug, debug_span, trace};

use crate::config::PuzzleSettings;
use crate::connector::{Connector, Requirement};
use crate::drag::DragMode;
use crate::dump::{ExportOptions, PieceDump, PuzzleDump, VectorLike};
use crate::error::{ConfigError, ConnectionError, PuzzleError};
use crate::id::PieceId;
use crate::metadata::Metadata;
use crate::piece::{Piece, PieceConfig};
use crate::shuffler::{Random, Shuffler};
use crate::template::PieceTemplate;
use crate::validator::Validator;

/// A set of pieces, the settings they share and the rules that connect them.
///
/// Pieces are addressed by [`PieceId`]. Handles are only meaningful for the
/// puzzle that issued them; passing a foreign handle panics.
pub struct Puzzle {
    pieces: Vec<Piece>,
    settings: PuzzleSettings,
    drag_mode: DragMode,
    horizontal_connector: Connector,
    vertical_connector: Connector,
    validator: Validator,
    templates: IndexMap<String, PieceTemplate>,
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Puzzle")
            .field("pieces", &self.pieces.len())
            .field("settings", &self.settings)
            .field("drag_mode", &self.drag_mode)
            .field("validator", &self.validator)
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::with_valid_settings(PuzzleSettings::default())
    }
}

impl Puzzle {
    /// Create an empty puzzle.
    pub fn new(settings: PuzzleSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::with_valid_settings(settings))
    }

    fn with_valid_settings(settings: PuzzleSettings) -> Self {
        Self {
            pieces: Vec::new(),
            settings,
            drag_mode: DragMode::default(),
            horizontal_connector: Connector::horizontal(),
            vertical_connector: Connector::vertical(),
            validator: Validator::null(),
            templates: IndexMap::new(),
        }
    }

    // ── Settings ────────────────────────────────────────────────

    /// The puzzle settings.
    pub fn settings(&self) -> &PuzzleSettings {
        &self.settings
    }

    /// Size inherited by pieces without their own.
    pub fn piece_size(&self) -> Size {
        self.settings.piece_size
    }

    /// Radius inherited by pieces without their own.
    pub fn piece_radius(&self) -> Vector {
        self.settings.piece_size.radius
    }

    /// Diameter inherited by pieces without their own.
    pub fn piece_diameter(&self) -> Vector {
        self.settings.piece_size.diameter
    }

    /// Connection proximity.
    pub fn proximity(&self) -> f64 {
        self.settings.proximity
    }

    // ── Pieces ──────────────────────────────────────────────────

    /// Create and register a piece.
    pub fn new_piece(&mut self, structure: Structure, config: PieceConfig) -> PieceId {
        self.add_piece(Piece::new(structure, config))
    }

    /// Register an existing piece. Its links are cleared.
    pub fn add_piece(&mut self, mut piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len() as u32);
        piece.belong_to(id, self.settings.piece_size);
        for direction in Direction::ALL {
            piece.set_connection(direction, None);
        }
        self.pieces.push(piece);
        id
    }

    /// All pieces in registration order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Handles of all pieces in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PieceId> {
        (0..self.pieces.len() as u32).map(PieceId)
    }

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the puzzle has no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The piece behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this puzzle.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Mutable access to the piece behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this puzzle.
    pub fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// The piece behind `id`, if it exists.
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// The first registered piece.
    pub fn head(&self) -> Option<PieceId> {
        (!self.pieces.is_empty()).then_some(PieceId(0))
    }

    /// Central anchors of all placed pieces, in registration order.
    ///
    /// Unplaced pieces are skipped, so indexes only line up with
    /// [`pieces`](Puzzle::pieces) once every piece is placed.
    pub fn points(&self) -> Vec<Pair> {
        self.pieces
            .iter()
            .filter_map(|p| p.central_anchor().map(|a| a.as_pair()))
            .collect()
    }

    /// [`points`](Puzzle::points) in piece-diameter units. Unplaced pieces
    /// are skipped.
    pub fn refs(&self) -> Vec<Pair> {
        let diameter = self.piece_diameter();
        self.points()
            .into_iter()
            .map(|(x, y)| (x / diameter.x, y / diameter.y))
            .collect()
    }

    /// Whether every piece is linked to at least one neighbour.
    ///
    /// An empty puzzle is trivially connected.
    pub fn connected(&self) -> bool {
        self.pieces.iter().all(Piece::connected)
    }

    /// Merge `metadata[i]` into the i-th piece.
    ///
    /// Extra entries are ignored, and pieces beyond the list are untouched.
    pub fn annotate_all(&mut self, metadata: Vec<Metadata>) {
        for (piece, metadata) in self.pieces.iter_mut().zip(metadata) {
            piece.annotate(metadata);
        }
    }

    /// Move the i-th piece to `points[i]`, without cascading.
    pub fn relocate_all(&mut self, points: &[Vector]) {
        for (piece, point) in self.pieces.iter_mut().zip(points) {
            piece.relocate_to(point.x, point.y, false);
        }
    }

    /// Find the piece whose metadata id equals `id`.
    pub fn piece_with_id(&self, id: &Value) -> Result<PieceId, PuzzleError> {
        self.pieces
            .iter()
            .position(|p| p.id() == Some(id))
            .map(|index| PieceId(index as u32))
            .ok_or_else(|| PuzzleError::UnknownPiece { id: id.to_string() })
    }

    // ── Templates ───────────────────────────────────────────────

    /// Register a template under `name`, replacing any previous one.
    pub fn define_template(&mut self, name: impl Into<String>, template: PieceTemplate) {
        self.templates.insert(name.into(), template);
    }

    /// The template registered under `name`.
    pub fn template(&self, name: &str) -> Option<&PieceTemplate> {
        self.templates.get(name)
    }

    /// Create a piece from a registered template.
    ///
    /// Settings in `config` override the template's.
    pub fn new_piece_from_template(
        &mut self,
        name: &str,
        config: PieceConfig,
    ) -> Result<PieceId, PuzzleError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| PuzzleError::UnknownTemplate { name: name.into() })?;
        let (structure, config) = template.instantiate(config);
        Ok(self.new_piece(structure, config))
    }

    // ── Connectors ──────────────────────────────────────────────

    /// The shared connector for `axis`.
    pub fn connector(&self, axis: Axis) -> &Connector {
        match axis {
            Axis::Horizontal => &self.horizontal_connector,
            Axis::Vertical => &self.vertical_connector,
        }
    }

    /// The connector `piece` uses along `axis`: its own, else the shared one.
    pub fn connector_for(&self, piece: PieceId, axis: Axis) -> &Connector {
        self.piece(piece)
            .own_connector(axis)
            .unwrap_or_else(|| self.connector(axis))
    }

    fn connector_mut(&mut self, axis: Axis) -> &mut Connector {
        match axis {
            Axis::Horizontal => &mut self.horizontal_connector,
            Axis::Vertical => &mut self.vertical_connector,
        }
    }

    /// Require `f` to accept every connection on both axes.
    pub fn attach_connection_requirement(&mut self, f: impl Fn(&Piece, &Piece) -> bool + 'static) {
        let requirement: Requirement = Rc::new(f);
        self.horizontal_connector
            .attach_shared_requirement(Rc::clone(&requirement));
        self.vertical_connector.attach_shared_requirement(requirement);
    }

    /// Require `f` to accept every horizontal connection.
    pub fn attach_horizontal_connection_requirement(
        &mut self,
        f: impl Fn(&Piece, &Piece) -> bool + 'static,
    ) {
        self.connector_mut(Axis::Horizontal).attach_requirement(f);
    }

    /// Require `f` to accept every vertical connection.
    pub fn attach_vertical_connection_requirement(
        &mut self,
        f: impl Fn(&Piece, &Piece) -> bool + 'static,
    ) {
        self.connector_mut(Axis::Vertical).attach_requirement(f);
    }

    /// Remove the requirements from both shared connectors.
    pub fn clear_connection_requirements(&mut self) {
        self.horizontal_connector.clear_requirement();
        self.vertical_connector.clear_requirement();
    }

    // ── Connections ─────────────────────────────────────────────

    /// Connect `one`'s right edge with `other`'s left edge.
    pub fn connect_horizontally_with(
        &mut self,
        one: PieceId,
        other: PieceId,
        back: bool,
    ) -> Result<(), ConnectionError> {
        self.connect_along(Axis::Horizontal, one, other, back)
    }

    /// Connect `one`'s bottom edge with `other`'s top edge.
    pub fn connect_vertically_with(
        &mut self,
        one: PieceId,
        other: PieceId,
        back: bool,
    ) -> Result<(), ConnectionError> {
        self.connect_along(Axis::Vertical, one, other, back)
    }

    fn connect_along(
        &mut self,
        axis: Axis,
        one: PieceId,
        other: PieceId,
        back: bool,
    ) -> Result<(), ConnectionError> {
        let connector = self.connector_for(one, axis).clone();
        let proximity = self.proximity();
        connector.connect_with(self, one, other, proximity, back)
    }

    /// Connect horizontally if allowed. Returns whether a connection was made.
    pub fn try_connect_horizontally_with(&mut self, one: PieceId, other: PieceId, back: bool) -> bool {
        self.try_connect_along(Axis::Horizontal, one, other, back)
    }

    /// Connect vertically if allowed. Returns whether a connection was made.
    pub fn try_connect_vertically_with(&mut self, one: PieceId, other: PieceId, back: bool) -> bool {
        self.try_connect_along(Axis::Vertical, one, other, back)
    }

    /// Try both axes, horizontal first.
    pub fn try_connect_with(&mut self, one: PieceId, other: PieceId, back: bool) {
        self.try_connect_horizontally_with(one, other, back);
        self.try_connect_vertically_with(one, other, back);
    }

    fn try_connect_along(&mut self, axis: Axis, one: PieceId, other: PieceId, back: bool) -> bool {
        self.can_connect_along(axis, one, other) && self.connect_along(axis, one, other, back).is_ok()
    }

    /// Whether `one` can connect rightwards with `other`.
    pub fn can_connect_horizontally_with(&self, one: PieceId, other: PieceId) -> bool {
        self.can_connect_along(Axis::Horizontal, one, other)
    }

    /// Whether `one` can connect downwards with `other`.
    pub fn can_connect_vertically_with(&self, one: PieceId, other: PieceId) -> bool {
        self.can_connect_along(Axis::Vertical, one, other)
    }

    fn can_connect_along(&self, axis: Axis, one: PieceId, other: PieceId) -> bool {
        self.connector_for(one, axis)
            .can_connect_with(self.piece(one), self.piece(other), self.proximity())
    }

    /// Whether `one`'s right anchor is close to `other`'s left anchor.
    pub fn horizontally_close_to(&self, one: PieceId, other: PieceId) -> bool {
        self.connector_for(one, Axis::Horizontal)
            .close_to(self.piece(one), self.piece(other), self.proximity())
    }

    /// Whether `one`'s bottom anchor is close to `other`'s top anchor.
    pub fn vertically_close_to(&self, one: PieceId, other: PieceId) -> bool {
        self.connector_for(one, Axis::Vertical)
            .close_to(self.piece(one), self.piece(other), self.proximity())
    }

    /// Whether `one`'s right insert locks with `other`'s left insert.
    pub fn horizontally_match(&self, one: PieceId, other: PieceId) -> bool {
        self.connector_for(one, Axis::Horizontal)
            .matches(self.piece(one), self.piece(other))
    }

    /// Whether `one`'s bottom insert locks with `other`'s top insert.
    pub fn vertically_match(&self, one: PieceId, other: PieceId) -> bool {
        self.connector_for(one, Axis::Vertical)
            .matches(self.piece(one), self.piece(other))
    }

    /// Snap `one` and `other` together horizontally without linking them.
    pub fn attract_horizontally(&mut self, one: PieceId, other: PieceId, back: bool) {
        let connector = self.connector_for(one, Axis::Horizontal).clone();
        connector.attract(self, one, other, back);
    }

    /// Snap `one` and `other` together vertically without linking them.
    pub fn attract_vertically(&mut self, one: PieceId, other: PieceId, back: bool) {
        let connector = self.connector_for(one, Axis::Vertical).clone();
        connector.attract(self, one, other, back);
    }

    /// Link `one`'s `forward` edge with `other`'s opposite edge.
    ///
    /// Links either piece previously held on those edges are severed on
    /// both sides, so links stay symmetric.
    pub(crate) fn link(&mut self, one: PieceId, other: PieceId, forward: Direction) {
        let backward = forward.opposite();
        if let Some(stale) = self.piece(one).connection(forward).filter(|s| *s != other) {
            trace!(piece = %one, %stale, "replacing stale link");
            self.piece_mut(stale).set_connection(backward, None);
        }
        if let Some(stale) = self.piece(other).connection(backward).filter(|s| *s != one) {
            trace!(piece = %other, %stale, "replacing stale link");
            self.piece_mut(stale).set_connection(forward, None);
        }
        self.piece_mut(one).set_connection(forward, Some(other));
        self.piece_mut(other).set_connection(backward, Some(one));
    }

    pub(crate) fn fire_connect(&mut self, one: PieceId, other: PieceId) {
        let mut listeners = mem::take(&mut self.pieces[one.index()].connect_listeners);
        for listener in listeners.iter_mut() {
            listener(self.piece(one), self.piece(other));
        }
        self.pieces[one.index()].connect_listeners = listeners;
    }

    fn fire_disconnect(&mut self, one: PieceId, others: &[PieceId]) {
        let mut listeners = mem::take(&mut self.pieces[one.index()].disconnect_listeners);
        for other in others {
            for listener in listeners.iter_mut() {
                listener(self.piece(one), self.piece(*other));
            }
        }
        self.pieces[one.index()].disconnect_listeners = listeners;
    }

    /// Sever every link of `piece`.
    ///
    /// Fires one disconnect event per former neighbour. A piece without
    /// links is left alone.
    pub fn disconnect(&mut self, piece: PieceId) {
        let former = self.piece(piece).present_connections();
        if former.is_empty() {
            return;
        }
        for direction in Direction::ALL {
            if let Some(other) = self.piece(piece).connection(direction) {
                if self.piece(other).connection(direction.opposite()) == Some(piece) {
                    self.piece_mut(other).set_connection(direction.opposite(), None);
                }
                self.piece_mut(piece).set_connection(direction, None);
            }
        }
        debug!(%piece, neighbours = former.len(), "piece disconnected");
        self.fire_disconnect(piece, &former);
    }

    /// Sever every link in the puzzle.
    pub fn disconnect_all(&mut self) {
        for id in self.ids() {
            self.disconnect(id);
        }
    }

    /// Connect every pair of pieces that can connect.
    pub fn autoconnect(&mut self) {
        let _span = debug_span!("autoconnect", pieces = self.pieces.len()).entered();
        for id in self.ids() {
            self.autoconnect_with(id);
        }
    }

    /// Connect `piece` with every piece it can connect to, in either role.
    pub fn autoconnect_with(&mut self, piece: PieceId) {
        for other in self.ids().filter(|other| *other != piece) {
            self.try_connect_with(piece, other, false);
            self.try_connect_with(other, piece, true);
        }
    }

    // ── Movement ────────────────────────────────────────────────

    /// Move `piece` alone. See [`Piece::translate`].
    pub fn translate(&mut self, piece: PieceId, dx: f64, dy: f64, quiet: bool) {
        self.piece_mut(piece).translate(dx, dy, quiet);
    }

    /// Move `piece` and everything connected to it by the same delta.
    ///
    /// Each piece of the group moves exactly once, cycles included. Only
    /// `piece` itself honours `quiet`.
    pub fn push(&mut self, piece: PieceId, dx: f64, dy: f64, quiet: bool) {
        let mut pushed = vec![false; self.pieces.len()];
        pushed[piece.index()] = true;
        self.translate(piece, dx, dy, quiet);

        let mut pending = vec![piece];
        while let Some(current) = pending.pop() {
            for next in self.piece(current).present_connections() {
                if pushed[next.index()] {
                    continue;
                }
                pushed[next.index()] = true;
                trace!(piece = %next, from = %current, dx, dy, "pushed");
                self.translate(next, dx, dy, false);
                pending.push(next);
            }
        }
    }

    /// Whether dragging `piece` by `(dx, dy)` disconnects it under the
    /// current drag mode.
    pub fn drag_should_disconnect(&self, piece: PieceId, dx: f64, dy: f64) -> bool {
        self.drag_mode.drag_should_disconnect(self, piece, dx, dy)
    }

    /// Drag `piece`: detach and move it alone, or push its group,
    /// depending on the drag mode. A null delta is a no-op.
    pub fn drag(&mut self, piece: PieceId, dx: f64, dy: f64, quiet: bool) {
        if pair::is_null(dx, dy) {
            return;
        }
        if self.drag_should_disconnect(piece, dx, dy) {
            self.disconnect(piece);
            self.translate(piece, dx, dy, quiet);
        } else {
            self.push(piece, dx, dy, quiet);
        }
    }

    /// Release `piece`, connecting it with whatever it now touches.
    #[allow(clippy::should_implement_trait)]
    pub fn drop(&mut self, piece: PieceId) {
        self.autoconnect_with(piece);
    }

    /// [`drag`](Puzzle::drag) then [`drop`](Puzzle::drop).
    pub fn drag_and_drop(&mut self, piece: PieceId, dx: f64, dy: f64) {
        self.drag(piece, dx, dy, false);
        self.drop(piece);
    }

    /// Move every piece by the same delta. Links are kept.
    pub fn translate_all(&mut self, dx: f64, dy: f64) {
        for piece in &mut self.pieces {
            piece.translate(dx, dy, false);
        }
    }

    /// Scatter the pieces with `shuffler` and reconnect what lands together.
    ///
    /// Every link is severed before anything moves.
    pub fn shuffle_with<S: Shuffler + ?Sized>(&mut self, shuffler: &mut S) {
        let _span = debug_span!("shuffle", pieces = self.pieces.len()).entered();
        self.disconnect_all();
        let targets = shuffler.shuffle(&self.pieces);
        self.relocate_all(&targets);
        self.autoconnect();
    }

    /// Scatter the pieces uniformly in `[0, max_x] × [0, max_y]`.
    pub fn shuffle(&mut self, max_x: f64, max_y: f64) {
        self.shuffle_with(&mut Random::new(max_x, max_y));
    }

    /// Shift all pieces so their extent fits between `min` and `max`.
    ///
    /// Each axis is handled on its own. When the pieces are wider than the
    /// frame, the `min` bound wins.
    pub fn reframe(&mut self, min: Vector, max: Vector) {
        let mut extent: Option<(Vector, Vector)> = None;
        for piece in &self.pieces {
            let Some(anchor) = piece.central_anchor() else {
                continue;
            };
            let center = anchor.as_vector();
            let (lo, hi) = (center - piece.radius(), center + piece.radius());
            extent = Some(match extent {
                Some((a, b)) => (a.min(lo), b.max(hi)),
                None => (lo, hi),
            });
        }
        let Some((lo, hi)) = extent else {
            return;
        };
        let dx = reframe_delta(lo.x, hi.x, min.x, max.x);
        let dy = reframe_delta(lo.y, hi.y, min.y, max.y);
        debug!(dx, dy, "reframing");
        self.translate_all(dx, dy);
    }

    // ── Drag mode ───────────────────────────────────────────────

    /// The current drag mode.
    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Replace the drag mode.
    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.drag_mode = mode;
    }

    /// Disconnect on drag only when the move is unconstrained.
    pub fn try_disconnection_while_dragging(&mut self) {
        self.set_drag_mode(DragMode::TryDisconnection);
    }

    /// Always disconnect on drag.
    pub fn force_disconnection_while_dragging(&mut self) {
        self.set_drag_mode(DragMode::ForceDisconnection);
    }

    /// Never disconnect on drag.
    pub fn force_connection_while_dragging(&mut self) {
        self.set_drag_mode(DragMode::ForceConnection);
    }

    // ── Validation ──────────────────────────────────────────────

    /// Replace the validator.
    pub fn attach_validator(&mut self, validator: Validator) {
        self.validator = validator;
    }

    /// The attached validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Register a listener on the attached validator.
    pub fn on_valid(&mut self, f: impl FnMut(&Puzzle) + 'static) {
        self.validator.on_valid(f);
    }

    /// Evaluate the validator. Fires nothing.
    pub fn is_valid(&self) -> bool {
        self.validator.is_valid(self)
    }

    /// Evaluate the validator, firing its listeners if the puzzle just
    /// became valid.
    ///
    /// The result is cached before any listener runs, so listeners observe
    /// it through [`valid`](Puzzle::valid).
    pub fn validate(&mut self) {
        let valid = self.validator.is_valid(self);
        if !self.validator.record(valid) {
            return;
        }
        let mut listeners = self.validator.take_listeners();
        for listener in listeners.iter_mut() {
            listener(self);
        }
        self.validator.restore_listeners(listeners);
    }

    /// Evaluate and cache the validator result. Fires nothing.
    pub fn update_validity(&mut self) {
        let valid = self.validator.is_valid(self);
        self.validator.record(valid);
    }

    /// The last cached validator result.
    pub fn valid(&self) -> Option<bool> {
        self.validator.valid()
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Persist one piece. Neighbours are recorded by their metadata id.
    pub fn export_piece(&self, piece: PieceId, options: ExportOptions) -> PieceDump {
        self.piece(piece).export(options, |other| {
            self.piece(other).id().cloned().unwrap_or(Value::Null)
        })
    }

    /// Persist the whole puzzle.
    pub fn export(&self, options: ExportOptions) -> PuzzleDump {
        PuzzleDump {
            piece_radius: Some(VectorLike::Vector(self.piece_radius())),
            piece_size: None,
            proximity: self.proximity(),
            pieces: self.ids().map(|id| self.export_piece(id, options)).collect(),
        }
    }

    /// Rebuild a puzzle from its record, then autoconnect it.
    ///
    /// `pieceRadius` takes precedence over `pieceSize`, which is read as
    /// a diameter.
    pub fn import(dump: &PuzzleDump) -> Result<Self, PuzzleError> {
        let piece_size = match (dump.piece_radius, dump.piece_size) {
            (Some(radius), _) => Size::from_radius(radius),
            (None, Some(diameter)) => Size::from_diameter(diameter),
            (None, None) => Size::default(),
        };
        let mut puzzle = Puzzle::new(PuzzleSettings {
            piece_size,
            proximity: dump.proximity,
        })?;
        for piece in &dump.pieces {
            puzzle.add_piece(Piece::import(piece)?);
        }
        debug!(pieces = puzzle.len(), "puzzle imported");
        puzzle.autoconnect();
        Ok(puzzle)
    }
}

fn reframe_delta(lo: f64, hi: f64, min: f64, max: f64) -> f64 {
    if lo < min {
        min - lo
    } else if hi > max {
        max - hi
    } else {
        0.0
    }
}
