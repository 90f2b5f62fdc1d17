//! Bezier outlines with rounded inserts.
//!
//! The path starts at the top-left corner and runs counter-clockwise in
//! screen space: down the left edge, along the bottom, up the right edge
//! and back along the top. After the start point every three vectors form
//! one cubic segment (two control points and an end point).

use jigsnap_core::{Axis, Structure, Vector};

use crate::{select, Outline};

/// A bezier outline with rounded inserts.
///
/// Built with [`Rounded::builder`] or [`Rounded::default`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rounded {
    bezelize: bool,
    bezel_depth: f64,
    insert_depth: f64,
    border_length: f64,
    reference_insert_axis: Option<Axis>,
}

impl Default for Rounded {
    fn default() -> Self {
        Self {
            bezelize: false,
            bezel_depth: 2.0 / 5.0,
            insert_depth: 4.0 / 5.0,
            border_length: 1.0 / 3.0,
            reference_insert_axis: None,
        }
    }
}

impl Rounded {
    /// Start building a rounded outline from the default proportions.
    pub fn builder() -> RoundedBuilder {
        RoundedBuilder {
            inner: Rounded::default(),
        }
    }

    /// Whether flat corners are bevelled.
    pub fn bezelize(&self) -> bool {
        self.bezelize
    }

    /// Bezel radius as a fraction of the shortest straight edge segment.
    pub fn bezel_depth(&self) -> f64 {
        self.bezel_depth
    }

    /// Insert protrusion as a fraction of the insert width.
    pub fn insert_depth(&self) -> f64 {
        self.insert_depth
    }

    /// Fraction of the reference length left straight on each side of an insert.
    pub fn border_length(&self) -> f64 {
        self.border_length
    }

    /// Axis whose length sizes the inserts, or the shorter axis when unset.
    pub fn reference_insert_axis(&self) -> Option<Axis> {
        self.reference_insert_axis
    }

    fn reference_insert_axis_length(&self, full_size: Vector) -> f64 {
        match self.reference_insert_axis {
            Some(axis) => axis.at_vector(&full_size),
            None => full_size.inner_min(),
        }
    }

    /// Bezel flags for the corners up-left, down-left, down-right, up-right.
    ///
    /// A corner is bevelled only when both of its edges are flat.
    pub fn bezels(&self, structure: &Structure) -> [bool; 4] {
        if !self.bezelize {
            return [false; 4];
        }
        [
            structure.left.is_none() && structure.up.is_none(),
            structure.left.is_none() && structure.down.is_none(),
            structure.right.is_none() && structure.down.is_none(),
            structure.right.is_none() && structure.up.is_none(),
        ]
    }
}

impl Outline for Rounded {
    fn draw(&self, p: &Structure, size: Vector, _border_fill: Vector) -> Vec<Vector> {
        let full = size;

        // insert width, truncated to two decimals
        let reference = self.reference_insert_axis_length(full);
        let r = (reference * (1.0 - 2.0 * self.border_length) * 100.0).trunc() / 100.0;
        // straight segment from corner to insert
        let s = (full - r) / 2.0;
        // insert protrusion
        let o = Vector::square(r) * self.insert_depth;
        let b = Vector::square(s.inner_min()) * self.bezel_depth;

        let [b0, b1, b2, b3] = self.bezels(p);
        let nx = |c: bool| if c { b.x } else { 0.0 };
        let ny = |c: bool| if c { b.y } else { 0.0 };

        let rsy = r + s.y;
        let rsx = r + s.x;
        let r2sy = r + 2.0 * s.y;
        let r2sx = r + 2.0 * s.x;

        let mut path = Path::with_capacity(49);
        path.point(nx(b0), 0.0);

        // left edge, top to bottom
        if b0 {
            path.segment([(0.0, 0.0), (0.0, 0.0), (0.0, b.y)]);
        }
        path.segment([(0.0, ny(b0)), (0.0, s.y), (0.0, s.y)]);
        let lx = select(p.left, -o.x, o.x, 0.0);
        path.segment([(lx, s.y), (lx, rsy), (0.0, rsy)]);
        path.segment([(0.0, rsy), (0.0, r2sy), (0.0, r2sy - ny(b1))]);

        // bottom edge, left to right
        if b1 {
            path.segment([(0.0, r2sy), (0.0, r2sy), (b.x, r2sy)]);
        }
        path.segment([(nx(b1), r2sy), (s.x, r2sy), (s.x, r2sy)]);
        let dy = select(p.down, r2sy + o.y, r2sy - o.y, r2sy);
        path.segment([(s.x, dy), (rsx, dy), (rsx, r2sy)]);
        path.segment([(rsx, r2sy), (r2sx, r2sy), (r2sx - nx(b2), r2sy)]);

        // right edge, bottom to top
        if b2 {
            path.segment([(r2sx, r2sy), (r2sx, r2sy), (r2sx, r2sy - b.y)]);
        }
        path.segment([(r2sx, r2sy - ny(b2)), (r2sx, rsy), (r2sx, rsy)]);
        let rx = select(p.right, r2sx + o.x, r2sx - o.x, r2sx);
        path.segment([(rx, rsy), (rx, s.y), (r2sx, s.y)]);
        path.segment([(r2sx, s.y), (r2sx, 0.0), (r2sx, ny(b3))]);

        // top edge, right to left
        if b3 {
            path.segment([(r2sx, 0.0), (r2sx, 0.0), (r2sx - b.x, 0.0)]);
        }
        path.segment([(r2sx - nx(b3), 0.0), (rsx, 0.0), (rsx, 0.0)]);
        let uy = select(p.up, -o.y, o.y, 0.0);
        path.segment([(rsx, uy), (s.x, uy), (s.x, 0.0)]);
        path.segment([(s.x, 0.0), (0.0, 0.0), (nx(b0), 0.0)]);

        path.into_points()
    }

    fn is_bezier(&self) -> bool {
        true
    }
}

/// Accumulates bezier control points.
struct Path(Vec<Vector>);

impl Path {
    fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    fn point(&mut self, x: f64, y: f64) {
        self.0.push(Vector::new(x, y));
    }

    fn segment(&mut self, controls: [(f64, f64); 3]) {
        for (x, y) in controls {
            self.point(x, y);
        }
    }

    fn into_points(self) -> Vec<Vector> {
        self.0
    }
}

// ── Builder ─────────────────────────────────────────────────────

/// Builder for [`Rounded`].
#[derive(Clone, Copy, Debug)]
pub struct RoundedBuilder {
    inner: Rounded,
}

impl RoundedBuilder {
    /// Bevel corners whose two edges are flat.
    pub fn bezelize(mut self, bezelize: bool) -> Self {
        self.inner.bezelize = bezelize;
        self
    }

    /// Set the bezel depth (default 2/5).
    pub fn bezel_depth(mut self, depth: f64) -> Self {
        self.inner.bezel_depth = depth;
        self
    }

    /// Set the insert depth (default 4/5).
    pub fn insert_depth(mut self, depth: f64) -> Self {
        self.inner.insert_depth = depth;
        self
    }

    /// Set the border length (default 1/3).
    pub fn border_length(mut self, length: f64) -> Self {
        self.inner.border_length = length;
        self
    }

    /// Size inserts from the given axis instead of the shorter one.
    pub fn reference_insert_axis(mut self, axis: Axis) -> Self {
        self.inner.reference_insert_axis = Some(axis);
        self
    }

    /// Finish building.
    pub fn build(self) -> Rounded {
        self.inner
    }
}
