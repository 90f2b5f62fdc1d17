//! Polygonal outlines on a 5×5 grid.

use jigsnap_core::{Structure, Vector};

use crate::{select, Outline};

/// A polygonal outline.
///
/// The boundary is 16 vertices, four per edge, laid on a 5×5 grid scaled to
/// the piece size. A tab moves the middle vertex of its edge one cell
/// outwards and a slot one cell inwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Squared;

/// The default polygonal outline.
pub const CLASSIC: Squared = Squared;

impl Outline for Squared {
    fn draw(&self, structure: &Structure, size: Vector, border_fill: Vector) -> Vec<Vector> {
        let o = border_fill * 5.0 / size;
        let grid = [
            (-o.x, -o.y),
            (1.0, -o.y),
            (2.0, select(structure.up, -1.0 - o.y, 1.0 - o.y, -o.y)),
            (3.0, -o.y),
            (4.0 + o.x, -o.y),
            (4.0 + o.x, 1.0),
            (select(structure.right, 5.0 + o.x, 3.0 + o.x, 4.0 + o.x), 2.0),
            (4.0 + o.x, 3.0),
            (4.0 + o.x, 4.0 + o.y),
            (3.0, 4.0 + o.y),
            (2.0, select(structure.down, 5.0 + o.y, 3.0 + o.y, 4.0 + o.y)),
            (1.0, 4.0 + o.y),
            (-o.x, 4.0 + o.y),
            (-o.x, 3.0),
            (select(structure.left, -1.0 - o.x, 1.0 - o.x, -o.x), 2.0),
            (-o.x, 1.0),
        ];
        grid.iter()
            .map(|&(x, y)| Vector::new(x, y) * size / 5.0)
            .collect()
    }

    fn is_bezier(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jigsnap_core::Insert;

    fn points(raw: &[(f64, f64)]) -> Vec<Vector> {
        raw.iter().map(|&(x, y)| Vector::new(x, y)).collect()
    }

    #[test]
    fn flat_piece_is_a_square() {
        let outline = CLASSIC.draw(&Structure::flat(), Vector::square(5.0), Vector::zero());
        assert_eq!(
            outline,
            points(&[
                (0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0),
                (4.0, 0.0), (4.0, 1.0), (4.0, 2.0), (4.0, 3.0),
                (4.0, 4.0), (3.0, 4.0), (2.0, 4.0), (1.0, 4.0),
                (0.0, 4.0), (0.0, 3.0), (0.0, 2.0), (0.0, 1.0),
            ])
        );
    }

    #[test]
    fn rectangular_piece_scales_each_axis() {
        let outline = CLASSIC.draw(&Structure::flat(), Vector::new(5.0, 50.0), Vector::zero());
        assert_eq!(outline[5], Vector::new(4.0, 10.0));
        assert_eq!(outline[8], Vector::new(4.0, 40.0));
        assert_eq!(outline[15], Vector::new(0.0, 10.0));
    }

    #[test]
    fn border_fill_grows_the_boundary() {
        let outline = CLASSIC.draw(&Structure::flat(), Vector::square(5.0), Vector::square(0.5));
        assert_eq!(outline[0], Vector::new(-0.5, -0.5));
        assert_eq!(outline[1], Vector::new(1.0, -0.5));
        assert_eq!(outline[4], Vector::new(4.5, -0.5));
        assert_eq!(outline[8], Vector::new(4.5, 4.5));
        assert_eq!(outline[14], Vector::new(-0.5, 2.0));
    }

    #[test]
    fn rectangular_border_fill() {
        let outline = CLASSIC.draw(&Structure::flat(), Vector::new(5.0, 10.0), Vector::new(0.5, 1.0));
        assert_eq!(
            outline,
            points(&[
                (-0.5, -1.0), (1.0, -1.0), (2.0, -1.0), (3.0, -1.0),
                (4.5, -1.0), (4.5, 2.0), (4.5, 4.0), (4.5, 6.0),
                (4.5, 9.0), (3.0, 9.0), (2.0, 9.0), (1.0, 9.0),
                (-0.5, 9.0), (-0.5, 6.0), (-0.5, 4.0), (-0.5, 2.0),
            ])
        );
    }

    #[test]
    fn inserts_displace_middle_vertices() {
        let structure = Structure::flat()
            .with_up(Insert::Tab)
            .with_right(Insert::Slot)
            .with_down(Insert::Tab)
            .with_left(Insert::Slot);
        let outline = CLASSIC.draw(&structure, Vector::square(5.0), Vector::zero());
        assert_eq!(outline[2], Vector::new(2.0, -1.0));
        assert_eq!(outline[6], Vector::new(3.0, 2.0));
        assert_eq!(outline[10], Vector::new(2.0, 5.0));
        assert_eq!(outline[14], Vector::new(1.0, 2.0));
        assert!(!CLASSIC.is_bezier());
    }
}
