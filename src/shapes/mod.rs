pub mod ellipse;
pub mod line_segment;
pub mod polygon;
pub mod rectangle;

// Re-export the specific shape types
pub use ellipse::Ellipse;
pub use line_segment::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use crate::collision::aabb::Aabb;
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

/// Edges shorter than this (squared) get a zero normal, which the narrow phase skips.
const DEGENERATE_EDGE_EPSILON: f64 = 1e-18;

/// Geometric primitive owned by a body.
///
/// All variants share one contract: a position offset from the body, a local bounding box,
/// point containment and projection onto an axis for the separating axis test.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Polygon(Polygon),
    Ellipse(Ellipse),
    Line(Line),
}

impl Shape {
    /// `Rectangle(x, y, w, h)`: top-left corner at `(x, y)`.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Result<Shape> {
        Rectangle::new(x, y, width, height).map(Shape::Rectangle)
    }

    /// `Polygon(x, y, points)`: convex points relative to `(x, y)`.
    pub fn polygon(x: f64, y: f64, points: Vec<Vec2>) -> Result<Shape> {
        Polygon::new(x, y, points).map(Shape::Polygon)
    }

    /// `Ellipse(x, y, rx, ry)`: centered on `(x, y)`.
    pub fn ellipse(x: f64, y: f64, rx: f64, ry: f64) -> Result<Shape> {
        Ellipse::new(x, y, rx, ry).map(Shape::Ellipse)
    }

    pub fn circle(x: f64, y: f64, radius: f64) -> Result<Shape> {
        Ellipse::circle(x, y, radius).map(Shape::Ellipse)
    }

    /// `Line(x, y, [p0, p1])`: fails unless exactly two points are given.
    pub fn line(x: f64, y: f64, points: Vec<Vec2>) -> Result<Shape> {
        Line::new(x, y, points).map(Shape::Line)
    }

    /// Short variant name, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Polygon(_) => "polygon",
            Shape::Ellipse(_) => "ellipse",
            Shape::Line(_) => "line",
        }
    }

    pub fn is_ellipse(&self) -> bool {
        matches!(self, Shape::Ellipse(_))
    }

    /// Offset from the owning body.
    pub fn pos(&self) -> Vec2 {
        match self {
            Shape::Rectangle(r) => r.pos(),
            Shape::Polygon(p) => p.pos,
            Shape::Ellipse(e) => e.pos,
            Shape::Line(l) => l.pos,
        }
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        match self {
            Shape::Rectangle(r) => r.set_pos(pos),
            Shape::Polygon(p) => p.pos = pos,
            Shape::Ellipse(e) => e.pos = pos,
            Shape::Line(l) => l.pos = pos,
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        let pos = self.pos() + offset;
        self.set_pos(pos);
    }

    /// Recomputes cached edges and normals. A no-op for ellipses.
    pub fn recalc(&mut self) {
        match self {
            Shape::Rectangle(r) => r.recalc(),
            Shape::Polygon(p) => p.recalc(),
            Shape::Ellipse(_) => {}
            Shape::Line(l) => l.recalc(),
        }
    }

    /// Rotates the shape about its own origin.
    pub fn rotate(&mut self, angle: f64) {
        match self {
            Shape::Rectangle(r) => r.rotate(angle),
            Shape::Polygon(p) => p.rotate(angle),
            Shape::Ellipse(e) => e.rotate(angle),
            Shape::Line(l) => l.rotate(angle),
        }
    }

    /// Point containment in the parent (body-local) frame.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        match self {
            Shape::Rectangle(r) => r.contains_point(x, y),
            Shape::Polygon(p) => p.contains_point(x, y),
            Shape::Ellipse(e) => e.contains_point(x, y),
            Shape::Line(l) => l.contains_point(x, y),
        }
    }

    pub fn contains_point_v(&self, point: Vec2) -> bool {
        self.contains_point(point.x, point.y)
    }

    /// Bounding box in the parent frame, `pos` included.
    pub fn bounds(&self) -> Aabb {
        match self {
            Shape::Rectangle(r) => r.bounds(),
            Shape::Polygon(p) => p.bounds(),
            Shape::Ellipse(e) => e.bounds(),
            Shape::Line(l) => l.bounds(),
        }
    }

    /// Projects the shape, moved by `offset`, onto a unit `axis`.
    pub fn project(&self, offset: Vec2, axis: Vec2) -> (f64, f64) {
        match self {
            Shape::Rectangle(r) => r.project(offset, axis),
            Shape::Polygon(p) => p.project(offset, axis),
            Shape::Ellipse(e) => e.project(offset, axis),
            Shape::Line(l) => l.project(offset, axis),
        }
    }

    /// Vertices relative to `pos`. Empty for ellipses.
    pub fn points(&self) -> &[Vec2] {
        match self {
            Shape::Rectangle(r) => r.points(),
            Shape::Polygon(p) => p.points(),
            Shape::Ellipse(_) => &[],
            Shape::Line(l) => l.points(),
        }
    }

    /// Edge normals used as separating axes. Empty for ellipses.
    pub fn normals(&self) -> &[Vec2] {
        match self {
            Shape::Rectangle(r) => r.normals(),
            Shape::Polygon(p) => p.normals(),
            Shape::Ellipse(_) => &[],
            Shape::Line(l) => l.normals(),
        }
    }

    /// Vertices moved by `offset + pos`.
    pub fn world_points(&self, offset: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        let origin = offset + self.pos();
        self.points().iter().map(move |p| origin + *p)
    }

    /// Geometric center in the parent frame.
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Rectangle(r) => r.center(),
            Shape::Polygon(p) => p.center(),
            Shape::Ellipse(e) => e.center(),
            Shape::Line(l) => l.center(),
        }
    }
}

pub(crate) fn ensure_finite<'a>(mut points: impl Iterator<Item = &'a Vec2>) -> Result<()> {
    if points.all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(CollisionError::NonFiniteCoordinate)
    }
}

/// Rebuilds `edges` and `normals` for `points`. A closed outline wraps the last point back
/// to the first; an open one (a line) does not.
pub(crate) fn compute_edges(points: &[Vec2], closed: bool, edges: &mut Vec<Vec2>, normals: &mut Vec<Vec2>) {
    edges.clear();
    normals.clear();

    let n = points.len();
    let count = if closed { n } else { n.saturating_sub(1) };
    for i in 0..count {
        let edge = points[(i + 1) % n] - points[i];
        let normal = if edge.magnitude_squared() > DEGENERATE_EDGE_EPSILON {
            edge.perpendicular().normalize()
        } else {
            Vec2::ZERO
        };
        edges.push(edge);
        normals.push(normal);
    }
}

/// Min/max of `points` moved by `origin`, projected onto `axis`.
pub(crate) fn project_points(points: &[Vec2], origin: Vec2, axis: Vec2) -> (f64, f64) {
    let mut min_proj = f64::INFINITY;
    let mut max_proj = f64::NEG_INFINITY;
    for point in points {
        let projection = (origin + *point).dot(axis);
        min_proj = min_proj.min(projection);
        max_proj = max_proj.max(projection);
    }
    (min_proj, max_proj)
}

/// Boundary-inclusive point test for a convex outline of either winding.
pub(crate) fn contains_point_convex(points: &[Vec2], point: Vec2) -> bool {
    let n = points.len();
    let mut winding = 0.0_f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let side = (b - a).cross(point - a);
        if side == 0.0 {
            continue;
        }
        if winding == 0.0 {
            winding = side.signum();
        } else if side.signum() != winding {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_constructors() {
        assert_eq!(Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap().kind(), "rectangle");
        assert_eq!(Shape::circle(0.0, 0.0, 1.0).unwrap().kind(), "ellipse");
        assert!(Shape::line(0.0, 0.0, vec![Vec2::ZERO, Vec2::X, Vec2::Y]).is_err());
        assert!(Shape::polygon(0.0, 0.0, vec![Vec2::ZERO, Vec2::X]).is_err());
    }

    #[test]
    fn test_line_contains_point_scenario() {
        let line = Shape::line(0.0, 0.0, vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]).unwrap();
        assert!(line.contains_point(5.0, 0.0));
        assert!(!line.contains_point(5.0, 1.0));
    }

    #[test]
    fn test_translate_moves_bounds() {
        let mut shape = Shape::rectangle(1.0, 1.0, 2.0, 2.0).unwrap();
        shape.translate(Vec2::new(3.0, -1.0));
        assert_eq!(shape.pos(), Vec2::new(4.0, 0.0));
        assert_eq!(shape.bounds(), Aabb::from_rect(4.0, 0.0, 2.0, 2.0));
        assert!(shape.contains_point_v(Vec2::new(5.0, 1.0)));
    }

    #[test]
    fn test_ellipse_has_no_edges() {
        let ellipse = Shape::ellipse(0.0, 0.0, 2.0, 1.0).unwrap();
        assert!(ellipse.normals().is_empty());
        assert!(ellipse.points().is_empty());
        assert!(ellipse.is_ellipse());
    }

    #[test]
    fn test_world_points_apply_offset() {
        let shape = Shape::rectangle(1.0, 0.0, 1.0, 1.0).unwrap();
        let points: Vec<Vec2> = shape.world_points(Vec2::new(10.0, 10.0)).collect();
        assert_eq!(points[0], Vec2::new(11.0, 10.0));
        assert_eq!(points[2], Vec2::new(12.0, 11.0));
    }

    #[test]
    fn test_compute_edges_skips_normalizing_zero_edges() {
        let points = [Vec2::ZERO, Vec2::ZERO, Vec2::X, Vec2::Y];
        let mut edges = Vec::new();
        let mut normals = Vec::new();
        compute_edges(&points, true, &mut edges, &mut normals);
        assert_eq!(edges.len(), 4);
        assert_eq!(normals[0], Vec2::ZERO);
        assert!(normals.iter().all(|n| n.is_finite()));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Shape::polygon(0.0, 0.0, vec![Vec2::ZERO, Vec2::X, Vec2::Y]).unwrap();
        let mut copy = original.clone();
        copy.rotate(1.0);
        copy.translate(Vec2::X);
        assert_eq!(original.points()[1], Vec2::X);
        assert_eq!(original.pos(), Vec2::ZERO);
    }
}
