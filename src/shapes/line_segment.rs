use crate::collision::aabb::Aabb;
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

use super::{compute_edges, ensure_finite, project_points};

/// A line segment: a degenerate polygon with exactly two points and a single edge/normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Offset of the segment origin from the owning body.
    pub pos: Vec2,
    points: Vec<Vec2>,
    edges: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Line {
    /// Creates a segment at `(x, y)`. Fails unless exactly two points are given.
    pub fn new(x: f64, y: f64, points: Vec<Vec2>) -> Result<Self> {
        let pos = Vec2::new(x, y);
        if points.len() != 2 {
            return Err(CollisionError::InvalidLinePoints(points.len()));
        }
        ensure_finite(std::iter::once(&pos).chain(points.iter()))?;

        let mut line = Line {
            pos,
            points,
            edges: Vec::with_capacity(1),
            normals: Vec::with_capacity(1),
        };
        line.recalc();
        Ok(line)
    }

    /// Start point, relative to `pos`.
    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    /// End point, relative to `pos`.
    pub fn end(&self) -> Vec2 {
        self.points[1]
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn edges(&self) -> &[Vec2] {
        &self.edges
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Replaces both end points. Anything but two points is rejected.
    pub fn set_points(&mut self, points: Vec<Vec2>) -> Result<()> {
        if points.len() != 2 {
            return Err(CollisionError::InvalidLinePoints(points.len()));
        }
        ensure_finite(points.iter())?;
        self.points = points;
        self.recalc();
        Ok(())
    }

    /// Recomputes the single edge and its normal.
    pub fn recalc(&mut self) {
        compute_edges(&self.points, false, &mut self.edges, &mut self.normals);
    }

    pub fn rotate(&mut self, angle: f64) {
        for point in &mut self.points {
            *point = point.rotate(angle);
        }
        self.recalc();
    }

    /// Calculates the length of the line segment.
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    /// Returns the direction vector of the line segment (from start to end).
    pub fn direction(&self) -> Vec2 {
        self.end() - self.start()
    }

    /// True only if `(x, y)` lies exactly on the segment.
    ///
    /// Uses the colinearity equation `(y - y0)(x1 - x0) = (y1 - y0)(x - x0)` and then
    /// requires the point to fall between the end points.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let x = x - self.pos.x;
        let y = y - self.pos.y;
        let start = self.start();
        let end = self.end();

        #[allow(clippy::float_cmp)]
        let colinear = (y - start.y) * (end.x - start.x) == (end.y - start.y) * (x - start.x);
        colinear
            && x >= start.x.min(end.x)
            && x <= start.x.max(end.x)
            && y >= start.y.min(end.y)
            && y <= start.y.max(end.y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.start(), self.end()).translate(self.pos)
    }

    pub fn project(&self, offset: Vec2, axis: Vec2) -> (f64, f64) {
        project_points(&self.points, offset + self.pos, axis)
    }

    /// Midpoint, including `pos`.
    pub fn center(&self) -> Vec2 {
        self.pos + (self.start() + self.end()) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    const EPSILON: f64 = 1e-10;

    fn horizontal() -> Line {
        Line::new(0.0, 0.0, vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_line_requires_two_points() {
        let three = vec![Vec2::ZERO, Vec2::X, Vec2::Y];
        assert_eq!(Line::new(0.0, 0.0, three).unwrap_err(), CollisionError::InvalidLinePoints(3));
        assert_eq!(Line::new(0.0, 0.0, vec![Vec2::ZERO]).unwrap_err(), CollisionError::InvalidLinePoints(1));
    }

    #[test]
    fn test_line_single_edge_and_normal() {
        let line = horizontal();
        assert_eq!(line.edges(), &[Vec2::new(10.0, 0.0)]);
        assert_eq!(line.normals().len(), 1);
        assert_abs_diff_eq!(line.normals()[0], Vec2::new(0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_line_contains_point() {
        let line = horizontal();
        assert!(line.contains_point(5.0, 0.0));
        assert!(!line.contains_point(5.0, 1.0));
        assert!(!line.contains_point(15.0, 0.0));
        assert!(line.contains_point(0.0, 0.0));
    }

    #[test]
    fn test_line_contains_point_with_offset() {
        let line = Line::new(2.0, 2.0, vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0)]).unwrap();
        assert!(line.contains_point(4.0, 4.0));
        assert!(!line.contains_point(1.0, 1.0));
    }

    #[test]
    fn test_line_length_direction_center() {
        let line = Line::new(1.0, 0.0, vec![Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0)]).unwrap();
        assert_abs_diff_eq!(line.length(), 5.0, epsilon = EPSILON);
        assert_eq!(line.direction(), Vec2::new(3.0, 4.0));
        assert_eq!(line.center(), Vec2::new(3.5, 4.0));
        assert_eq!(line.bounds(), Aabb::new(Vec2::new(2.0, 2.0), Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn test_line_set_points_validates() {
        let mut line = horizontal();
        assert!(line.set_points(vec![Vec2::ZERO; 3]).is_err());
        line.set_points(vec![Vec2::ZERO, Vec2::new(0.0, 3.0)]).unwrap();
        assert_eq!(line.edges(), &[Vec2::new(0.0, 3.0)]);
        assert_abs_diff_eq!(line.normals()[0], Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_zero_length_line_has_zero_normal() {
        let line = Line::new(0.0, 0.0, vec![Vec2::X, Vec2::X]).unwrap();
        assert_eq!(line.normals()[0], Vec2::ZERO);
    }
}
