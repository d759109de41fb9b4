use crate::collision::aabb::Aabb;
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

use super::{compute_edges, contains_point_convex, ensure_finite, project_points};

/// Cross products smaller than this, relative to the squared extent of the points, are
/// treated as colinear.
const COLINEAR_EPSILON: f64 = 1e-12;

/// A convex polygon defined by its vertices relative to `pos`.
///
/// `edges` and `normals` are cached and rebuilt by [`Polygon::recalc`]; every mutator on this
/// type calls it, so the cache never goes stale through the public API.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Offset of the polygon origin from the owning body.
    pub pos: Vec2,
    points: Vec<Vec2>,
    edges: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon at `(x, y)` from at least three convex, consistently wound points.
    pub fn new(x: f64, y: f64, points: Vec<Vec2>) -> Result<Self> {
        let pos = Vec2::new(x, y);
        ensure_finite(std::iter::once(&pos).chain(points.iter()))?;
        validate_convex(&points)?;

        let mut polygon = Polygon {
            pos,
            points,
            edges: Vec::new(),
            normals: Vec::new(),
        };
        polygon.recalc();
        Ok(polygon)
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

    /// Replaces the vertex list, validating it first. On error the polygon is unchanged.
    pub fn set_points(&mut self, points: Vec<Vec2>) -> Result<()> {
        ensure_finite(points.iter())?;
        validate_convex(&points)?;
        self.points = points;
        self.recalc();
        Ok(())
    }

    /// Recomputes edges and normals from the current points.
    pub fn recalc(&mut self) {
        compute_edges(&self.points, true, &mut self.edges, &mut self.normals);
    }

    /// Rotates the points about the polygon origin.
    pub fn rotate(&mut self, angle: f64) {
        for point in &mut self.points {
            *point = point.rotate(angle);
        }
        self.recalc();
    }

    /// Point-in-convex-polygon test, boundary inclusive. `(x, y)` is in the parent frame.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        contains_point_convex(&self.points, Vec2::new(x, y) - self.pos)
    }

    /// Local bounding box, including `pos`.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.points)
            .unwrap_or_else(|| Aabb::point(Vec2::ZERO))
            .translate(self.pos)
    }

    /// Projects the polygon, moved by `offset + pos`, onto `axis`.
    pub fn project(&self, offset: Vec2, axis: Vec2) -> (f64, f64) {
        project_points(&self.points, offset + self.pos, axis)
    }

    /// Calculates the area using the Shoelace formula.
    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }

    /// Average of the vertices, including `pos`.
    pub fn center(&self) -> Vec2 {
        let sum = self.points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        self.pos + sum / self.points.len() as f64
    }
}

fn signed_area(points: &[Vec2]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        area += points[i].cross(points[(i + 1) % n]);
    }
    area / 2.0
}

/// Rejects point lists that are too short, have no area, or change winding direction.
fn validate_convex(points: &[Vec2]) -> Result<()> {
    let n = points.len();
    if n < 3 {
        return Err(CollisionError::TooFewPoints(n));
    }
    let extent = Aabb::from_points(points).map_or(0.0, |b| b.width().max(b.height()));
    let tolerance = COLINEAR_EPSILON * extent * extent;
    if signed_area(points).abs() <= tolerance {
        return Err(CollisionError::DegeneratePolygon);
    }

    let mut winding = 0.0_f64;
    for i in 0..n {
        let e1 = points[(i + 1) % n] - points[i];
        let e2 = points[(i + 2) % n] - points[(i + 1) % n];
        let turn = e1.cross(e2);
        if turn.abs() <= tolerance {
            continue;
        }
        if winding == 0.0 {
            winding = turn.signum();
        } else if turn.signum() != winding {
            return Err(CollisionError::NonConvexPolygon);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_polygon_new_computes_edges_and_normals() {
        let polygon = Polygon::new(0.0, 0.0, unit_square()).unwrap();
        assert_eq!(polygon.edges().len(), 4);
        assert_eq!(polygon.edges()[0], Vec2::new(1.0, 0.0));
        assert_eq!(polygon.edges()[3], Vec2::new(0.0, -1.0));
        assert_abs_diff_eq!(polygon.normals()[0], Vec2::new(0.0, 1.0), epsilon = EPSILON);
        assert_abs_diff_eq!(polygon.normals()[1], Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_polygon_too_few_points() {
        let err = Polygon::new(0.0, 0.0, vec![Vec2::ZERO, Vec2::X]).unwrap_err();
        assert_eq!(err, CollisionError::TooFewPoints(2));
    }

    #[test]
    fn test_polygon_degenerate_and_non_convex() {
        let colinear = vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        assert_eq!(Polygon::new(0.0, 0.0, colinear).unwrap_err(), CollisionError::DegeneratePolygon);

        let dart = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(1.0, 2.0),
        ];
        assert_eq!(Polygon::new(0.0, 0.0, dart).unwrap_err(), CollisionError::NonConvexPolygon);
    }

    #[test]
    fn test_polygon_validation_scales_with_size() {
        let tiny: Vec<Vec2> = unit_square().into_iter().map(|p| p * 1e-7).collect();
        let polygon = Polygon::new(0.0, 0.0, tiny).unwrap();
        assert_abs_diff_eq!(polygon.area(), 1e-14, epsilon = 1e-20);

        let tiny_colinear = vec![Vec2::ZERO, Vec2::new(1e-7, 0.0), Vec2::new(2e-7, 0.0)];
        assert_eq!(Polygon::new(0.0, 0.0, tiny_colinear).unwrap_err(), CollisionError::DegeneratePolygon);

        let same_point = vec![Vec2::new(1.0, 1.0); 3];
        assert_eq!(Polygon::new(0.0, 0.0, same_point).unwrap_err(), CollisionError::DegeneratePolygon);
    }

    #[test]
    fn test_polygon_rejects_non_finite() {
        let points = vec![Vec2::ZERO, Vec2::new(f64::NAN, 0.0), Vec2::Y];
        assert_eq!(Polygon::new(0.0, 0.0, points).unwrap_err(), CollisionError::NonFiniteCoordinate);
    }

    #[test]
    fn test_polygon_area_and_center() {
        let polygon = Polygon::new(2.0, 3.0, unit_square()).unwrap();
        assert_abs_diff_eq!(polygon.area(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(polygon.center(), Vec2::new(2.5, 3.5), epsilon = EPSILON);
    }

    #[test]
    fn test_polygon_contains_point() {
        let polygon = Polygon::new(10.0, 0.0, unit_square()).unwrap();
        assert!(polygon.contains_point(10.5, 0.5));
        assert!(polygon.contains_point(10.0, 0.0)); // corner is inclusive
        assert!(!polygon.contains_point(0.5, 0.5));
        assert!(!polygon.contains_point(11.5, 0.5));
    }

    #[test]
    fn test_polygon_rotate_recalculates() {
        let mut polygon = Polygon::new(0.0, 0.0, unit_square()).unwrap();
        polygon.rotate(PI / 2.0);
        assert_abs_diff_eq!(polygon.points()[1], Vec2::new(0.0, 1.0), epsilon = EPSILON);
        assert_abs_diff_eq!(polygon.edges()[0], Vec2::new(0.0, 1.0), epsilon = EPSILON);
        assert_abs_diff_eq!(polygon.normals()[0], Vec2::new(-1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_polygon_set_points_keeps_old_on_error() {
        let mut polygon = Polygon::new(0.0, 0.0, unit_square()).unwrap();
        assert!(polygon.set_points(vec![Vec2::ZERO]).is_err());
        assert_eq!(polygon.points().len(), 4);

        polygon
            .set_points(vec![Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)])
            .unwrap();
        assert_eq!(polygon.edges().len(), 3);
        assert_eq!(polygon.edges()[1], Vec2::new(-2.0, 2.0));
    }

    #[test]
    fn test_polygon_bounds_and_projection() {
        let polygon = Polygon::new(1.0, 1.0, unit_square()).unwrap();
        assert_eq!(polygon.bounds(), Aabb::from_rect(1.0, 1.0, 1.0, 1.0));
        let (min, max) = polygon.project(Vec2::new(10.0, 0.0), Vec2::X);
        assert_abs_diff_eq!(min, 11.0, epsilon = EPSILON);
        assert_abs_diff_eq!(max, 12.0, epsilon = EPSILON);
    }

    #[test]
    fn test_polygon_clone_is_independent() {
        let original = Polygon::new(0.0, 0.0, unit_square()).unwrap();
        let mut copy = original.clone();
        copy.rotate(1.0);
        assert_eq!(original.points()[1], Vec2::new(1.0, 0.0));
        assert_ne!(copy.points()[1], original.points()[1]);
    }
}
