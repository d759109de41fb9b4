// Defines an Axis-Aligned Bounding Box

use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Creates a new AABB, sorting the corners so that `min <= max` on both axes.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Aabb {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Creates an AABB from its top-left corner and size.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Aabb::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    /// A zero-sized box at `point`.
    pub fn point(point: Vec2) -> Self {
        Aabb { min: point, max: point }
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Aabb::point(*first);
        for point in rest {
            aabb.min = aabb.min.min(*point);
            aabb.max = aabb.max.max(*point);
        }
        Some(aabb)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }

    /// Inclusive intersection: touching boxes intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }

    /// True if `other` lies entirely inside this box (boundary inclusive).
    pub fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Merges another AABB into this one, expanding this AABB to contain both.
    pub fn merge(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Returns this box moved by `offset`.
    pub fn translate(&self, offset: Vec2) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Splits the box into its four quadrants in NW, NE, SW, SE order (y grows downward).
    pub fn quadrants(&self) -> [Aabb; 4] {
        let c = self.center();
        [
            Aabb::new(self.min, c),
            Aabb::new(Vec2::new(c.x, self.min.y), Vec2::new(self.max.x, c.y)),
            Aabb::new(Vec2::new(self.min.x, c.y), Vec2::new(c.x, self.max.y)),
            Aabb::new(c, self.max),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_corners() {
        let aabb = Aabb::new(Vec2::new(5.0, -1.0), Vec2::new(1.0, 3.0));
        assert_eq!(aabb.min, Vec2::new(1.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_overlaps_is_strict_intersects_is_not() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let touching = Aabb::from_rect(10.0, 0.0, 10.0, 10.0);
        let overlapping = Aabb::from_rect(5.0, 5.0, 10.0, 10.0);
        let apart = Aabb::from_rect(11.0, 0.0, 1.0, 1.0);

        assert!(!a.overlaps(&touching));
        assert!(a.intersects(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_contains_and_merge() {
        let mut a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let inner = Aabb::from_rect(2.0, 2.0, 1.0, 1.0);
        assert!(a.contains(&inner));
        assert!(!inner.contains(&a));
        assert!(a.contains(&a));

        a.merge(&Aabb::from_rect(-5.0, 5.0, 1.0, 20.0));
        assert_eq!(a, Aabb::new(Vec2::new(-5.0, 0.0), Vec2::new(10.0, 25.0)));
    }

    #[test]
    fn test_from_points() {
        assert!(Aabb::from_points(&[]).is_none());
        let aabb = Aabb::from_points(&[Vec2::new(1.0, 4.0), Vec2::new(-2.0, 0.5), Vec2::new(3.0, 2.0)]);
        assert_eq!(aabb, Some(Aabb::new(Vec2::new(-2.0, 0.5), Vec2::new(3.0, 4.0))));
    }

    #[test]
    fn test_quadrants_cover_parent() {
        let parent = Aabb::from_rect(0.0, 0.0, 8.0, 4.0);
        let [nw, ne, sw, se] = parent.quadrants();
        assert_eq!(nw, Aabb::from_rect(0.0, 0.0, 4.0, 2.0));
        assert_eq!(ne, Aabb::from_rect(4.0, 0.0, 4.0, 2.0));
        assert_eq!(sw, Aabb::from_rect(0.0, 2.0, 4.0, 2.0));
        assert_eq!(se, Aabb::from_rect(4.0, 2.0, 4.0, 2.0));
    }

    #[test]
    fn test_translate_and_center() {
        let aabb = Aabb::from_rect(0.0, 0.0, 2.0, 4.0).translate(Vec2::new(1.0, 1.0));
        assert_eq!(aabb.center(), Vec2::new(2.0, 3.0));
        assert_eq!(aabb.width(), 2.0);
        assert_eq!(aabb.height(), 4.0);
        assert!(aabb.contains_point(Vec2::new(1.0, 5.0)));
    }
}
