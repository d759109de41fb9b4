use crate::collision::aabb::Aabb;
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

use super::rectangle::check_dimension;

/// An ellipse centered on `pos` with radii `rx`, `ry`, optionally rotated.
///
/// Ellipses have no edges; the narrow phase tests them along center axes instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    /// Center, relative to the owning body.
    pub pos: Vec2,
    rx: f64,
    ry: f64,
    angle: f64,
}

impl Ellipse {
    pub fn new(x: f64, y: f64, rx: f64, ry: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(CollisionError::NonFiniteCoordinate);
        }
        check_dimension("rx", rx)?;
        check_dimension("ry", ry)?;
        Ok(Ellipse {
            pos: Vec2::new(x, y),
            rx,
            ry,
            angle: 0.0,
        })
    }

    /// A circle of the given radius.
    pub fn circle(x: f64, y: f64, radius: f64) -> Result<Self> {
        Ellipse::new(x, y, radius, radius)
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.rx, self.ry)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_radii(&mut self, rx: f64, ry: f64) -> Result<()> {
        check_dimension("rx", rx)?;
        check_dimension("ry", ry)?;
        self.rx = rx;
        self.ry = ry;
        Ok(())
    }

    pub fn rotate(&mut self, angle: f64) {
        self.angle += angle;
    }

    /// Half extents of the axis-aligned box around the (possibly rotated) ellipse.
    fn half_extents(&self) -> Vec2 {
        let (sin_a, cos_a) = self.angle.sin_cos();
        Vec2::new(
            ((self.rx * cos_a).powi(2) + (self.ry * sin_a).powi(2)).sqrt(),
            ((self.rx * sin_a).powi(2) + (self.ry * cos_a).powi(2)).sqrt(),
        )
    }

    /// The four corners of the ellipse's bounding box, including `pos`.
    pub fn corner_points(&self) -> [Vec2; 4] {
        let h = self.half_extents();
        [
            self.pos + Vec2::new(-h.x, -h.y),
            self.pos + Vec2::new(h.x, -h.y),
            self.pos + Vec2::new(h.x, h.y),
            self.pos + Vec2::new(-h.x, h.y),
        ]
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let local = (Vec2::new(x, y) - self.pos).rotate(-self.angle);
        (local.x / self.rx).powi(2) + (local.y / self.ry).powi(2) <= 1.0
    }

    pub fn bounds(&self) -> Aabb {
        let h = self.half_extents();
        Aabb::new(self.pos - h, self.pos + h)
    }

    /// Exact support-based projection of the ellipse onto a unit `axis`.
    pub fn project(&self, offset: Vec2, axis: Vec2) -> (f64, f64) {
        let center = (offset + self.pos).dot(axis);
        let major = Vec2::X.rotate(self.angle);
        let minor = Vec2::Y.rotate(self.angle);
        let extent = ((self.rx * axis.dot(major)).powi(2) + (self.ry * axis.dot(minor)).powi(2)).sqrt();
        (center - extent, center + extent)
    }

    pub fn center(&self) -> Vec2 {
        self.pos
    }
}
