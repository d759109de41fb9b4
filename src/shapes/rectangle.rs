use crate::collision::aabb::Aabb;
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

use super::polygon::Polygon;

/// An axis-aligned rectangle, stored as the four-point polygon `(0,0) (w,0) (w,h) (0,h)`
/// offset by `pos`. Rotating it turns it into an oriented box; `width`/`height` keep the
/// construction size.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
    polygon: Polygon,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        let polygon = Polygon::new(x, y, corner_points(width, height))?;
        Ok(Rectangle { width, height, polygon })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Resets the rectangle to an unrotated `width` x `height` box at its current position.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        self.polygon.set_points(corner_points(width, height))?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn as_polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn pos(&self) -> Vec2 {
        self.polygon.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.polygon.pos = pos;
    }

    pub fn points(&self) -> &[Vec2] {
        self.polygon.points()
    }

    pub fn normals(&self) -> &[Vec2] {
        self.polygon.normals()
    }

    pub fn recalc(&mut self) {
        self.polygon.recalc();
    }

    pub fn rotate(&mut self, angle: f64) {
        self.polygon.rotate(angle);
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.polygon.contains_point(x, y)
    }

    pub fn bounds(&self) -> Aabb {
        self.polygon.bounds()
    }

    pub fn project(&self, offset: Vec2, axis: Vec2) -> (f64, f64) {
        self.polygon.project(offset, axis)
    }

    pub fn center(&self) -> Vec2 {
        self.polygon.center()
    }
}

fn corner_points(width: f64, height: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ]
}

pub(crate) fn check_dimension(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CollisionError::InvalidDimension { name, value })
    }
}
