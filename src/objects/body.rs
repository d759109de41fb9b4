use crate::collision::aabb::Aabb;
use crate::collision::response::Response;
use crate::collision::types::CollisionType;
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// Per-axis speed cap applied by the integrator unless changed.
pub const DEFAULT_MAX_VEL: Vec2 = Vec2::new(490.0, 490.0);

/// A collidable object: an ordered list of shapes placed at a world position, plus the
/// motion state the integrator advances.
///
/// Position and shapes are private so the cached bounding box can never go stale; every
/// mutator recomputes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    // Geometry
    shapes: Vec<Shape>,
    pos: Vec2,
    bounds: Aabb,

    // Motion
    pub vel: Vec2,
    /// Accumulated acceleration for the next step; cleared by the integrator.
    pub force: Vec2,
    /// Gravity applied to this body on top of the world's.
    pub gravity: Vec2,
    /// Deceleration per second applied to each velocity axis.
    pub friction: Vec2,
    /// Per-axis absolute velocity limit.
    pub max_vel: Vec2,
    /// Fraction of the impact velocity kept, mirrored, after a collision.
    pub bounce: f64,

    // Filtering
    pub collision_type: CollisionType,
    pub collision_mask: CollisionType,
    /// Static bodies are never moved by the integrator or by collision response.
    pub is_static: bool,
}

impl Body {
    /// Creates a dynamic body at `pos` with a single shape.
    pub fn new(pos: Vec2, shape: Shape) -> Self {
        let mut body = Body {
            shapes: vec![shape],
            pos,
            bounds: Aabb::point(pos),
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            gravity: Vec2::ZERO,
            friction: Vec2::ZERO,
            max_vel: DEFAULT_MAX_VEL,
            bounce: 0.0,
            collision_type: CollisionType::default(),
            collision_mask: CollisionType::ALL_OBJECT,
            is_static: false,
        };
        body.update_bounds();
        body
    }

    /// Creates a static piece of level geometry.
    pub fn new_static(pos: Vec2, shape: Shape) -> Self {
        let mut body = Body::new(pos, shape);
        body.is_static = true;
        body.collision_type = CollisionType::WORLD_SHAPE;
        body
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.update_bounds();
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.set_pos(self.pos + offset);
    }

    /// World-space box around every shape. A body without shapes is a point at `pos`.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Appends a shape and returns its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.update_bounds();
        self.shapes.len() - 1
    }

    /// Removes the shape at `index`; later shapes shift down by one.
    pub fn remove_shape(&mut self, index: usize) -> Result<Shape> {
        self.check_index(index)?;
        let shape = self.shapes.remove(index);
        self.update_bounds();
        Ok(shape)
    }

    /// Edits a shape in place, then refreshes its cached edges and the body bounds.
    pub fn modify_shape<F, R>(&mut self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&mut Shape) -> R,
    {
        self.check_index(index)?;
        let shape = &mut self.shapes[index];
        let result = f(shape);
        shape.recalc();
        self.update_bounds();
        Ok(result)
    }

    /// Mutual mask test against `other`.
    pub fn should_collide_with(&self, other: &Body) -> bool {
        CollisionType::should_collide(
            self.collision_type,
            self.collision_mask,
            other.collision_type,
            other.collision_mask,
        )
    }

    /// Default reaction when this body is `a` in `response`: step out of the overlap and
    /// drop the velocity component driving into the contact, reflected by `bounce`.
    pub fn respond_to_collision(&mut self, response: &Response) {
        if self.is_static {
            return;
        }
        self.set_pos(self.pos - response.overlap_v);

        let normal = response.overlap_n;
        let approach = self.vel.dot(normal);
        if approach > 0.0 {
            self.vel -= normal * (approach * (1.0 + self.bounce));
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.shapes.len() {
            Ok(())
        } else {
            Err(CollisionError::ShapeIndexOutOfRange {
                index,
                len: self.shapes.len(),
            })
        }
    }

    fn update_bounds(&mut self) {
        let mut shapes = self.shapes.iter().map(Shape::bounds);
        self.bounds = match shapes.next() {
            Some(first) => {
                let mut bounds = first;
                for b in shapes {
                    bounds.merge(&b);
                }
                bounds.translate(self.pos)
            }
            None => Aabb::point(self.pos),
        };
    }
}
