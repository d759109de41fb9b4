//! 2D collision core: quadtree broad phase, SAT narrow phase and the body state both
//! operate on.
//!
//! ```rust
//! use collision_engine::{Body, CollisionWorld, Shape, Vec2};
//!
//! let mut world = CollisionWorld::default();
//! let a = world.add_body(Body::new(Vec2::new(0.0, 0.0), Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap()));
//! let b = world.add_body(Body::new(Vec2::new(5.0, 0.0), Shape::rectangle(0.0, 0.0, 10.0, 10.0).unwrap()));
//!
//! let contacts = world.detect();
//! assert_eq!(contacts.len(), 1);
//! assert_eq!(contacts[0].response.overlap, 5.0);
//! # let _ = (a, b);
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Aabb, CollisionType, QuadTree, Response};
pub use config::{ConfigError, QuadTreeConfig, WorldConfig};
pub use error::CollisionError;
pub use math::vec2::Vec2;
pub use objects::{Body, BodyHandle};
pub use shapes::{Ellipse, Line, Polygon, Rectangle, Shape};
pub use world::{CollisionWorld, Contact};
