pub mod aabb;
pub mod quadtree;
pub mod response;
pub mod sat;
pub mod types;

// Re-export key types
pub use aabb::Aabb;
pub use quadtree::QuadTree;
pub use response::Response;
pub use sat::{collides, test_bodies, test_shapes};
pub use types::CollisionType;
