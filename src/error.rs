//! Error types for shape construction and body mutation.

use thiserror::Error;

/// Configuration errors raised while building geometry.
///
/// These are programmer mistakes (bad geometry), surfaced immediately so malformed shapes
/// never reach the spatial index.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// A line segment was given something other than two points.
    #[error("a line requires exactly 2 points, got {0}")]
    InvalidLinePoints(usize),

    /// A polygon was given fewer than three points.
    #[error("a polygon requires at least 3 points, got {0}")]
    TooFewPoints(usize),

    /// All polygon points are colinear or coincident.
    #[error("polygon has zero area")]
    DegeneratePolygon,

    /// The polygon winding changes direction somewhere.
    #[error("polygon is not convex")]
    NonConvexPolygon,

    /// A width, height or radius is not a positive finite number.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    /// A coordinate is NaN or infinite.
    #[error("shape coordinates must be finite")]
    NonFiniteCoordinate,

    /// A body shape index is out of range.
    #[error("shape index {index} out of range for a body with {len} shapes")]
    ShapeIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CollisionError>;
