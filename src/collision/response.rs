use crate::math::vec2::Vec2;
use crate::objects::BodyHandle;

/// Result of one intersection test.
///
/// A single instance is meant to be reused across many tests: the narrow phase clears it
/// before each shape pair, so its contents are only valid until the next test. It is
/// `Copy`, so keeping a result around is a plain assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    /// First body of the test, if the test was run between bodies.
    pub a: Option<BodyHandle>,
    /// Second body of the test.
    pub b: Option<BodyHandle>,
    /// Magnitude of the overlap on the shortest colliding axis.
    /// `f64::MAX` while no result has been written.
    pub overlap: f64,
    /// The shortest colliding axis (unit vector), pointing from `a` toward `b`.
    pub overlap_n: Vec2,
    /// `overlap_n * overlap`. Subtracting it from `a`'s position separates the shapes.
    pub overlap_v: Vec2,
    /// Whether `a` is entirely inside `b`.
    pub a_in_b: bool,
    /// Whether `b` is entirely inside `a`.
    pub b_in_a: bool,
    /// Index of the colliding shape in `a`'s shape list.
    pub index_shape_a: Option<usize>,
    /// Index of the colliding shape in `b`'s shape list.
    pub index_shape_b: Option<usize>,
}

impl Response {
    pub const NO_OVERLAP: f64 = f64::MAX;

    pub fn new() -> Self {
        Response {
            a: None,
            b: None,
            overlap: Self::NO_OVERLAP,
            overlap_n: Vec2::ZERO,
            overlap_v: Vec2::ZERO,
            a_in_b: true,
            b_in_a: true,
            index_shape_a: None,
            index_shape_b: None,
        }
    }

    /// Resets the response so it can be reused for another test.
    ///
    /// Containment flags start optimistic and are narrowed by the test.
    pub fn clear(&mut self) -> &mut Self {
        self.a = None;
        self.b = None;
        self.overlap = Self::NO_OVERLAP;
        self.a_in_b = true;
        self.b_in_a = true;
        self.index_shape_a = None;
        self.index_shape_b = None;
        self
    }

    /// The same result seen from `b`'s side: bodies, shape indices and containment swapped,
    /// axis and separation vector negated.
    pub fn reversed(&self) -> Response {
        Response {
            a: self.b,
            b: self.a,
            overlap: self.overlap,
            overlap_n: -self.overlap_n,
            overlap_v: -self.overlap_v,
            a_in_b: self.b_in_a,
            b_in_a: self.a_in_b,
            index_shape_a: self.index_shape_b,
            index_shape_b: self.index_shape_a,
        }
    }

    /// True while no test has written a result.
    pub fn is_empty(&self) -> bool {
        self.overlap == Self::NO_OVERLAP
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
