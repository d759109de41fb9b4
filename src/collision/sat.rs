//! Separating Axis Theorem narrow phase.
//!
//! Axes are tested in a fixed order: the edge normals of `a`, then those of `b`, then,
//! when an ellipse is involved, the axis from the polygon vertex closest to the ellipse
//! center, the center-to-center axis (unit X then unit Y for two concentric ellipses) and
//! finally the principal axes of each ellipse. The first axis with no overlap ends the
//! test.
//!
//! A finite axis set is only exact for polygons. Pairs involving an ellipse are therefore
//! also rejected early when their bounding boxes do not overlap.

use log::trace;

use crate::collision::response::Response;
use crate::math::vec2::Vec2;
use crate::objects::{Body, BodyHandle};
use crate::shapes::Shape;

/// Axes shorter than this (squared) carry no direction and are skipped.
const MIN_AXIS_LENGTH_SQUARED: f64 = 1e-18;

/// Running minimum of one shape test. Copied into the response only after every axis
/// has passed, so a separated pair leaves a cleared response behind.
struct AxisState {
    overlap: f64,
    normal: Vec2,
    a_in_b: bool,
    b_in_a: bool,
}

impl AxisState {
    fn new() -> Self {
        AxisState {
            overlap: Response::NO_OVERLAP,
            normal: Vec2::ZERO,
            a_in_b: true,
            b_in_a: true,
        }
    }
}

/// Tests two shapes placed at `a_offset` and `b_offset`.
///
/// Returns `true` when they overlap by more than zero on every tested axis. On success
/// `response` holds the overlap, its unit axis pointing from `a` toward `b`, the
/// separation vector and the containment flags. `response` is cleared first and stays
/// cleared after a `false` result.
pub fn test_shapes(a_offset: Vec2, a: &Shape, b_offset: Vec2, b: &Shape, response: &mut Response) -> bool {
    response.clear();
    let mut state = AxisState::new();

    for &axis in a.normals().iter().chain(b.normals()) {
        if !test_axis(a_offset, a, b_offset, b, axis, &mut state) {
            return false;
        }
    }

    if a.is_ellipse() || b.is_ellipse() {
        if !a.bounds().translate(a_offset).overlaps(&b.bounds().translate(b_offset)) {
            return false;
        }
        for axis in ellipse_axes(a_offset, a, b_offset, b) {
            if !test_axis(a_offset, a, b_offset, b, axis, &mut state) {
                return false;
            }
        }
    }

    // Nothing was tested, e.g. every edge collapsed to a point.
    if state.overlap == Response::NO_OVERLAP {
        return false;
    }

    response.overlap = state.overlap;
    response.overlap_n = state.normal;
    response.overlap_v = state.normal * state.overlap;
    response.a_in_b = state.a_in_b;
    response.b_in_a = state.b_in_a;
    true
}

/// Projects both shapes on `axis` and folds the result into `state`.
/// Returns `false` if the axis separates them.
fn test_axis(a_offset: Vec2, a: &Shape, b_offset: Vec2, b: &Shape, axis: Vec2, state: &mut AxisState) -> bool {
    if axis.magnitude_squared() < MIN_AXIS_LENGTH_SQUARED {
        return true;
    }

    let (a_min, a_max) = a.project(a_offset, axis);
    let (b_min, b_max) = b.project(b_offset, axis);

    // Touching intervals do not count as overlapping.
    if a_min >= b_max || b_min >= a_max {
        return false;
    }

    let overlap = if a_min < b_min {
        state.a_in_b = false;
        if a_max < b_max {
            state.b_in_a = false;
            a_max - b_min
        } else {
            shorter_exit(a_min, a_max, b_min, b_max)
        }
    } else {
        state.b_in_a = false;
        if a_max > b_max {
            state.a_in_b = false;
            a_min - b_max
        } else {
            shorter_exit(a_min, a_max, b_min, b_max)
        }
    };

    // Strictly smaller, so the first axis wins ties.
    let magnitude = overlap.abs();
    if magnitude < state.overlap {
        state.overlap = magnitude;
        state.normal = if overlap < 0.0 { -axis } else { axis };
    }
    true
}

/// Signed overlap when one interval contains the other: the shorter way out, negative when
/// `a` has to move toward the axis' negative side.
fn shorter_exit(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    let forward = a_max - b_min;
    let backward = b_max - a_min;
    if forward < backward {
        forward
    } else {
        -backward
    }
}

/// Extra axes used when at least one shape is an ellipse. Zero entries are skipped.
fn ellipse_axes(a_offset: Vec2, a: &Shape, b_offset: Vec2, b: &Shape) -> [Vec2; 7] {
    let a_center = a_offset + a.center();
    let b_center = b_offset + b.center();
    let between = b_center - a_center;
    let concentric = between.magnitude_squared() < MIN_AXIS_LENGTH_SQUARED;

    let vertex_axis = match (a.is_ellipse(), b.is_ellipse()) {
        (true, false) => closest_vertex_axis(b_offset, b, a_center),
        (false, true) => closest_vertex_axis(a_offset, a, b_center),
        _ => Vec2::ZERO,
    };
    let (center_axis, fallback_axis) = match (concentric, a.is_ellipse() && b.is_ellipse()) {
        (true, true) => (Vec2::X, Vec2::Y),
        (true, false) => (Vec2::ZERO, Vec2::ZERO),
        (false, _) => (between.normalize(), Vec2::ZERO),
    };
    let [a_major, a_minor] = principal_axes(a);
    let [b_major, b_minor] = principal_axes(b);

    [vertex_axis, center_axis, fallback_axis, a_major, a_minor, b_major, b_minor]
}

/// Rotated X and Y axes of an ellipse; zero for any other shape.
fn principal_axes(shape: &Shape) -> [Vec2; 2] {
    match shape {
        Shape::Ellipse(ellipse) => [Vec2::X.rotate(ellipse.angle()), Vec2::Y.rotate(ellipse.angle())],
        _ => [Vec2::ZERO; 2],
    }
}

/// Unit axis from the vertex of `shape` nearest to `center` toward `center`.
fn closest_vertex_axis(offset: Vec2, shape: &Shape, center: Vec2) -> Vec2 {
    shape
        .world_points(offset)
        .min_by(|p, q| p.distance_squared(center).total_cmp(&q.distance_squared(center)))
        .map(|vertex| center - vertex)
        .filter(|axis| axis.magnitude_squared() >= MIN_AXIS_LENGTH_SQUARED)
        .map_or(Vec2::ZERO, Vec2::normalize)
}

/// Tests every shape of `a` against every shape of `b`, in index order.
///
/// `response` is cleared before each shape pair. For each colliding pair it is filled in
/// with both handles and shape indices and passed to `on_contact`. Returns the number of
/// colliding pairs; a body without shapes never collides.
pub fn test_bodies<F>(
    a_handle: BodyHandle,
    a: &Body,
    b_handle: BodyHandle,
    b: &Body,
    response: &mut Response,
    mut on_contact: F,
) -> usize
where
    F: FnMut(&Response),
{
    let mut hits = 0;
    for (i, shape_a) in a.shapes().iter().enumerate() {
        for (j, shape_b) in b.shapes().iter().enumerate() {
            if test_shapes(a.pos(), shape_a, b.pos(), shape_b, response) {
                response.a = Some(a_handle);
                response.b = Some(b_handle);
                response.index_shape_a = Some(i);
                response.index_shape_b = Some(j);
                trace!(
                    "sat: {:?}[{}] {} hits {:?}[{}] {} overlap {:.4} along {:?}",
                    a_handle,
                    i,
                    shape_a.kind(),
                    b_handle,
                    j,
                    shape_b.kind(),
                    response.overlap,
                    response.overlap_n
                );
                on_contact(response);
                hits += 1;
            }
        }
    }
    hits
}

/// Like [`test_bodies`] but stops at the first colliding shape pair, leaving its result in
/// `response`.
pub fn collides(a_handle: BodyHandle, a: &Body, b_handle: BodyHandle, b: &Body, response: &mut Response) -> bool {
    for (i, shape_a) in a.shapes().iter().enumerate() {
        for (j, shape_b) in b.shapes().iter().enumerate() {
            if test_shapes(a.pos(), shape_a, b.pos(), shape_b, response) {
                response.a = Some(a_handle);
                response.b = Some(b_handle);
                response.index_shape_a = Some(i);
                response.index_shape_b = Some(j);
                return true;
            }
        }
    }
    false
}
