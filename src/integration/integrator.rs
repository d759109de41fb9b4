use crate::math::vec2::Vec2;
use crate::objects::body::Body;

/// Advances a body's velocity and position by `dt` seconds using semi-implicit Euler.
///
/// `world_gravity` is added to the body's own gravity. Friction then pulls each velocity
/// axis toward zero without crossing it, and each axis is clamped to `max_vel`.
pub fn integrate(body: &mut Body, world_gravity: Vec2, dt: f64) {
    if body.is_static {
        // Static object, do not integrate
        return;
    }

    // v = v + a*dt
    let acceleration = world_gravity + body.gravity + body.force;
    let mut vel = body.vel + acceleration * dt;

    vel.x = apply_friction(vel.x, body.friction.x * dt);
    vel.y = apply_friction(vel.y, body.friction.y * dt);
    vel.x = clamp_speed(vel.x, body.max_vel.x);
    vel.y = clamp_speed(vel.y, body.max_vel.y);
    body.vel = vel;

    // p = p + v*dt, through set_pos so the bounds follow
    body.set_pos(body.pos() + vel * dt);

    // Clear the force accumulator for the next step
    body.force = Vec2::ZERO;
}

/// Moves `speed` toward zero by `amount`, stopping at zero.
fn apply_friction(speed: f64, amount: f64) -> f64 {
    if speed > 0.0 {
        (speed - amount).max(0.0)
    } else {
        (speed + amount).min(0.0)
    }
}

/// Limits `speed` to `[-|limit|, |limit|]`. A NaN limit leaves `speed` unchanged.
fn clamp_speed(speed: f64, limit: f64) -> f64 {
    let limit = limit.abs();
    speed.max(-limit).min(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::aabb::Aabb;
    use crate::shapes::Shape;
    const EPSILON: f64 = 1e-9;

    // Helper to create a default body for tests
    fn test_body() -> Body {
        Body::new(Vec2::ZERO, Shape::rectangle(0.0, 0.0, 2.0, 2.0).unwrap())
    }

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut body = test_body();
        body.vel = Vec2::new(10.0, -5.0);

        integrate(&mut body, Vec2::ZERO, 0.1);

        assert!((body.pos().x - 1.0).abs() < EPSILON);
        assert!((body.pos().y - -0.5).abs() < EPSILON);
        assert_eq!(body.vel, Vec2::new(10.0, -5.0));
        assert_eq!(body.bounds(), Aabb::from_rect(body.pos().x, body.pos().y, 2.0, 2.0));
    }

    #[test]
    fn test_integrate_gravity_and_force() {
        let mut body = test_body();
        body.gravity = Vec2::new(0.0, 1.0);
        body.force = Vec2::new(5.0, 0.0);

        integrate(&mut body, Vec2::new(0.0, 9.0), 0.1);

        // v = (5, 10) * 0.1, p = v * 0.1
        assert!((body.vel.x - 0.5).abs() < EPSILON);
        assert!((body.vel.y - 1.0).abs() < EPSILON);
        assert!((body.pos().x - 0.05).abs() < EPSILON);
        assert!((body.pos().y - 0.1).abs() < EPSILON);
        assert_eq!(body.force, Vec2::ZERO); // Force cleared
    }

    #[test]
    fn test_friction_stops_at_zero() {
        let mut body = test_body();
        body.vel = Vec2::new(1.0, -3.0);
        body.friction = Vec2::new(20.0, 20.0);

        integrate(&mut body, Vec2::ZERO, 0.1);

        // x would overshoot past zero, y just slows down
        assert_eq!(body.vel.x, 0.0);
        assert!((body.vel.y - -1.0).abs() < EPSILON);
    }

    #[test]
    fn test_max_velocity_clamp() {
        let mut body = test_body();
        body.max_vel = Vec2::new(3.0, 4.0);
        body.vel = Vec2::new(100.0, -100.0);

        integrate(&mut body, Vec2::ZERO, 1.0);

        assert_eq!(body.vel, Vec2::new(3.0, -4.0));
        assert_eq!(body.pos(), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_negative_max_velocity_uses_magnitude() {
        let mut body = test_body();
        body.max_vel = Vec2::new(-1.0, -1.0);
        body.vel = Vec2::new(5.0, -5.0);

        integrate(&mut body, Vec2::ZERO, 0.1);

        assert_eq!(body.vel, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_nan_max_velocity_does_not_limit() {
        let mut body = test_body();
        body.max_vel = Vec2::new(f64::NAN, 2.0);
        body.vel = Vec2::new(5.0, 5.0);

        integrate(&mut body, Vec2::ZERO, 0.1);

        assert_eq!(body.vel, Vec2::new(5.0, 2.0));
    }

    #[test]
    fn test_integrate_static_object() {
        let mut body = Body::new_static(Vec2::new(1.0, 1.0), Shape::circle(0.0, 0.0, 1.0).unwrap());
        body.vel = Vec2::new(1.0, 1.0);
        body.force = Vec2::new(10.0, 10.0);

        let initial_state = body.clone();
        integrate(&mut body, Vec2::new(0.0, 9.8), 0.1);

        assert_eq!(body, initial_state);
    }
}
