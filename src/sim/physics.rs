//! Per-tick donut physics
//!
//! One tick per rendered frame, explicit Euler, no substeps. Each donut only
//! collides with the viewport edges; impulses come from input.

use glam::Vec2;

use super::donut::Donut;
use crate::consts::*;

/// Global physics parameters, rebuilt from settings and viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
    pub gravity_enabled: bool,
    /// Fraction of speed kept (and reversed) on any bounce, in (0, 1)
    pub bounce_restitution: f32,
    /// Fraction of horizontal speed kept on a floor bounce, in (0, 1)
    pub floor_friction: f32,
    /// Viewport size in pixels
    pub bounds: Vec2,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            gravity_enabled: false,
            bounce_restitution: BOUNCE_RESTITUTION,
            floor_friction: FLOOR_FRICTION,
            bounds: Vec2::new(800.0, 600.0),
        }
    }
}

impl PhysicsParams {
    pub fn new(width: f32, height: f32, gravity_enabled: bool) -> Self {
        Self {
            gravity_enabled,
            bounds: sanitize_bounds(width, height),
            ..Default::default()
        }
    }

    /// Refresh viewport bounds (call before the next tick after a resize)
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = sanitize_bounds(width, height);
    }
}

fn sanitize_bounds(width: f32, height: f32) -> Vec2 {
    let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Vec2::new(clean(width), clean(height))
}

/// Advance one donut by one tick.
///
/// `now_ms` is the current frame time, used to expire impact effects.
pub fn step(donut: &mut Donut, params: &PhysicsParams, now_ms: f64) {
    if let Some(expires_at) = donut.effect_expires_at {
        if now_ms >= expires_at {
            donut.glow = BASE_GLOW;
            donut.target_squash = 1.0;
            donut.effect_expires_at = None;
        }
    }

    if params.gravity_enabled {
        donut.vel.y += params.gravity;
    }

    donut.pos += donut.vel;

    let r = donut.radius;
    let Vec2 { x: width, y: height } = params.bounds;
    let restitution = params.bounce_restitution;

    // Walls
    if width < 2.0 * r {
        donut.pos.x = width * 0.5;
        donut.vel.x = 0.0;
    } else if donut.pos.x + r > width {
        donut.pos.x = width - r;
        donut.vel.x = -donut.vel.x.abs() * restitution;
    } else if donut.pos.x - r < 0.0 {
        donut.pos.x = r;
        donut.vel.x = donut.vel.x.abs() * restitution;
    }

    // Floor and ceiling
    if height < 2.0 * r {
        donut.pos.y = height * 0.5;
        donut.vel.y = 0.0;
    } else if donut.pos.y + r > height {
        donut.pos.y = height - r;
        donut.vel.y = -donut.vel.y.abs() * restitution;
        donut.vel.x *= params.floor_friction;
        donut.target_squash = FLOOR_SQUASH;
    } else if donut.pos.y - r < 0.0 {
        donut.pos.y = r;
        donut.vel.y = donut.vel.y.abs() * restitution;
    }

    ease_squash(donut);
}

/// Ease squash toward its target, snapping both to rest near 1
#[inline]
pub fn ease_squash(donut: &mut Donut) {
    donut.squash += (donut.target_squash - donut.squash) * SQUASH_EASING;
    if (donut.squash - 1.0).abs() < SQUASH_EPSILON {
        donut.squash = 1.0;
        donut.target_squash = 1.0;
    }
}

/// Kick a donut: add `impulse` to its velocity and start the impact effect.
///
/// The effect ends `IMPACT_EFFECT_MS` after the most recent impulse.
pub fn apply_impulse(donut: &mut Donut, impulse: Vec2, now_ms: f64) {
    if !impulse.is_finite() {
        log::warn!("Ignoring non-finite impulse on donut {}", donut.id);
        return;
    }
    donut.vel += impulse;
    donut.glow = IMPACT_GLOW;
    donut.target_squash = IMPACT_SQUASH;
    donut.effect_expires_at = Some(now_ms + IMPACT_EFFECT_MS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::CAFE;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn donut_at(x: f32, y: f32, radius: f32, vel: Vec2) -> Donut {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut donut = Donut::new(1, Vec2::new(x, y), Some(vel), &CAFE, &mut rng);
        donut.radius = radius;
        donut
    }

    #[test]
    fn test_left_wall_bounce() {
        let params = PhysicsParams::new(1000.0, 1000.0, false);
        let mut donut = donut_at(5.0, 500.0, 10.0, Vec2::new(-3.0, 0.0));

        step(&mut donut, &params, 0.0);

        assert_eq!(donut.pos.x, 10.0);
        assert!((donut.vel.x - 3.0 * params.bounce_restitution).abs() < 1e-6);
        assert!(donut.vel.x > 0.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let params = PhysicsParams::new(1000.0, 1000.0, false);
        let mut donut = donut_at(995.0, 500.0, 10.0, Vec2::new(3.0, 0.0));

        step(&mut donut, &params, 0.0);

        assert_eq!(donut.pos.x, 990.0);
        assert!((donut.vel.x + 3.0 * params.bounce_restitution).abs() < 1e-6);
    }

    #[test]
    fn test_floor_bounce_applies_friction_and_squash() {
        let params = PhysicsParams {
            bounce_restitution: 0.7,
            floor_friction: 0.8,
            ..PhysicsParams::new(1000.0, 1000.0, false)
        };
        let mut donut = donut_at(500.0, 988.0, 10.0, Vec2::new(2.0, 4.0));

        step(&mut donut, &params, 0.0);

        assert_eq!(donut.pos.y, 990.0);
        assert!((donut.vel.y - -2.8).abs() < 1e-6);
        assert!((donut.vel.x - 1.6).abs() < 1e-6);
        assert_eq!(donut.target_squash, FLOOR_SQUASH);
        // Easing already moved squash toward the new target
        assert!(donut.squash < 1.0);
    }

    #[test]
    fn test_ceiling_bounce_has_no_squash() {
        let params = PhysicsParams::new(1000.0, 1000.0, false);
        let mut donut = donut_at(500.0, 12.0, 10.0, Vec2::new(2.0, -5.0));

        step(&mut donut, &params, 0.0);

        assert_eq!(donut.pos.y, 10.0);
        assert!((donut.vel.y - 5.0 * params.bounce_restitution).abs() < 1e-6);
        assert_eq!(donut.vel.x, 2.0);
        assert_eq!(donut.target_squash, 1.0);
        assert_eq!(donut.squash, 1.0);
    }

    #[test]
    fn test_gravity_only_when_enabled() {
        let mut donut = donut_at(500.0, 500.0, 10.0, Vec2::ZERO);
        step(&mut donut, &PhysicsParams::new(1000.0, 1000.0, false), 0.0);
        assert_eq!(donut.vel.y, 0.0);

        step(&mut donut, &PhysicsParams::new(1000.0, 1000.0, true), 0.0);
        assert_eq!(donut.vel.y, GRAVITY);
        assert_eq!(donut.pos.y, 500.0 + GRAVITY);
    }

    #[test]
    fn test_squash_snaps_to_rest() {
        let params = PhysicsParams::new(1000.0, 1000.0, false);
        let mut donut = donut_at(500.0, 500.0, 10.0, Vec2::ZERO);
        donut.squash = 0.8;

        let mut ticks = 0;
        while donut.squash != 1.0 {
            step(&mut donut, &params, 0.0);
            ticks += 1;
            assert!(ticks < 40, "squash never settled");
        }
        assert_eq!(donut.target_squash, 1.0);
    }

    #[test]
    fn test_impulse_effect_expires() {
        let params = PhysicsParams::new(1000.0, 1000.0, false);
        let mut donut = donut_at(500.0, 500.0, 10.0, Vec2::ZERO);

        apply_impulse(&mut donut, Vec2::new(1.0, -2.0), 1000.0);
        assert_eq!(donut.vel, Vec2::new(1.0, -2.0));
        assert_eq!(donut.glow, IMPACT_GLOW);
        assert_eq!(donut.target_squash, IMPACT_SQUASH);

        step(&mut donut, &params, 1100.0);
        assert_eq!(donut.glow, IMPACT_GLOW);

        step(&mut donut, &params, 1000.0 + IMPACT_EFFECT_MS);
        assert_eq!(donut.glow, BASE_GLOW);
        assert_eq!(donut.target_squash, 1.0);
        assert!(donut.effect_expires_at.is_none());
    }

    #[test]
    fn test_repeated_impulse_extends_effect() {
        let params = PhysicsParams::new(1000.0, 1000.0, false);
        let mut donut = donut_at(500.0, 500.0, 10.0, Vec2::ZERO);

        apply_impulse(&mut donut, Vec2::X, 0.0);
        apply_impulse(&mut donut, Vec2::X, 200.0);

        // The first impulse alone would have expired here
        step(&mut donut, &params, 300.0);
        assert_eq!(donut.glow, IMPACT_GLOW);

        step(&mut donut, &params, 420.0);
        assert_eq!(donut.glow, BASE_GLOW);
    }

    #[test]
    fn test_non_finite_impulse_ignored() {
        let mut donut = donut_at(500.0, 500.0, 10.0, Vec2::ZERO);
        apply_impulse(&mut donut, Vec2::new(f32::NAN, 0.0), 0.0);
        assert_eq!(donut.vel, Vec2::ZERO);
        assert!(donut.effect_expires_at.is_none());
    }

    #[test]
    fn test_tiny_viewport_centers_donut() {
        let params = PhysicsParams::new(15.0, 1000.0, false);
        let mut donut = donut_at(3.0, 500.0, 10.0, Vec2::new(4.0, 0.0));

        step(&mut donut, &params, 0.0);

        assert_eq!(donut.pos.x, 7.5);
        assert_eq!(donut.vel.x, 0.0);
    }

    #[test]
    fn test_bad_viewport_clamps_to_zero() {
        let mut params = PhysicsParams::new(-20.0, f32::NAN, true);
        assert_eq!(params.bounds, Vec2::ZERO);

        params.set_bounds(f32::INFINITY, 600.0);
        assert_eq!(params.bounds, Vec2::new(0.0, 600.0));

        let mut donut = donut_at(40.0, 300.0, 10.0, Vec2::new(3.0, 1.0));
        step(&mut donut, &params, 0.0);
        assert_eq!(donut.pos.x, 0.0);
        assert_eq!(donut.vel.x, 0.0);
        assert!(donut.pos.is_finite() && donut.vel.is_finite());
    }
}
