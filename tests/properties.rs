//! Property tests for the donut pool and per-tick physics

use donut_playground::consts::*;
use donut_playground::sim::{DonutPool, PhysicsParams, ease_squash, step};
use donut_playground::theme::CAFE;
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const EPS: f32 = 1e-3;

proptest! {
    #[test]
    fn pool_never_exceeds_capacity(capacity in 1usize..12, spawns in 0usize..40, seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Vec2::new(1024.0, 768.0);
        let mut pool = DonutPool::new(capacity, SPAWN_MARGIN);

        for _ in 0..spawns {
            let before: Vec<_> = pool.iter().map(|d| d.id).collect();
            let id = pool.spawn(None, None, bounds, &CAFE, &mut rng);
            let after: Vec<_> = pool.iter().map(|d| d.id).collect();

            prop_assert!(pool.len() <= capacity);
            prop_assert_eq!(*after.last().unwrap(), id);
            if before.len() == capacity {
                // Exactly the oldest went away
                prop_assert_eq!(after.len(), capacity);
                prop_assert_eq!(&after[..capacity - 1], &before[1..]);
            } else {
                prop_assert_eq!(after.len(), before.len() + 1);
            }
        }
    }

    #[test]
    fn donuts_stay_inside_bounds(
        width in 120.0f32..2000.0,
        height in 120.0f32..2000.0,
        fx in 0.0f32..1.0,
        fy in 0.0f32..1.0,
        vx in -40.0f32..40.0,
        vy in -40.0f32..40.0,
        gravity in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Vec2::new(width, height);
        let params = PhysicsParams::new(width, height, gravity);
        let mut pool = DonutPool::new(4, SPAWN_MARGIN);
        let start = Vec2::new(fx * width, fy * height);
        pool.spawn(Some(start), Some(Vec2::new(vx, vy)), bounds, &CAFE, &mut rng);

        for tick in 0..300 {
            pool.step_all(&params, tick as f64 * 16.0);
            for d in pool.iter() {
                prop_assert!(d.pos.x >= d.radius - EPS && d.pos.x <= width - d.radius + EPS);
                prop_assert!(d.pos.y >= d.radius - EPS && d.pos.y <= height - d.radius + EPS);
            }
        }
    }

    #[test]
    fn bounces_never_add_speed(
        speed in 0.1f32..40.0,
        tangential in -20.0f32..20.0,
        gravity in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Vec2::new(1000.0, 1000.0);
        let params = PhysicsParams::new(bounds.x, bounds.y, gravity);
        let g = if gravity { params.gravity } else { 0.0 };
        let mut pool = DonutPool::new(4, SPAWN_MARGIN);

        // Into the left wall
        let wall = pool.spawn(Some(Vec2::new(0.0, 500.0)), Some(Vec2::new(-speed, 0.0)), bounds, &CAFE, &mut rng);
        // Into the floor
        let floor = pool.spawn(Some(Vec2::new(500.0, 1000.0)), Some(Vec2::new(tangential, speed)), bounds, &CAFE, &mut rng);

        pool.step_all(&params, 0.0);

        let w = pool.get(wall).unwrap();
        prop_assert!(w.vel.x > 0.0);
        prop_assert!(w.vel.x.abs() <= speed);

        let f = pool.get(floor).unwrap();
        prop_assert!(f.vel.y <= 0.0);
        prop_assert!(f.vel.y.abs() <= speed + g);
        prop_assert!(f.vel.x.abs() <= tangential.abs());
    }

    #[test]
    fn squash_settles_to_exactly_one(squash in 0.3f32..1.7, seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Vec2::new(1000.0, 1000.0);
        let mut pool = DonutPool::new(1, SPAWN_MARGIN);
        let id = pool.spawn(Some(Vec2::splat(500.0)), Some(Vec2::ZERO), bounds, &CAFE, &mut rng);
        let donut = pool.get_mut(id).unwrap();
        donut.squash = squash;

        // 0.7 * 0.8^n < 0.01 well before 40 ticks
        for _ in 0..40 {
            ease_squash(donut);
        }
        prop_assert_eq!(donut.squash, 1.0);
        prop_assert_eq!(donut.target_squash, 1.0);

        let params = PhysicsParams::new(bounds.x, bounds.y, false);
        step(donut, &params, 0.0);
        prop_assert_eq!(donut.squash, 1.0);
    }

    #[test]
    fn newest_donut_wins_hit_test(
        x in 100.0f32..900.0,
        y in 100.0f32..700.0,
        dx in -18.0f32..18.0,
        dy in -18.0f32..18.0,
        seed in any::<u64>(),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Vec2::new(1000.0, 800.0);
        let mut pool = DonutPool::new(MAX_DONUTS, SPAWN_MARGIN);
        let p = Vec2::new(x, y);

        let a = pool.spawn(Some(p), None, bounds, &CAFE, &mut rng);
        let b = pool.spawn(Some(p + Vec2::new(dx, dy)), None, bounds, &CAFE, &mut rng);

        // Both radii are at least DONUT_MIN_RADIUS > |(dx, dy)|, so both contain p
        prop_assert!(pool.get(a).unwrap().contains(p));
        prop_assert!(pool.get(b).unwrap().contains(p));
        prop_assert_eq!(pool.find_at(p), Some(b));
    }
}
