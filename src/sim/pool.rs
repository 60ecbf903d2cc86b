//! Bounded donut pool
//!
//! Donuts live in insertion order. Spawning at capacity evicts the oldest
//! first, so the pool size never exceeds its capacity. Hit tests walk newest
//! first, matching draw order (the newest donut is drawn on top).

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::decoration::generate_decoration;
use super::donut::{Donut, DonutId};
use super::physics::{PhysicsParams, apply_impulse, step};
use crate::theme::Palette;

#[derive(Debug, Clone)]
pub struct DonutPool {
    donuts: VecDeque<Donut>,
    capacity: usize,
    /// Random spawns keep this distance from every edge
    margin: f32,
    next_id: DonutId,
}

impl DonutPool {
    pub fn new(capacity: usize, margin: f32) -> Self {
        let capacity = capacity.max(1);
        Self {
            donuts: VecDeque::with_capacity(capacity),
            capacity,
            margin: margin.max(0.0),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.donuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donuts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add a donut, evicting the oldest one if the pool is full.
    ///
    /// A missing or non-finite `pos` picks a random spot inside the margins;
    /// a finite one is clamped so the donut starts inside `bounds`. A
    /// non-finite `vel` falls back to a random drift.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        pos: Option<Vec2>,
        vel: Option<Vec2>,
        bounds: Vec2,
        palette: &Palette,
        rng: &mut R,
    ) -> DonutId {
        if self.donuts.len() >= self.capacity {
            if let Some(evicted) = self.donuts.pop_front() {
                log::debug!("Pool full, evicted donut {}", evicted.id);
            }
        }

        let requested = pos.filter(|p| p.is_finite());
        if pos.is_some() && requested.is_none() {
            log::warn!("Ignoring non-finite spawn position {:?}", pos);
        }
        let vel = vel.filter(|v| v.is_finite());

        let id = self.next_id;
        self.next_id += 1;

        let start = requested.unwrap_or_else(|| self.random_position(bounds, rng));
        let mut donut = Donut::new(id, start, vel, palette, rng);
        if requested.is_some() {
            donut.pos = clamp_inside(donut.pos, donut.radius, bounds);
        }

        self.donuts.push_back(donut);
        id
    }

    /// Remove every donut, then spawn `count` fresh ones at random positions
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        bounds: Vec2,
        palette: &Palette,
        rng: &mut R,
    ) {
        self.donuts.clear();
        for _ in 0..count {
            self.spawn(None, None, bounds, palette, rng);
        }
        log::info!("Pool reset with {} donuts", self.donuts.len());
    }

    /// Topmost (most recently added) donut containing `point`
    pub fn find_at(&self, point: Vec2) -> Option<DonutId> {
        self.donuts.iter().rev().find(|d| d.contains(point)).map(|d| d.id)
    }

    pub fn get(&self, id: DonutId) -> Option<&Donut> {
        self.donuts.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DonutId) -> Option<&mut Donut> {
        self.donuts.iter_mut().find(|d| d.id == id)
    }

    /// Donuts in insertion order (oldest first, i.e. back to front)
    pub fn iter(&self) -> impl Iterator<Item = &Donut> {
        self.donuts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Donut> {
        self.donuts.iter_mut()
    }

    /// Visit every donut in insertion order
    pub fn for_each<F: FnMut(&mut Donut)>(&mut self, f: F) {
        self.donuts.iter_mut().for_each(f);
    }

    /// Advance every donut by one tick
    pub fn step_all(&mut self, params: &PhysicsParams, now_ms: f64) {
        for donut in &mut self.donuts {
            step(donut, params, now_ms);
        }
    }

    /// Kick a single donut. Returns false if it no longer exists.
    pub fn apply_impulse(&mut self, id: DonutId, impulse: Vec2, now_ms: f64) -> bool {
        match self.get_mut(id) {
            Some(donut) => {
                apply_impulse(donut, impulse, now_ms);
                true
            }
            None => false,
        }
    }

    /// Push every donut radially away from `center`
    pub fn scatter(&mut self, center: Vec2, strength: f32, now_ms: f64) {
        for donut in &mut self.donuts {
            let dir = (donut.pos - center).try_normalize().unwrap_or(Vec2::NEG_Y);
            apply_impulse(donut, dir * strength, now_ms);
        }
    }

    /// Apply the same impulse to every donut
    pub fn shake(&mut self, impulse: Vec2, now_ms: f64) {
        for donut in &mut self.donuts {
            apply_impulse(donut, impulse, now_ms);
        }
    }

    /// Regenerate every decoration from a new palette
    pub fn repaint<R: Rng + ?Sized>(&mut self, palette: &Palette, rng: &mut R) {
        for donut in &mut self.donuts {
            donut.decoration = generate_decoration(donut.radius, palette, rng);
        }
    }

    fn random_position<R: Rng + ?Sized>(&self, bounds: Vec2, rng: &mut R) -> Vec2 {
        let mut axis = |extent: f32| {
            if extent.is_finite() && extent > 2.0 * self.margin {
                rng.random_range(self.margin..extent - self.margin)
            } else if extent.is_finite() {
                extent.max(0.0) * 0.5
            } else {
                0.0
            }
        };
        let x = axis(bounds.x);
        let y = axis(bounds.y);
        Vec2::new(x, y)
    }
}

/// Clamp a center so a circle of `radius` fits inside `bounds` where it can
fn clamp_inside(pos: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    let axis = |v: f32, extent: f32| {
        if extent >= 2.0 * radius {
            v.clamp(radius, extent - radius)
        } else {
            extent.max(0.0) * 0.5
        }
    };
    Vec2::new(axis(pos.x, bounds.x), axis(pos.y, bounds.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::CAFE;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(1000.0, 800.0);

    fn ids(pool: &DonutPool) -> Vec<DonutId> {
        pool.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_capacity_two_evicts_oldest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pool = DonutPool::new(2, 80.0);

        let s1 = pool.spawn(None, None, BOUNDS, &CAFE, &mut rng);
        let s2 = pool.spawn(None, None, BOUNDS, &CAFE, &mut rng);
        let s3 = pool.spawn(None, None, BOUNDS, &CAFE, &mut rng);

        assert_eq!(ids(&pool), vec![s2, s3]);
        assert!(pool.get(s1).is_none());
    }

    #[test]
    fn test_random_spawn_respects_margin() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut pool = DonutPool::new(60, 80.0);
        pool.reset(60, BOUNDS, &CAFE, &mut rng);

        assert_eq!(pool.len(), 60);
        for donut in pool.iter() {
            assert!(donut.pos.x >= 80.0 && donut.pos.x <= 920.0);
            assert!(donut.pos.y >= 80.0 && donut.pos.y <= 720.0);
        }
    }

    #[test]
    fn test_reset_replaces_existing_donuts() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut pool = DonutPool::new(10, 80.0);
        pool.reset(8, BOUNDS, &CAFE, &mut rng);
        let old = ids(&pool);
        assert_eq!(old.len(), 8);

        pool.reset(3, BOUNDS, &CAFE, &mut rng);

        assert_eq!(pool.len(), 3);
        for id in old {
            assert!(pool.get(id).is_none());
        }
    }

    #[test]
    fn test_shake_kicks_every_donut_equally() {
        let mut rng = Pcg32::seed_from_u64(10);
        let mut pool = DonutPool::new(10, 80.0);
        pool.reset(4, BOUNDS, &CAFE, &mut rng);
        let before: Vec<_> = pool.iter().map(|d| d.vel).collect();

        pool.shake(Vec2::new(2.0, -1.0), 5.0);

        for (donut, vel) in pool.iter().zip(before) {
            assert!((donut.vel - vel).distance(Vec2::new(2.0, -1.0)) < 1e-5);
            assert!(donut.effect_expires_at.is_some());
        }
    }

    #[test]
    fn test_spawn_at_point_and_velocity_override() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = DonutPool::new(10, 80.0);

        let id = pool.spawn(
            Some(Vec2::new(300.0, 200.0)),
            Some(Vec2::new(1.0, 2.0)),
            BOUNDS,
            &CAFE,
            &mut rng,
        );
        let donut = pool.get(id).unwrap();
        assert_eq!(donut.pos, Vec2::new(300.0, 200.0));
        assert_eq!(donut.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_spawn_sanitizes_bad_input() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut pool = DonutPool::new(10, 80.0);

        let id = pool.spawn(
            Some(Vec2::new(f32::NAN, 10.0)),
            Some(Vec2::new(f32::INFINITY, 0.0)),
            BOUNDS,
            &CAFE,
            &mut rng,
        );
        let donut = pool.get(id).unwrap();
        assert!(donut.pos.is_finite());
        assert!(donut.vel.is_finite());

        // Off-screen point is pulled back inside
        let id = pool.spawn(Some(Vec2::new(-50.0, 5000.0)), None, BOUNDS, &CAFE, &mut rng);
        let donut = pool.get(id).unwrap();
        assert_eq!(donut.pos.x, donut.radius);
        assert_eq!(donut.pos.y, BOUNDS.y - donut.radius);
    }

    #[test]
    fn test_find_at_prefers_newest() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool = DonutPool::new(10, 80.0);
        let p = Vec2::new(400.0, 400.0);

        let a = pool.spawn(Some(p), None, BOUNDS, &CAFE, &mut rng);
        let b = pool.spawn(Some(p + Vec2::new(5.0, 0.0)), None, BOUNDS, &CAFE, &mut rng);
        assert_ne!(a, b);

        assert_eq!(pool.find_at(p), Some(b));
        assert_eq!(pool.find_at(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_scatter_pushes_outward() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut pool = DonutPool::new(10, 80.0);
        let center = Vec2::new(500.0, 400.0);
        let left = pool.spawn(Some(Vec2::new(300.0, 400.0)), Some(Vec2::ZERO), BOUNDS, &CAFE, &mut rng);
        let right = pool.spawn(Some(Vec2::new(700.0, 400.0)), Some(Vec2::ZERO), BOUNDS, &CAFE, &mut rng);
        let middle = pool.spawn(Some(center), Some(Vec2::ZERO), BOUNDS, &CAFE, &mut rng);

        pool.scatter(center, 6.0, 0.0);

        let close = |id, expected: Vec2| pool.get(id).unwrap().vel.distance(expected) < 1e-4;
        assert!(close(left, Vec2::new(-6.0, 0.0)));
        assert!(close(right, Vec2::new(6.0, 0.0)));
        assert!(close(middle, Vec2::new(0.0, -6.0)));
    }

    #[test]
    fn test_repaint_changes_palette_only() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pool = DonutPool::new(10, 80.0);
        pool.reset(5, BOUNDS, &CAFE, &mut rng);
        let before: Vec<_> = pool.iter().map(|d| (d.id, d.pos, d.radius)).collect();

        pool.repaint(&crate::theme::NIGHT, &mut rng);

        let after: Vec<_> = pool.iter().map(|d| (d.id, d.pos, d.radius)).collect();
        assert_eq!(before, after);
        for donut in pool.iter() {
            assert!(crate::theme::NIGHT.donut_colors.contains(&donut.decoration.base_color));
        }
    }

    #[test]
    fn test_for_each_visits_in_insertion_order() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut pool = DonutPool::new(3, 80.0);
        pool.reset(5, BOUNDS, &CAFE, &mut rng);

        let mut seen = Vec::new();
        pool.for_each(|d| seen.push(d.id));
        assert_eq!(seen, ids(&pool));
        assert_eq!(seen.len(), 3);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_impulse_on_missing_donut() {
        let mut pool = DonutPool::new(10, 80.0);
        assert!(!pool.apply_impulse(42, Vec2::X, 0.0));
    }
}
