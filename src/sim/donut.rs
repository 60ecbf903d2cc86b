//! The donut sprite

use glam::Vec2;
use rand::Rng;

use super::decoration::{Decoration, generate_decoration};
use crate::consts::*;
use crate::theme::Palette;

/// Stable handle to a donut in the pool (never reused)
pub type DonutId = u32;

/// A single bouncing donut
#[derive(Debug, Clone)]
pub struct Donut {
    pub id: DonutId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation
    pub radius: f32,
    /// Vertical scale, eases toward `target_squash`
    pub squash: f32,
    pub target_squash: f32,
    /// Shadow blur intensity
    pub glow: f32,
    /// Frame time (ms) when impact glow/squash reverts to rest
    pub effect_expires_at: Option<f64>,
    pub decoration: Decoration,
}

impl Donut {
    /// Create a donut at `pos` with a random radius and decoration.
    ///
    /// Uses `vel` when given, otherwise a gentle random drift.
    pub fn new<R: Rng + ?Sized>(
        id: DonutId,
        pos: Vec2,
        vel: Option<Vec2>,
        palette: &Palette,
        rng: &mut R,
    ) -> Self {
        let radius = rng.random_range(DONUT_MIN_RADIUS..DONUT_MAX_RADIUS);
        let vel = vel.unwrap_or_else(|| random_drift(rng));
        let decoration = generate_decoration(radius, palette, rng);
        Self {
            id,
            pos,
            vel,
            radius,
            squash: 1.0,
            target_squash: 1.0,
            glow: BASE_GLOW,
            effect_expires_at: None,
            decoration,
        }
    }

    /// Circular containment test (ignores squash)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }

    /// True when squash is at rest and no impact effect is pending
    pub fn is_at_rest(&self) -> bool {
        self.squash == 1.0 && self.target_squash == 1.0 && self.effect_expires_at.is_none()
    }
}

pub(crate) fn random_drift<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(-INITIAL_VX..INITIAL_VX),
        rng.random_range(-INITIAL_VY..INITIAL_VY),
    )
}
