//! Donut Playground - a zen canvas of bouncing donuts
//!
//! Core modules:
//! - `sim`: Donut pool and per-tick physics (pure, seeded, no platform deps)
//! - `input`: Pointer/touch/motion events translated into pool operations
//! - `theme`: Colors, palettes and ambience presets
//! - `settings`: Player toggles (gravity, sound, zen mode)
//! - `renderer`: Donut geometry and the Canvas2D renderer
//! - `audio`: Web Audio sound effects and ambience (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod theme;

pub use settings::Settings;
pub use theme::{Ambience, Color, Palette};

/// Playground configuration constants
pub mod consts {
    /// Maximum live donuts; spawning past this evicts the oldest
    pub const MAX_DONUTS: usize = 60;
    /// Donuts spawned on start and on reset
    pub const INITIAL_DONUTS: usize = 24;
    /// Random spawns stay this far from every viewport edge
    pub const SPAWN_MARGIN: f32 = 80.0;

    /// Donut radius range [min, max)
    pub const DONUT_MIN_RADIUS: f32 = 26.0;
    pub const DONUT_MAX_RADIUS: f32 = 46.0;
    /// Initial drift (pixels/tick)
    pub const INITIAL_VX: f32 = 1.2;
    pub const INITIAL_VY: f32 = 0.6;

    /// Physics defaults (pixels/tick based, one tick per frame)
    pub const GRAVITY: f32 = 0.15;
    pub const BOUNCE_RESTITUTION: f32 = 0.7;
    pub const FLOOR_FRICTION: f32 = 0.8;

    /// Squash easing factor per tick
    pub const SQUASH_EASING: f32 = 0.2;
    /// Squash snaps to rest when within this distance of 1
    pub const SQUASH_EPSILON: f32 = 0.01;
    /// Target squash after a floor bounce
    pub const FLOOR_SQUASH: f32 = 0.8;

    /// Glow at rest and right after an impact
    pub const BASE_GLOW: f32 = 18.0;
    pub const IMPACT_GLOW: f32 = 40.0;
    /// Target squash right after an impact
    pub const IMPACT_SQUASH: f32 = 0.7;
    /// How long impact glow/squash lasts (ms)
    pub const IMPACT_EFFECT_MS: f64 = 220.0;

    /// Tap impulse away from the touch point, plus an upward kick
    pub const TAP_IMPULSE: f32 = 4.0;
    pub const TAP_LIFT: f32 = 2.0;
    /// Drag impulse as a fraction of finger movement
    pub const DRAG_FACTOR: f32 = 0.25;
    /// Outward impulse on scatter
    pub const SCATTER_IMPULSE: f32 = 6.0;
    /// Device shake impulse per m/s² of acceleration
    pub const SHAKE_FACTOR: f32 = 0.3;
    /// Acceleration (m/s²) a device shake must exceed
    pub const SHAKE_THRESHOLD: f32 = 12.0;
    /// Upper bound for any single input-driven impulse
    pub const MAX_IMPULSE: f32 = 8.0;
    /// Relative change in two-finger separation that counts as a pinch
    pub const PINCH_THRESHOLD: f32 = 0.15;
}

