//! Playground state
//!
//! Owns the donut pool, the seeded RNG and the physics parameters derived
//! from settings. The frame driver calls `tick` once per rendered frame;
//! input handlers call `handle_input`. Anything the audio layer should react
//! to is queued as a `PlaygroundEvent`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::donut::DonutId;
use super::physics::PhysicsParams;
use super::pool::DonutPool;
use crate::consts::*;
use crate::input::InputEvent;
use crate::settings::Settings;
use crate::theme::{Ambience, Palette};

/// Something happened that other layers (audio, HUD) may care about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaygroundEvent {
    Spawned(DonutId),
    Tapped(DonutId),
    Scattered,
    Shaken,
    Reset,
}

#[derive(Debug, Clone)]
pub struct Playground {
    pub pool: DonutPool,
    params: PhysicsParams,
    settings: Settings,
    rng: Pcg32,
    events: Vec<PlaygroundEvent>,
    /// Frames simulated so far
    pub time_ticks: u64,
}

impl Playground {
    /// Create a playground filled with the initial donuts
    pub fn new(seed: u64, width: f32, height: f32, settings: Settings) -> Self {
        let mut playground = Self {
            pool: DonutPool::new(MAX_DONUTS, SPAWN_MARGIN),
            params: settings.physics_params(width, height),
            settings,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            time_ticks: 0,
        };
        playground.reset();
        playground
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn palette(&self) -> &'static Palette {
        self.settings.ambience.palette()
    }

    /// Advance every donut by one tick
    pub fn tick(&mut self, now_ms: f64) {
        self.pool.step_all(&self.params, now_ms);
        self.time_ticks += 1;
    }

    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) {
        match *event {
            InputEvent::Tap { pos } => self.tap(pos, now_ms),
            InputEvent::Drag { pos, delta } => {
                if let Some(id) = self.pool.find_at(pos) {
                    let impulse = (delta * DRAG_FACTOR).clamp_length_max(MAX_IMPULSE);
                    self.pool.apply_impulse(id, impulse, now_ms);
                }
            }
            InputEvent::Pinch { center } | InputEvent::Scatter { center } => {
                self.pool.scatter(center, SCATTER_IMPULSE, now_ms);
                self.events.push(PlaygroundEvent::Scattered);
            }
            InputEvent::Shake { accel } => {
                let impulse = (accel * SHAKE_FACTOR).clamp_length_max(MAX_IMPULSE);
                self.pool.shake(impulse, now_ms);
                self.events.push(PlaygroundEvent::Shaken);
            }
        }
    }

    /// Kick the donut under `pos`, or spawn a new one there
    pub fn tap(&mut self, pos: Vec2, now_ms: f64) {
        match self.pool.find_at(pos) {
            Some(id) => {
                let center = self.pool.get(id).map(|d| d.pos).unwrap_or(pos);
                let away = (center - pos).try_normalize().unwrap_or(Vec2::ZERO);
                let impulse = away * TAP_IMPULSE + Vec2::new(0.0, -TAP_LIFT);
                self.pool.apply_impulse(id, impulse, now_ms);
                self.events.push(PlaygroundEvent::Tapped(id));
            }
            None => {
                let id = self.spawn_at(pos);
                self.events.push(PlaygroundEvent::Spawned(id));
            }
        }
    }

    pub fn spawn_at(&mut self, pos: Vec2) -> DonutId {
        let palette = self.settings.ambience.palette();
        self.pool
            .spawn(Some(pos), None, self.params.bounds, palette, &mut self.rng)
    }

    /// Replace every donut with a fresh initial set
    pub fn reset(&mut self) {
        let palette = self.settings.ambience.palette();
        self.pool
            .reset(INITIAL_DONUTS, self.params.bounds, palette, &mut self.rng);
        self.events.push(PlaygroundEvent::Reset);
    }

    /// Viewport changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.params.set_bounds(width, height);
        log::info!("Viewport resized to {}x{}", self.params.bounds.x, self.params.bounds.y);
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        self.settings.gravity_enabled = enabled;
        self.params.gravity_enabled = enabled;
        log::info!("Gravity {}", if enabled { "on" } else { "off (zen flow)" });
    }

    pub fn set_sound(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
    }

    pub fn set_zen_mode(&mut self, enabled: bool) {
        self.settings.zen_mode = enabled;
    }

    /// Switch ambience; every donut is redecorated with the new palette
    pub fn set_ambience(&mut self, ambience: Ambience) {
        if self.settings.ambience == ambience {
            return;
        }
        self.settings.ambience = ambience;
        self.pool.repaint(ambience.palette(), &mut self.rng);
        log::info!("Ambience set to {}", ambience.as_str());
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaygroundEvent> {
        std::mem::take(&mut self.events)
    }
}
