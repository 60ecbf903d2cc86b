//! Input translation
//!
//! Raw pointer/touch/motion samples (already in canvas pixels) become a small
//! set of playground events. Gesture state lives in `TouchTracker`; nothing
//! here touches the DOM, so the wasm glue stays thin.

use glam::Vec2;

use crate::consts::{PINCH_THRESHOLD, SHAKE_THRESHOLD};

/// A high-level input the playground reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Click or single-finger touch: kick a donut, or spawn one on empty space
    Tap { pos: Vec2 },
    /// Single finger sliding across the canvas
    Drag { pos: Vec2, delta: Vec2 },
    /// Two fingers pinching in or out: scatter from their midpoint
    Pinch { center: Vec2 },
    /// Device shake (acceleration in m/s², screen axes)
    Shake { accel: Vec2 },
    /// Scatter everything from a point (keyboard/UI)
    Scatter { center: Vec2 },
}

/// Tracks the current touch gesture
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    /// Last single-finger position
    last: Option<Vec2>,
    /// Finger separation when the two-finger gesture began
    pinch_start: Option<f32>,
    /// Each two-finger gesture scatters at most once
    pinch_fired: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Touch started; `touches` holds every finger currently down
    pub fn touch_start(&mut self, touches: &[Vec2]) -> Option<InputEvent> {
        match touches {
            [] => {
                self.clear();
                None
            }
            [pos] => {
                self.last = Some(*pos);
                self.pinch_start = None;
                Some(InputEvent::Tap { pos: *pos })
            }
            [a, b, ..] => {
                self.last = None;
                self.pinch_start = Some(a.distance(*b));
                self.pinch_fired = false;
                None
            }
        }
    }

    /// Fingers moved
    pub fn touch_move(&mut self, touches: &[Vec2]) -> Option<InputEvent> {
        match touches {
            [pos] => {
                let prev = self.last.replace(*pos)?;
                let delta = *pos - prev;
                (delta != Vec2::ZERO).then_some(InputEvent::Drag { pos: *pos, delta })
            }
            [a, b, ..] => {
                let start = self.pinch_start?;
                if self.pinch_fired || start <= f32::EPSILON {
                    return None;
                }
                let ratio = a.distance(*b) / start;
                if (ratio - 1.0).abs() > PINCH_THRESHOLD {
                    self.pinch_fired = true;
                    Some(InputEvent::Pinch {
                        center: (*a + *b) * 0.5,
                    })
                } else {
                    None
                }
            }
            [] => None,
        }
    }

    /// A finger lifted; `remaining` holds the fingers still down
    pub fn touch_end(&mut self, remaining: &[Vec2]) {
        match remaining {
            [pos] => {
                self.last = Some(*pos);
                self.pinch_start = None;
            }
            [] => self.clear(),
            _ => {}
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Turn a device-motion sample into a shake, if it is strong enough
pub fn shake_from_motion(accel: Vec2) -> Option<InputEvent> {
    (accel.is_finite() && accel.length() > SHAKE_THRESHOLD).then_some(InputEvent::Shake { accel })
}

/// Convert a client-space point to canvas pixels
#[inline]
pub fn client_to_canvas(client: Vec2, rect_origin: Vec2, rect_size: Vec2, canvas_size: Vec2) -> Vec2 {
    let local = client - rect_origin;
    if rect_size.x > 0.0 && rect_size.y > 0.0 {
        local / rect_size * canvas_size
    } else {
        local
    }
}
