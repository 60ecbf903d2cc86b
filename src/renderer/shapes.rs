//! Donut geometry
//!
//! Pure helpers shared by the canvas renderer. All coordinates are in donut
//! space: origin at the donut center, before the squash scale is applied.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::sim::{Donut, Sprinkle};
use crate::theme::{Color, Palette};

/// Donuts are drawn slightly wider than tall
pub const BODY_STRETCH_X: f32 = 1.05;
/// Hole radius as a fraction of the donut radius
pub const HOLE_RATIO: f32 = 0.45;
/// Points in the drizzle zigzag
pub const DRIZZLE_POINTS: usize = 6;

/// Scale applied around the donut center
#[inline]
pub fn body_scale(donut: &Donut) -> Vec2 {
    Vec2::new(BODY_STRETCH_X, donut.squash)
}

/// Radial gradient for the dough: (inner center, inner radius, outer radius)
pub fn dough_gradient(radius: f32) -> (Vec2, f32, f32) {
    (Vec2::splat(-radius * 0.3), radius * 0.2, radius)
}

/// Gradient color stops, highlight to crust
pub fn dough_stops(palette: &Palette, base: Color) -> [(f32, Color); 3] {
    [(0.0, palette.highlight), (0.4, base), (1.0, palette.crust)]
}

/// Zigzag drizzle across the donut
pub fn drizzle_points(radius: f32) -> [Vec2; DRIZZLE_POINTS] {
    std::array::from_fn(|i| {
        let angle = i as f32 / DRIZZLE_POINTS as f32 * TAU;
        Vec2::new(angle.cos() * radius * 0.8, (angle * 2.0).sin() * radius * 0.25)
    })
}

/// Sprinkle stroke endpoints after its rotation
pub fn sprinkle_segment(sprinkle: &Sprinkle) -> (Vec2, Vec2) {
    let rot = Vec2::from_angle(sprinkle.angle);
    let start = rot.rotate(sprinkle.offset);
    let end = rot.rotate(sprinkle.offset + Vec2::new(sprinkle.length, 0.0));
    (start, end)
}
