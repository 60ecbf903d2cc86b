//! Donut toppings
//!
//! A decoration is generated once per donut from the active palette and an
//! explicit RNG, then stays fixed until the palette changes. All offsets are
//! relative to the donut center, in unsquashed donut space.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::theme::{Color, Palette};

/// A single sprinkle stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprinkle {
    /// Start of the stroke before rotation
    pub offset: Vec2,
    pub length: f32,
    /// Rotation applied around the donut center
    pub angle: f32,
    pub color: Color,
}

/// A dot of powdered sugar, cinnamon or gold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speck {
    pub offset: Vec2,
    pub size: f32,
}

/// Everything drawn on top of the dough
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub base_color: Color,
    pub sprinkles: Vec<Sprinkle>,
    pub drizzle: bool,
    pub powdered: Vec<Speck>,
    pub cinnamon: Vec<Speck>,
    pub gold_flakes: Vec<Speck>,
}

impl Decoration {
    /// Total number of topping elements (for stats)
    pub fn topping_count(&self) -> usize {
        self.sprinkles.len()
            + self.powdered.len()
            + self.cinnamon.len()
            + self.gold_flakes.len()
            + usize::from(self.drizzle)
    }
}

const DRIZZLE_CHANCE: f64 = 0.5;
const POWDERED_CHANCE: f64 = 0.4;
const CINNAMON_CHANCE: f64 = 0.3;
const GOLD_CHANCE: f64 = 0.15;

/// Generate a fresh decoration for a donut of `radius`
pub fn generate_decoration<R: Rng + ?Sized>(radius: f32, palette: &Palette, rng: &mut R) -> Decoration {
    let base_color = pick(palette.donut_colors, rng, palette.highlight);

    let sprinkle_count = rng.random_range(8..18usize);
    let sprinkles = (0..sprinkle_count)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let dist = rng.random_range(radius * 0.3..radius * 0.9);
            Sprinkle {
                offset: Vec2::from_angle(angle) * dist,
                length: rng.random_range(4.0..8.0),
                angle: angle + rng.random_range(-0.4..0.4),
                color: pick(palette.sprinkle_colors, rng, palette.highlight),
            }
        })
        .collect();

    let drizzle = rng.random_bool(DRIZZLE_CHANCE);
    let powdered = if rng.random_bool(POWDERED_CHANCE) {
        specks(rng, 20, radius * 0.2, radius * 0.9, 0.8, 1.6)
    } else {
        Vec::new()
    };
    let cinnamon = if rng.random_bool(CINNAMON_CHANCE) {
        specks(rng, 14, radius * 0.3, radius * 0.9, 1.0, 2.0)
    } else {
        Vec::new()
    };
    let gold_flakes = if rng.random_bool(GOLD_CHANCE) {
        specks(rng, 10, radius * 0.3, radius * 0.9, 1.2, 2.4)
    } else {
        Vec::new()
    };

    Decoration {
        base_color,
        sprinkles,
        drizzle,
        powdered,
        cinnamon,
        gold_flakes,
    }
}

fn pick<R: Rng + ?Sized>(colors: &[Color], rng: &mut R, fallback: Color) -> Color {
    colors.choose(rng).copied().unwrap_or(fallback)
}

fn specks<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    min_dist: f32,
    max_dist: f32,
    min_size: f32,
    max_size: f32,
) -> Vec<Speck> {
    (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let dist = rng.random_range(min_dist..max_dist);
            Speck {
                offset: Vec2::from_angle(angle) * dist,
                size: rng.random_range(min_size..max_size),
            }
        })
        .collect()
}
