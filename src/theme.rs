//! Colors, palettes and ambience presets
//!
//! Each ambience pairs a looping background track with a matching palette.
//! Donut decorations read from the active palette when they are generated.

use serde::{Deserialize, Serialize};

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Opaque color from a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string usable as a canvas fill/stroke style
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Color set consumed when donuts are created or repainted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub donut_colors: &'static [Color],
    pub sprinkle_colors: &'static [Color],
    pub drizzle: Color,
    pub powdered: Color,
    pub cinnamon: Color,
    pub gold_flake: Color,
    /// Inner highlight of the dough gradient
    pub highlight: Color,
    /// Outer crust of the dough gradient
    pub crust: Color,
    /// The hole
    pub hole: Color,
}

pub const CAFE: Palette = Palette {
    background: Color::hex(0x1b1412),
    donut_colors: &[
        Color::hex(0xc6a667),
        Color::hex(0x8a6e4a),
        Color::hex(0xf2d3a2),
        Color::hex(0xb48b5a),
        Color::hex(0xe8c58a),
    ],
    sprinkle_colors: &[
        Color::hex(0xf5eee5),
        Color::hex(0xf2d3a2),
        Color::hex(0xc6a667),
        Color::hex(0xe8c58a),
    ],
    drizzle: Color::hex(0xc6a667),
    powdered: Color::rgba(245, 238, 229, 0.8),
    cinnamon: Color::rgba(139, 69, 19, 0.6),
    gold_flake: Color::rgba(255, 215, 0, 0.9),
    highlight: Color::hex(0xf8f0e2),
    crust: Color::hex(0x3b2f2f),
    hole: Color::hex(0x1b1412),
};

pub const NIGHT: Palette = Palette {
    background: Color::hex(0x0d1020),
    donut_colors: &[
        Color::hex(0x6d5a8e),
        Color::hex(0x4a4e7a),
        Color::hex(0x9b8cc4),
        Color::hex(0x5c6f9e),
        Color::hex(0xb7a6d8),
    ],
    sprinkle_colors: &[
        Color::hex(0xe6e9ff),
        Color::hex(0xb7c4ff),
        Color::hex(0x9b8cc4),
        Color::hex(0xffe9a8),
    ],
    drizzle: Color::hex(0xb7a6d8),
    powdered: Color::rgba(230, 233, 255, 0.8),
    cinnamon: Color::rgba(70, 60, 120, 0.6),
    gold_flake: Color::rgba(255, 233, 168, 0.9),
    highlight: Color::hex(0xeef0ff),
    crust: Color::hex(0x1e1a33),
    hole: Color::hex(0x0d1020),
};

pub const SUNRISE: Palette = Palette {
    background: Color::hex(0x2a1610),
    donut_colors: &[
        Color::hex(0xf4a261),
        Color::hex(0xe76f51),
        Color::hex(0xf6c28b),
        Color::hex(0xd8845a),
        Color::hex(0xffd6a5),
    ],
    sprinkle_colors: &[
        Color::hex(0xfff1e6),
        Color::hex(0xffb4a2),
        Color::hex(0xe5989b),
        Color::hex(0xffd6a5),
    ],
    drizzle: Color::hex(0xe76f51),
    powdered: Color::rgba(255, 241, 230, 0.8),
    cinnamon: Color::rgba(160, 70, 30, 0.6),
    gold_flake: Color::rgba(255, 200, 60, 0.9),
    highlight: Color::hex(0xfff4e8),
    crust: Color::hex(0x4a2a1e),
    hole: Color::hex(0x2a1610),
};

/// Background ambience (track + palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ambience {
    #[default]
    Cafe,
    Night,
    Sunrise,
}

impl Ambience {
    pub const ALL: [Ambience; 3] = [Ambience::Cafe, Ambience::Night, Ambience::Sunrise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ambience::Cafe => "cafe",
            Ambience::Night => "night",
            Ambience::Sunrise => "sunrise",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cafe" | "café" => Some(Ambience::Cafe),
            "night" => Some(Ambience::Night),
            "sunrise" => Some(Ambience::Sunrise),
            _ => None,
        }
    }

    /// DOM id of the looping `<audio>` element for this ambience
    pub fn track_id(&self) -> &'static str {
        match self {
            Ambience::Cafe => "ambient-cafe",
            Ambience::Night => "ambient-night",
            Ambience::Sunrise => "ambient-sunrise",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Ambience::Cafe => &CAFE,
            Ambience::Night => &NIGHT,
            Ambience::Sunrise => &SUNRISE,
        }
    }
}
