//! Hex colour strings
//!
//! Accepts `RGB`, `RRGGBB` and `AARRGGBB` forms, with or without a leading
//! `#`. Anything else falls back to opaque white instead of failing.

use serde::{Deserialize, Serialize};

/// Linear RGBA in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse a hex string, falling back to opaque white on malformed input
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Self::WHITE)
    }

    /// Strict parse; `None` for unknown lengths or non-hex digits
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;

        let (a, r, g, b) = match digits.len() {
            // 12-bit RGB, each nibble doubled
            3 => (
                255,
                ((value >> 8) & 0xF) * 17,
                ((value >> 4) & 0xF) * 17,
                (value & 0xF) * 17,
            ),
            6 => (255, (value >> 16) & 0xFF, (value >> 8) & 0xFF, value & 0xFF),
            8 => (
                (value >> 24) & 0xFF,
                (value >> 16) & 0xFF,
                (value >> 8) & 0xFF,
                value & 0xFF,
            ),
            _ => return None,
        };

        Some(Self::from_rgba8(r as u8, g as u8, b as u8, a as u8))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Pack as `0xRRGGBBAA`
    pub fn to_rgba_u32(self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (c(self.r) << 24) | (c(self.g) << 16) | (c(self.b) << 8) | c(self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Palette shared by the card styles and confetti
pub mod palette {
    /// Front gradient of the lucky card
    pub const CORAL: &str = "FF6B6B";
    pub const PEACH: &str = "FF9E80";
    /// Back gradient of the lucky card
    pub const INDIGO: &str = "4568DC";
    pub const ORCHID: &str = "B06AB3";
    pub const YELLOW: &str = "FFCC00";
    pub const GREEN: &str = "34C759";

    /// Confetti colours, cycled by piece index
    pub const CONFETTI: [&str; 6] = [CORAL, INDIGO, ORCHID, PEACH, YELLOW, GREEN];
}
