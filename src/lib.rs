//! Scratch Card - flip a card, scratch the mask, win a reward
//!
//! Core modules:
//! - `card`: Deterministic card logic (progress estimate, reveal gating, mask, confetti)
//! - `renderer`: WebGPU rendering pipeline
//! - `screens`: Home screen and navigation between card variants
//! - `settings`: User preferences persisted in LocalStorage
//! - `haptics`: Impact feedback on devices that can vibrate
//! - `input`: Tap/drag discrimination for the pointer stream

pub mod card;
pub mod color;
pub mod haptics;
pub mod input;
pub mod renderer;
pub mod screens;
pub mod settings;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Card configuration constants
pub mod consts {
    /// Progress that must be exceeded before the reward counts as revealed
    pub const REVEAL_THRESHOLD: f32 = 0.5;
    /// The "scratch here" hint stays visible below this progress
    pub const HINT_THRESHOLD: f32 = 0.1;

    /// Classic card: 300x180, small holes, fast multiplier
    pub const CLASSIC_WIDTH: f32 = 300.0;
    pub const CLASSIC_HEIGHT: f32 = 180.0;
    pub const CLASSIC_RADIUS: f32 = 20.0;
    pub const CLASSIC_MULTIPLIER: f32 = 5.0;

    /// Lucky card: 300x200, bigger holes, slower multiplier
    pub const LUCKY_WIDTH: f32 = 300.0;
    pub const LUCKY_HEIGHT: f32 = 200.0;
    pub const LUCKY_RADIUS: f32 = 25.0;
    pub const LUCKY_MULTIPLIER: f32 = 4.0;

    /// Reward used when a catalog has nothing to offer
    pub const FALLBACK_REWARD: &str = "₹100";

    /// Pieces spawned by one confetti burst
    pub const CONFETTI_PIECES: usize = 100;
    /// Confetti fades out once it falls below this y
    pub const CONFETTI_FADE_Y: f32 = 300.0;

    /// Corner radius of the card outline (pixels)
    pub const CARD_CORNER_RADIUS: f32 = 20.0;
    /// Flip animation speed (fraction of a half turn per second)
    pub const FLIP_SPEED: f32 = 3.0;
}

/// Clamp a point into the rectangle `[0, width] x [0, height]`
#[inline]
pub fn clamp_to_bounds(p: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(p.x.clamp(0.0, width.max(0.0)), p.y.clamp(0.0, height.max(0.0)))
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_bounds_inside_untouched() {
        let p = clamp_to_bounds(Vec2::new(10.0, 20.0), 300.0, 180.0);
        assert_eq!(p, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_clamp_to_bounds_outside() {
        let p = clamp_to_bounds(Vec2::new(-5.0, 500.0), 300.0, 180.0);
        assert_eq!(p, Vec2::new(0.0, 180.0));
        let p = clamp_to_bounds(Vec2::new(1000.0, -1.0), 300.0, 180.0);
        assert_eq!(p, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    }
}
