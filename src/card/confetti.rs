//! Confetti burst shown when a reward is revealed
//!
//! Purely cosmetic. Pieces start above the viewport, wait a short random
//! delay, then fall linearly while spinning. Everything is driven by the
//! caller's RNG so a seeded surface produces the same burst every time.

use glam::Vec2;
use rand::Rng;

use crate::color::{Color, palette};
use crate::consts::CONFETTI_FADE_Y;
use crate::lerp;

/// A single falling rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub x: f32,
    pub start_y: f32,
    pub end_y: f32,
    /// Degrees
    pub start_rotation: f32,
    pub end_rotation: f32,
    pub size: Vec2,
    /// Packed `0xRRGGBBAA`
    pub color: u32,
    /// Seconds before the piece starts falling
    pub delay: f32,
    /// Seconds spent falling
    pub duration: f32,
}

impl ConfettiPiece {
    /// Fall progress in `[0, 1]` at time `t` since the burst
    pub fn fall_t(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((t - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    pub fn position(&self, t: f32) -> Vec2 {
        Vec2::new(self.x, lerp(self.start_y, self.end_y, self.fall_t(t)))
    }

    pub fn rotation(&self, t: f32) -> f32 {
        lerp(self.start_rotation, self.end_rotation, self.fall_t(t))
    }

    /// Pieces vanish once they drop past the fade line
    pub fn opacity(&self, t: f32) -> f32 {
        if self.position(t).y > CONFETTI_FADE_Y { 0.0 } else { 1.0 }
    }

    pub fn finished(&self, t: f32) -> bool {
        t >= self.delay + self.duration
    }
}

/// Live confetti of one surface
#[derive(Debug, Clone, Default)]
pub struct Confetti {
    pieces: Vec<ConfettiPiece>,
    /// Seconds since the current burst started
    time: f32,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any live pieces with a fresh burst of `count` pieces spread
    /// across `viewport_width`
    pub fn burst<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize, viewport_width: f32) {
        let width = viewport_width.max(1.0);
        self.time = 0.0;
        self.pieces.clear();
        self.pieces.reserve(count);

        for i in 0..count {
            let color = Color::from_hex(palette::CONFETTI[i % palette::CONFETTI.len()]);
            let size = rng.random_range(5.0..15.0_f32);
            let start_rotation = rng.random_range(0.0..360.0_f32);
            self.pieces.push(ConfettiPiece {
                x: rng.random_range(0.0..width),
                start_y: -100.0 - rng.random_range(0.0..300.0_f32),
                end_y: 700.0 + rng.random_range(0.0..300.0_f32),
                start_rotation,
                end_rotation: start_rotation + rng.random_range(180.0..360.0_f32),
                size: Vec2::new(size, size * 0.2),
                color: color.to_rgba_u32(),
                delay: rng.random_range(0.0..0.5_f32),
                duration: rng.random_range(2.0..4.0_f32),
            });
        }

        log::debug!("Confetti burst: {} pieces", count);
    }

    /// Advance the animation and drop pieces that finished falling
    pub fn step(&mut self, dt: f32) {
        if self.pieces.is_empty() {
            return;
        }
        self.time += dt.max(0.0);
        let t = self.time;
        self.pieces.retain(|p| !p.finished(t));
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
        self.time = 0.0;
    }

    pub fn is_active(&self) -> bool {
        !self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}
