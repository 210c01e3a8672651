//! CPU copy of the scratch mask
//!
//! One byte of alpha per pixel, 255 = fully covered, 0 = scratched away.
//! Each sample stamps a circular hole with a one pixel soft edge. The
//! renderer uploads the bytes as a single-channel texture whenever the mask
//! is dirty.
//!
//! The mask is only drawn. Reveal progress comes from the area estimate in
//! `estimator`, never from these pixels.

use glam::Vec2;

/// Fully covered pixel
pub const OPAQUE: u8 = 255;

/// Per-pixel alpha of the scratch layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
    dirty: bool,
}

impl ScratchMask {
    /// Fully opaque mask of the given size (at least 1x1)
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            alpha: vec![OPAQUE; width as usize * height as usize],
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw alpha bytes, row-major
    pub fn bytes(&self) -> &[u8] {
        &self.alpha
    }

    /// Alpha at a pixel; out-of-range pixels read as opaque
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return OPAQUE;
        }
        self.alpha[self.index(x, y)]
    }

    /// Erase a circle centred on `center`.
    ///
    /// Pixels are sampled at their centres; alpha only ever goes down.
    pub fn punch(&mut self, center: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }

        let min_x = ((center.x - radius - 1.0).floor().max(0.0)) as u32;
        let min_y = ((center.y - radius - 1.0).floor().max(0.0)) as u32;
        let max_x = ((center.x + radius + 1.0).ceil().max(0.0) as u32).min(self.width);
        let max_y = ((center.y + radius + 1.0).ceil().max(0.0) as u32).min(self.height);

        for y in min_y..max_y {
            for x in min_x..max_x {
                let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let dist = pixel.distance(center);
                // Coverage ramps 1 -> 0 across the last pixel of the edge
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let remaining = ((1.0 - coverage) * OPAQUE as f32).round() as u8;
                let idx = self.index(x, y);
                if remaining < self.alpha[idx] {
                    self.alpha[idx] = remaining;
                    self.dirty = true;
                }
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cover everything again
    pub fn clear(&mut self) {
        self.alpha.fill(OPAQUE);
        self.dirty = true;
    }

    /// Fraction of pixels fully scratched away
    pub fn cleared_fraction(&self) -> f32 {
        let cleared = self.alpha.iter().filter(|&&a| a == 0).count();
        cleared as f32 / self.alpha.len() as f32
    }

    /// Returns whether the mask changed since the last call, and clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
