//! Scratch surface
//!
//! Owns one card's state together with everything that reacts to it: the
//! mask raster, the confetti, the RNG used for rewards, and queues of events
//! and haptic requests for the presentation layer to drain each frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::config::ScratchConfig;
use super::confetti::Confetti;
use super::mask::ScratchMask;
use super::state::{self, CardEvent, CardPhase, SamplePoint, ScratchState};
use crate::consts::{CONFETTI_PIECES, HINT_THRESHOLD};
use crate::haptics::HapticStyle;

pub struct ScratchSurface {
    config: ScratchConfig,
    state: ScratchState,
    mask: ScratchMask,
    confetti: Confetti,
    rng: Pcg32,
    /// Most confetti pieces a burst may spawn (0 disables confetti)
    confetti_limit: usize,
    /// Width the confetti spreads across
    viewport_width: f32,
    events: Vec<CardEvent>,
    haptics: Vec<HapticStyle>,
}

impl ScratchSurface {
    pub fn new(config: ScratchConfig, seed: u64) -> Self {
        let mask = ScratchMask::new(config.width.ceil() as u32, config.height.ceil() as u32);
        let viewport_width = config.width;
        Self {
            config,
            state: ScratchState::default(),
            mask,
            confetti: Confetti::new(),
            rng: Pcg32::seed_from_u64(seed),
            confetti_limit: CONFETTI_PIECES,
            viewport_width,
            events: Vec::new(),
            haptics: Vec::new(),
        }
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    pub fn state(&self) -> &ScratchState {
        &self.state
    }

    pub fn flipped(&self) -> bool {
        self.state.flipped()
    }

    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    pub fn revealed(&self) -> bool {
        self.state.revealed()
    }

    pub fn reward(&self) -> Option<&str> {
        self.state.reward()
    }

    pub fn phase(&self) -> CardPhase {
        self.state.phase()
    }

    pub fn mask(&self) -> &ScratchMask {
        &self.mask
    }

    /// Mutable mask access for the renderer's dirty tracking
    pub fn mask_mut(&mut self) -> &mut ScratchMask {
        &mut self.mask
    }

    pub fn confetti(&self) -> &Confetti {
        &self.confetti
    }

    /// Whether the "scratch here" hint should still be shown
    pub fn show_hint(&self) -> bool {
        self.state.flipped() && self.state.progress() < HINT_THRESHOLD
    }

    /// Whether the reset affordance should be shown
    pub fn show_reset(&self) -> bool {
        self.state.progress() > self.config.reveal_threshold
    }

    /// Whether the win message should be shown; only on the scratch side
    pub fn show_win(&self) -> bool {
        self.state.flipped() && self.state.revealed()
    }

    pub fn set_confetti_limit(&mut self, limit: usize) {
        self.confetti_limit = limit;
        if limit == 0 {
            self.confetti.clear();
        }
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Tap on the card
    pub fn on_flip(&mut self) {
        let current = std::mem::take(&mut self.state);
        let (next, event) = state::flip(current, &self.config, &mut self.rng);
        self.state = next;

        match &event {
            Some(CardEvent::Flipped { reward }) => {
                log::info!("Card flipped ({})", reward);
                self.request_haptic(HapticStyle::Medium);
            }
            Some(CardEvent::Unflipped) => log::info!("Card turned back"),
            _ => {}
        }
        self.events.extend(event);
    }

    /// One pointer-move sample in surface-local coordinates
    pub fn on_drag_sample(&mut self, point: SamplePoint) {
        if !self.state.flipped() {
            return;
        }

        let current = std::mem::take(&mut self.state);
        let (next, event) = state::apply_sample(current, point, &self.config);
        self.state = next;

        if let Some(&last) = self.state.points().last() {
            self.mask.punch(last, self.config.radius);
        }
        self.request_haptic(HapticStyle::Heavy);
        log::debug!(
            "Sample {} at ({:.1}, {:.1}) -> progress {:.3}",
            self.state.points().len(),
            point.x,
            point.y,
            self.state.progress()
        );

        if let Some(CardEvent::Revealed { reward }) = &event {
            log::info!(
                "Reward revealed after {} samples: {}",
                self.state.points().len(),
                reward
            );
            self.request_haptic(HapticStyle::Heavy);
            if self.config.confetti && self.confetti_limit > 0 {
                let count = CONFETTI_PIECES.min(self.confetti_limit);
                self.confetti.burst(&mut self.rng, count, self.viewport_width);
            }
        }
        self.events.extend(event);
    }

    /// Back to the front side with a fresh mask
    pub fn reset(&mut self) {
        let current = std::mem::take(&mut self.state);
        let (next, event) = state::reset(current);
        self.state = next;

        if event.is_some() {
            log::info!("Card reset");
            self.mask.clear();
            self.confetti.clear();
            self.request_haptic(HapticStyle::Medium);
        }
        self.events.extend(event);
    }

    /// Advance cosmetic animation
    pub fn step(&mut self, dt: f32) {
        self.confetti.step(dt);
    }

    /// Events produced since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<CardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Haptic requests produced since the last drain
    pub fn drain_haptics(&mut self) -> Vec<HapticStyle> {
        std::mem::take(&mut self.haptics)
    }

    fn request_haptic(&mut self, style: HapticStyle) {
        if self.config.haptics {
            self.haptics.push(style);
        }
    }
}
