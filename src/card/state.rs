//! Card state and its transitions
//!
//! `ScratchState` is a plain value. Every transition takes the current state
//! by value and hands back the next one, so observers only ever see whole
//! states and the estimator can be tested without a surface.

use glam::Vec2;
use rand::Rng;

use super::config::ScratchConfig;
use super::estimator::estimate_progress;

/// A pointer position in the surface's local coordinates
pub type SamplePoint = Vec2;

/// Coarse position in the card's flip/reveal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Front side showing, waiting for a tap
    Unflipped,
    /// Back side showing, mask not yet scratched past the threshold
    Hidden,
    /// Reward uncovered
    Revealed,
}

/// Notifications produced by transitions
#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    /// Card turned to its scratch side with the reward it hides
    Flipped { reward: String },
    /// Card turned back to its front
    Unflipped,
    /// Progress crossed the threshold for the first time this cycle
    Revealed { reward: String },
    /// State went back to defaults
    Reset,
}

/// Mutable state of one scratch surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScratchState {
    points: Vec<SamplePoint>,
    progress: f32,
    revealed: bool,
    flipped: bool,
    reward: Option<String>,
}

impl ScratchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples recorded since the last reset, oldest first
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Reward sampled at flip time, held until reset
    pub fn reward(&self) -> Option<&str> {
        self.reward.as_deref()
    }

    pub fn phase(&self) -> CardPhase {
        match (self.flipped, self.revealed) {
            (false, _) => CardPhase::Unflipped,
            (true, false) => CardPhase::Hidden,
            (true, true) => CardPhase::Revealed,
        }
    }

    /// True when every field holds its initial value
    pub fn is_default(&self) -> bool {
        self.points.is_empty()
            && self.progress == 0.0
            && !self.revealed
            && !self.flipped
            && self.reward.is_none()
    }
}

/// Tap on the card.
///
/// An unflipped card turns over and draws its reward if it has none yet. A
/// flipped card turns back only when the config allows it.
pub fn flip<R: Rng + ?Sized>(
    mut state: ScratchState,
    config: &ScratchConfig,
    rng: &mut R,
) -> (ScratchState, Option<CardEvent>) {
    if !state.flipped {
        let reward = match state.reward.take() {
            Some(reward) => reward,
            None => config.rewards.choose(rng),
        };
        state.flipped = true;
        state.reward = Some(reward.clone());
        return (state, Some(CardEvent::Flipped { reward }));
    }

    if config.tap_unflips {
        state.flipped = false;
        return (state, Some(CardEvent::Unflipped));
    }

    (state, None)
}

/// One drag-move sample.
///
/// Ignored while the card is unflipped. The point is clamped into bounds,
/// appended, and progress recomputed; the first sample that pushes progress
/// past the threshold reveals the card.
pub fn apply_sample(
    mut state: ScratchState,
    point: SamplePoint,
    config: &ScratchConfig,
) -> (ScratchState, Option<CardEvent>) {
    if !state.flipped {
        return (state, None);
    }

    state.points.push(config.clamp(point));
    // Progress never goes down within a cycle
    state.progress = estimate_progress(state.points.len(), config).max(state.progress);

    if !state.revealed && state.progress > config.reveal_threshold {
        state.revealed = true;
        let reward = state.reward.clone().unwrap_or_default();
        return (state, Some(CardEvent::Revealed { reward }));
    }

    (state, None)
}

/// Back to defaults. Resetting a default state changes nothing and emits nothing.
pub fn reset(state: ScratchState) -> (ScratchState, Option<CardEvent>) {
    if state.is_default() {
        return (state, None);
    }
    (ScratchState::default(), Some(CardEvent::Reset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::config::CardVariant;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flipped(config: &ScratchConfig) -> ScratchState {
        let mut rng = Pcg32::seed_from_u64(1);
        flip(ScratchState::new(), config, &mut rng).0
    }

    #[test]
    fn test_defaults() {
        let state = ScratchState::new();
        assert!(state.points().is_empty());
        assert_eq!(state.progress(), 0.0);
        assert!(!state.revealed());
        assert!(!state.flipped());
        assert_eq!(state.reward(), None);
        assert_eq!(state.phase(), CardPhase::Unflipped);
    }

    #[test]
    fn test_flip_samples_reward() {
        let config = ScratchConfig::classic();
        let mut rng = Pcg32::seed_from_u64(1);
        let (state, event) = flip(ScratchState::new(), &config, &mut rng);
        assert!(state.flipped());
        assert_eq!(state.reward(), Some("₹100 CASHBACK!"));
        assert_eq!(
            event,
            Some(CardEvent::Flipped {
                reward: "₹100 CASHBACK!".to_string()
            })
        );
        assert_eq!(state.phase(), CardPhase::Hidden);
    }

    #[test]
    fn test_classic_tap_toggles_and_keeps_reward() {
        let config = ScratchConfig::classic();
        let mut rng = Pcg32::seed_from_u64(1);
        let (state, _) = flip(ScratchState::new(), &config, &mut rng);
        let (state, event) = flip(state, &config, &mut rng);
        assert!(!state.flipped());
        assert_eq!(event, Some(CardEvent::Unflipped));
        assert_eq!(state.reward(), Some("₹100 CASHBACK!"));
    }

    #[test]
    fn test_lucky_reward_fixed_across_flips() {
        let config = ScratchConfig {
            tap_unflips: true,
            ..CardVariant::Lucky.config()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let (mut state, _) = flip(ScratchState::new(), &config, &mut rng);
        let first = state.reward().map(str::to_string);
        for _ in 0..10 {
            state = flip(state, &config, &mut rng).0;
        }
        assert_eq!(state.reward().map(str::to_string), first);
    }

    #[test]
    fn test_lucky_tap_on_flipped_ignored() {
        let config = CardVariant::Lucky.config();
        let state = flipped(&config);
        let mut rng = Pcg32::seed_from_u64(2);
        let (after, event) = flip(state.clone(), &config, &mut rng);
        assert_eq!(after, state);
        assert_eq!(event, None);
    }

    #[test]
    fn test_sample_ignored_while_unflipped() {
        let config = ScratchConfig::classic();
        let (state, event) = apply_sample(ScratchState::new(), Vec2::new(10.0, 10.0), &config);
        assert!(state.points().is_empty());
        assert_eq!(state.progress(), 0.0);
        assert_eq!(event, None);
    }

    #[test]
    fn test_sample_is_clamped() {
        let config = ScratchConfig::classic();
        let state = flipped(&config);
        let (state, _) = apply_sample(state, Vec2::new(-50.0, 400.0), &config);
        assert_eq!(state.points(), &[Vec2::new(0.0, 180.0)]);
    }

    #[test]
    fn test_reveal_on_fifth_sample_only() {
        let config = ScratchConfig::classic();
        let mut state = flipped(&config);
        let mut reveals = Vec::new();
        for i in 1..=12 {
            let (next, event) = apply_sample(state, Vec2::new(150.0, 90.0), &config);
            state = next;
            if let Some(event) = event {
                reveals.push((i, event));
            }
        }
        assert_eq!(
            reveals,
            vec![(
                5,
                CardEvent::Revealed {
                    reward: "₹100 CASHBACK!".to_string()
                }
            )]
        );
        assert_eq!(state.phase(), CardPhase::Revealed);
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_no_samples_never_reveals() {
        let config = ScratchConfig::classic();
        let state = flipped(&config);
        assert_eq!(state.progress(), 0.0);
        assert!(!state.revealed());
    }

    #[test]
    fn test_unflip_after_reveal_keeps_revealed() {
        let config = ScratchConfig::classic();
        let mut state = flipped(&config);
        for _ in 0..5 {
            state = apply_sample(state, Vec2::new(1.0, 1.0), &config).0;
        }
        let mut rng = Pcg32::seed_from_u64(3);
        let (state, _) = flip(state, &config, &mut rng);
        assert!(!state.flipped());
        assert!(state.revealed());
        assert_eq!(state.phase(), CardPhase::Unflipped);

        // Scratching an unflipped card does nothing, even past the threshold
        let (state, event) = apply_sample(state, Vec2::new(1.0, 1.0), &config);
        assert_eq!(state.points().len(), 5);
        assert_eq!(event, None);
    }

    #[test]
    fn test_reset_from_any_state() {
        let config = ScratchConfig::classic();
        let mut state = flipped(&config);
        for _ in 0..7 {
            state = apply_sample(state, Vec2::new(20.0, 20.0), &config).0;
        }
        let (state, event) = reset(state);
        assert!(state.is_default());
        assert_eq!(state, ScratchState::default());
        assert_eq!(event, Some(CardEvent::Reset));
    }

    #[test]
    fn test_reset_idempotent() {
        let (state, event) = reset(ScratchState::default());
        assert_eq!(state, ScratchState::default());
        assert_eq!(event, None);
        let (state, event) = reset(state);
        assert_eq!(state, ScratchState::default());
        assert_eq!(event, None);
    }

    #[test]
    fn test_reveal_again_after_reset() {
        let config = ScratchConfig::classic();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut reveal_count = 0;
        let mut state = ScratchState::new();
        for _cycle in 0..3 {
            state = flip(state, &config, &mut rng).0;
            for _ in 0..8 {
                let (next, event) = apply_sample(state, Vec2::new(5.0, 5.0), &config);
                state = next;
                if matches!(event, Some(CardEvent::Revealed { .. })) {
                    reveal_count += 1;
                }
            }
            state = reset(state).0;
        }
        assert_eq!(reveal_count, 3);
    }
}
