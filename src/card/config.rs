//! Card tuning
//!
//! Both card styles share one surface implementation; they differ only in
//! the numbers below.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::reward::RewardCatalog;
use crate::clamp_to_bounds;
use crate::consts::*;

/// The card styles reachable from the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardVariant {
    /// Plain card with a single fixed cashback reward
    Classic,
    /// Gradient card with a random reward, haptics and confetti
    Lucky,
}

impl CardVariant {
    pub const ALL: [CardVariant; 2] = [CardVariant::Classic, CardVariant::Lucky];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardVariant::Classic => "classic",
            CardVariant::Lucky => "lucky",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(CardVariant::Classic),
            "lucky" | "symbols" => Some(CardVariant::Lucky),
            _ => None,
        }
    }

    pub fn config(&self) -> ScratchConfig {
        match self {
            CardVariant::Classic => ScratchConfig::classic(),
            CardVariant::Lucky => ScratchConfig::lucky(),
        }
    }

    /// Line shown under the card once the reward is revealed
    pub fn win_message(&self, reward: &str) -> String {
        match self {
            CardVariant::Classic => format!("Congratulations! You won {reward}"),
            CardVariant::Lucky => format!("You won {reward} CASHBACK!"),
        }
    }

    /// Heading above the win message, if the style has one
    pub fn win_heading(&self) -> Option<&'static str> {
        match self {
            CardVariant::Classic => None,
            CardVariant::Lucky => Some("🎉 Congratulations! 🎉"),
        }
    }

    /// Label of the claim button shown with the win message, if any
    pub fn claim_label(&self) -> Option<&'static str> {
        match self {
            CardVariant::Classic => None,
            CardVariant::Lucky => Some("Claim Now"),
        }
    }

    /// Instruction text for the current flip state
    pub fn instruction(&self, flipped: bool) -> &'static str {
        match (self, flipped) {
            (CardVariant::Classic, _) => "Tap to flip, then scratch to reveal your surprise!",
            (CardVariant::Lucky, false) => "Tap the card to flip",
            (CardVariant::Lucky, true) => "Scratch to reveal your reward!",
        }
    }

    /// Label of the reset affordance
    pub fn reset_label(&self) -> &'static str {
        match self {
            CardVariant::Classic => "Reset Card",
            CardVariant::Lucky => "Try Again",
        }
    }
}

/// Everything that parameterizes a scratch surface
#[derive(Debug, Clone, PartialEq)]
pub struct ScratchConfig {
    pub variant: CardVariant,
    /// Surface size in local units
    pub width: f32,
    pub height: f32,
    /// Radius of the hole punched by each sample
    pub radius: f32,
    /// Tuning factor applied to the erased-area ratio
    pub multiplier: f32,
    /// Progress that must be exceeded to reveal (exclusive)
    pub reveal_threshold: f32,
    pub rewards: RewardCatalog,
    /// Whether tapping a flipped card turns it back over
    pub tap_unflips: bool,
    /// Emit haptic requests on flip, scratch, reveal and reset
    pub haptics: bool,
    /// Burst confetti on reveal
    pub confetti: bool,
}

impl ScratchConfig {
    pub fn classic() -> Self {
        Self {
            variant: CardVariant::Classic,
            width: CLASSIC_WIDTH,
            height: CLASSIC_HEIGHT,
            radius: CLASSIC_RADIUS,
            multiplier: CLASSIC_MULTIPLIER,
            reveal_threshold: REVEAL_THRESHOLD,
            rewards: RewardCatalog::single("₹100 CASHBACK!"),
            tap_unflips: true,
            haptics: false,
            confetti: false,
        }
    }

    pub fn lucky() -> Self {
        Self {
            variant: CardVariant::Lucky,
            width: LUCKY_WIDTH,
            height: LUCKY_HEIGHT,
            radius: LUCKY_RADIUS,
            multiplier: LUCKY_MULTIPLIER,
            reveal_threshold: REVEAL_THRESHOLD,
            rewards: RewardCatalog::new(["₹50", "₹100", "₹150", "₹200", "₹500"]),
            tap_unflips: false,
            haptics: true,
            confetti: true,
        }
    }

    /// Surface area (width * height)
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Area credited to a single sample (π r²)
    #[inline]
    pub fn hole_area(&self) -> f32 {
        self.radius * self.radius * PI
    }

    /// Clamp a sample into the surface bounds
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        clamp_to_bounds(p, self.width, self.height)
    }
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_round_trip_names() {
        for variant in CardVariant::ALL {
            assert_eq!(CardVariant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(CardVariant::from_str("LUCKY"), Some(CardVariant::Lucky));
        assert_eq!(CardVariant::from_str("gold"), None);
    }

    #[test]
    fn test_classic_numbers() {
        let config = ScratchConfig::classic();
        assert_eq!(config.area(), 54_000.0);
        assert!((config.hole_area() - 1256.637).abs() < 0.01);
        assert!(config.tap_unflips);
        assert_eq!(config.rewards.len(), 1);
    }

    #[test]
    fn test_lucky_numbers() {
        let config = CardVariant::Lucky.config();
        assert_eq!(config.area(), 60_000.0);
        assert!(!config.tap_unflips);
        assert!(config.haptics && config.confetti);
        assert_eq!(config.rewards.len(), 5);
    }

    #[test]
    fn test_clamp() {
        let config = ScratchConfig::classic();
        assert_eq!(config.clamp(Vec2::new(300.0, 180.0)), Vec2::new(300.0, 180.0));
        assert_eq!(config.clamp(Vec2::new(301.0, 10.0)), Vec2::new(300.0, 10.0));
        assert_eq!(config.clamp(Vec2::new(-3.0, 999.0)), Vec2::new(0.0, 180.0));
    }

    #[test]
    fn test_win_messages() {
        assert_eq!(
            CardVariant::Classic.win_message("₹100 CASHBACK!"),
            "Congratulations! You won ₹100 CASHBACK!"
        );
        assert_eq!(CardVariant::Lucky.win_message("₹50"), "You won ₹50 CASHBACK!");
    }

    #[test]
    fn test_lucky_win_extras() {
        assert_eq!(CardVariant::Classic.win_heading(), None);
        assert_eq!(CardVariant::Classic.claim_label(), None);
        assert_eq!(CardVariant::Lucky.win_heading(), Some("🎉 Congratulations! 🎉"));
        assert_eq!(CardVariant::Lucky.claim_label(), Some("Claim Now"));
    }
}
