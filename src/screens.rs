//! Home screen and navigation
//!
//! The app shows either the home screen or one card. Entering a card mounts
//! a fresh surface; going back drops it, so nothing carries over between
//! visits.

use crate::card::{CardVariant, ScratchSurface};
use crate::color::Color;

/// Which page is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Card(CardVariant),
}

impl Screen {
    /// DOM id of the panel for this screen
    pub fn panel_id(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Card(_) => "card-screen",
        }
    }

    pub fn variant(&self) -> Option<CardVariant> {
        match self {
            Screen::Home => None,
            Screen::Card(variant) => Some(*variant),
        }
    }
}

/// Entry on the home screen linking to a card
#[derive(Debug, Clone, PartialEq)]
pub struct GameCard {
    pub variant: CardVariant,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: Color,
}

impl GameCard {
    pub fn for_variant(variant: CardVariant) -> Self {
        match variant {
            CardVariant::Classic => Self {
                variant,
                title: "Classic Scratch",
                description: "Traditional scratch card with cash prizes",
                icon: "💵",
                color: Color::from_hex("34C759"),
            },
            CardVariant::Lucky => Self {
                variant,
                title: "Lucky Symbols",
                description: "Match symbols to win exciting rewards",
                icon: "⭐",
                color: Color::from_hex("FF9500"),
            },
        }
    }

    /// DOM id of the button that opens this card
    pub fn button_id(&self) -> String {
        format!("open-{}", self.variant.as_str())
    }
}

/// One line of the "How to Play" box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoRow {
    pub icon: &'static str,
    pub text: &'static str,
}

pub const HOME_TITLE: &str = "Scratch & Win";
pub const HOME_FOOTER: &str = "Try both of our exciting scratch card games and test your luck!";

pub const HOW_TO_PLAY: [InfoRow; 3] = [
    InfoRow {
        icon: "✋",
        text: "Scratch the card with your finger",
    },
    InfoRow {
        icon: "💲",
        text: "Reveal matching symbols to win",
    },
    InfoRow {
        icon: "🎁",
        text: "Each card has different prizes!",
    },
];

/// Entries shown on the home screen, in display order
pub fn game_cards() -> Vec<GameCard> {
    CardVariant::ALL.iter().map(|&v| GameCard::for_variant(v)).collect()
}

/// Current screen plus the surface mounted on it
pub struct Navigation {
    screen: Screen,
    surface: Option<ScratchSurface>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            surface: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn surface(&self) -> Option<&ScratchSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut ScratchSurface> {
        self.surface.as_mut()
    }

    /// Open a card with a freshly mounted surface
    pub fn open(&mut self, variant: CardVariant, seed: u64) -> &mut ScratchSurface {
        log::info!("Opening {} card", variant.as_str());
        self.screen = Screen::Card(variant);
        self.surface.insert(ScratchSurface::new(variant.config(), seed))
    }

    /// Back to the home screen; the mounted surface is dropped
    pub fn back(&mut self) {
        if self.screen != Screen::Home {
            log::info!("Back to home");
        }
        self.screen = Screen::Home;
        self.surface = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_home_lists_both_cards() {
        let cards = game_cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Classic Scratch");
        assert_eq!(cards[1].title, "Lucky Symbols");
        assert_eq!(cards[1].button_id(), "open-lucky");
    }

    #[test]
    fn test_navigation_mounts_and_drops() {
        let mut nav = Navigation::new();
        assert_eq!(nav.screen(), Screen::Home);
        assert!(nav.surface().is_none());

        let surface = nav.open(CardVariant::Classic, 1);
        surface.on_flip();
        surface.on_drag_sample(Vec2::new(10.0, 10.0));
        assert_eq!(nav.screen().variant(), Some(CardVariant::Classic));
        assert!(nav.surface().is_some_and(|s| s.progress() > 0.0));

        nav.back();
        assert_eq!(nav.screen(), Screen::Home);
        assert!(nav.surface().is_none());

        // Re-entering starts from defaults
        let surface = nav.open(CardVariant::Classic, 2);
        assert!(surface.state().is_default());
    }

    #[test]
    fn test_home_copy() {
        assert_eq!(HOME_TITLE, "Scratch & Win");
        assert!(HOME_FOOTER.starts_with("Try both"));
    }

    #[test]
    fn test_panel_ids() {
        assert_eq!(Screen::Home.panel_id(), "home");
        assert_eq!(Screen::Card(CardVariant::Lucky).panel_id(), "card-screen");
    }
}
