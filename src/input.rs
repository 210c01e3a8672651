//! Pointer gesture tracking
//!
//! Mouse and touch both feed one pointer stream. A press that ends without
//! travelling further than [`TAP_SLOP`] is a tap (flip); every move while
//! pressed is a drag sample (scratch).

use glam::Vec2;

/// Travel in CSS pixels after which a press can no longer become a tap
pub const TAP_SLOP: f32 = 8.0;

/// What a pointer-up turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRelease {
    Tap,
    DragEnd,
    /// Up without a matching down (e.g. pressed outside the card)
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pressed: bool,
    start: Vec2,
    travelled: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn down(&mut self, pos: Vec2) {
        self.pressed = true;
        self.start = pos;
        self.travelled = false;
    }

    /// Returns the drag sample for this move, if the pointer is pressed
    pub fn moved(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.pressed {
            return None;
        }
        if pos.distance(self.start) > TAP_SLOP {
            self.travelled = true;
        }
        Some(pos)
    }

    pub fn up(&mut self) -> PointerRelease {
        if !self.pressed {
            return PointerRelease::Ignored;
        }
        self.pressed = false;
        if self.travelled {
            PointerRelease::DragEnd
        } else {
            PointerRelease::Tap
        }
    }

    /// Pointer left the surface or the gesture was cancelled
    pub fn cancel(&mut self) {
        self.pressed = false;
        self.travelled = false;
    }
}

/// Keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Back,
    Reset,
    Flip,
    ToggleHaptics,
    ToggleReducedMotion,
}

/// Map a `KeyboardEvent.key` to a command.
///
/// Space and Enter activate a focused button natively, so they only flip the
/// card when focus is not on a control.
pub fn key_command(key: &str, focus_on_control: bool) -> Option<KeyCommand> {
    match key {
        "Escape" => Some(KeyCommand::Back),
        "r" | "R" => Some(KeyCommand::Reset),
        "h" | "H" => Some(KeyCommand::ToggleHaptics),
        "m" | "M" => Some(KeyCommand::ToggleReducedMotion),
        " " | "Enter" if !focus_on_control => Some(KeyCommand::Flip),
        _ => None,
    }
}

/// Convert a position relative to an element's box into card-local units
pub fn to_card_local(offset: Vec2, element_size: Vec2, card_size: Vec2) -> Vec2 {
    if element_size.x <= 0.0 || element_size.y <= 0.0 {
        return offset;
    }
    offset * (card_size / element_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap() {
        let mut tracker = PointerTracker::new();
        tracker.down(Vec2::new(10.0, 10.0));
        assert_eq!(tracker.moved(Vec2::new(12.0, 11.0)), Some(Vec2::new(12.0, 11.0)));
        assert_eq!(tracker.up(), PointerRelease::Tap);
        assert!(!tracker.pressed());
    }

    #[test]
    fn test_drag() {
        let mut tracker = PointerTracker::new();
        tracker.down(Vec2::new(10.0, 10.0));
        tracker.moved(Vec2::new(40.0, 10.0));
        // Coming back near the start does not turn it back into a tap
        tracker.moved(Vec2::new(11.0, 10.0));
        assert_eq!(tracker.up(), PointerRelease::DragEnd);
    }

    #[test]
    fn test_moves_without_press_ignored() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.moved(Vec2::new(5.0, 5.0)), None);
        assert_eq!(tracker.up(), PointerRelease::Ignored);
    }

    #[test]
    fn test_cancel() {
        let mut tracker = PointerTracker::new();
        tracker.down(Vec2::ZERO);
        tracker.cancel();
        assert_eq!(tracker.moved(Vec2::new(1.0, 1.0)), None);
        assert_eq!(tracker.up(), PointerRelease::Ignored);
    }

    #[test]
    fn test_flip_keys_leave_focused_buttons_alone() {
        assert_eq!(key_command(" ", false), Some(KeyCommand::Flip));
        assert_eq!(key_command("Enter", false), Some(KeyCommand::Flip));
        assert_eq!(key_command(" ", true), None);
        assert_eq!(key_command("Enter", true), None);
        // Letter shortcuts work regardless of focus
        assert_eq!(key_command("R", true), Some(KeyCommand::Reset));
        assert_eq!(key_command("Escape", true), Some(KeyCommand::Back));
        assert_eq!(key_command("x", false), None);
    }

    #[test]
    fn test_to_card_local_scales() {
        let p = to_card_local(Vec2::new(150.0, 45.0), Vec2::new(600.0, 360.0), Vec2::new(300.0, 180.0));
        assert_eq!(p, Vec2::new(75.0, 22.5));
        let p = to_card_local(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::new(300.0, 180.0));
        assert_eq!(p, Vec2::new(3.0, 4.0));
    }
}
