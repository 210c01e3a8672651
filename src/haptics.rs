//! Haptic feedback
//!
//! Impacts map to short vibration pulses through `navigator.vibrate` on the
//! web. Browsers without the Vibration API (and native builds) just log.

/// Impact strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStyle {
    Medium,
    Heavy,
}

impl HapticStyle {
    /// Vibration pulse length
    pub fn duration_ms(&self) -> u32 {
        match self {
            HapticStyle::Medium => 20,
            HapticStyle::Heavy => 35,
        }
    }
}

/// Fire-and-forget haptic output
pub struct HapticEngine {
    enabled: bool,
    /// Last pulse start (ms), used to avoid stacking pulses during a drag
    last_pulse: f64,
}

impl Default for HapticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HapticEngine {
    /// Minimum gap between pulses; drag samples arrive far faster than this
    const MIN_GAP_MS: f64 = 40.0;

    pub fn new() -> Self {
        Self {
            enabled: true,
            last_pulse: f64::NEG_INFINITY,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a pulse requested at `now_ms` would be played
    fn should_pulse(&self, now_ms: f64) -> bool {
        self.enabled && now_ms - self.last_pulse >= Self::MIN_GAP_MS
    }

    /// Play an impact. Returns whether a pulse was issued.
    pub fn impact(&mut self, style: HapticStyle, now_ms: f64) -> bool {
        if !self.should_pulse(now_ms) {
            return false;
        }
        self.last_pulse = now_ms;
        self.vibrate(style)
    }

    #[cfg(target_arch = "wasm32")]
    fn vibrate(&self, style: HapticStyle) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let played = window.navigator().vibrate_with_duration(style.duration_ms());
        if !played {
            log::debug!("Vibration API refused {:?} impact", style);
        }
        played
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn vibrate(&self, style: HapticStyle) -> bool {
        log::debug!("Haptic impact: {:?} ({} ms)", style, style.duration_ms());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_ordered() {
        assert!(HapticStyle::Medium.duration_ms() < HapticStyle::Heavy.duration_ms());
    }

    #[test]
    fn test_disabled_never_pulses() {
        let mut engine = HapticEngine::new();
        engine.set_enabled(false);
        assert!(!engine.impact(HapticStyle::Heavy, 0.0));
        assert!(!engine.impact(HapticStyle::Heavy, 1000.0));
    }

    #[test]
    fn test_pulses_rate_limited() {
        let mut engine = HapticEngine::new();
        assert!(engine.impact(HapticStyle::Heavy, 0.0));
        assert!(!engine.impact(HapticStyle::Heavy, 10.0));
        assert!(engine.impact(HapticStyle::Heavy, 50.0));
    }
}
