//! Reveal progress estimate
//!
//! Progress is not measured from pixels. Every sample is assumed to erase a
//! full circle of the configured radius, overlaps included, and the sum is
//! scaled by a tuning multiplier so the card "feels" done well before it is
//! geometrically clear:
//!
//! ```text
//! progress = min(samples * π r² / (width * height) * multiplier, 1.0)
//! ```

use super::config::ScratchConfig;

/// Upper bound on the search in [`samples_to_reveal`]
const MAX_REVEAL_SEARCH: usize = 1_000_000;

/// Estimated revealed fraction after `sample_count` samples, in `[0, 1]`
pub fn estimate_progress(sample_count: usize, config: &ScratchConfig) -> f32 {
    if sample_count == 0 {
        return 0.0;
    }

    let total_area = config.area();
    if total_area <= 0.0 {
        // Degenerate surface: any scratch uncovers all of it
        return 1.0;
    }

    let erased_area = sample_count as f32 * config.hole_area();
    (erased_area / total_area * config.multiplier).clamp(0.0, 1.0)
}

/// Number of samples needed before progress exceeds the reveal threshold.
///
/// Returns `None` when the threshold can never be crossed (zero-size holes,
/// zero multiplier, or a threshold of 1.0 or more).
pub fn samples_to_reveal(config: &ScratchConfig) -> Option<usize> {
    if config.reveal_threshold >= 1.0 {
        return None;
    }
    if estimate_progress(MAX_REVEAL_SEARCH, config) <= config.reveal_threshold {
        return None;
    }

    // Start from the closed-form guess and walk, so float rounding matches
    // estimate_progress exactly.
    let per_sample = config.hole_area() * config.multiplier / config.area().max(f32::MIN_POSITIVE);
    let guess = if per_sample > 0.0 {
        ((config.reveal_threshold / per_sample).floor() as usize).saturating_sub(1)
    } else {
        0
    };

    let mut n = guess.max(1);
    while n > 1 && estimate_progress(n - 1, config) > config.reveal_threshold {
        n -= 1;
    }
    while estimate_progress(n, config) <= config.reveal_threshold {
        n += 1;
    }
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::config::CardVariant;
    use proptest::prelude::*;

    #[test]
    fn test_zero_samples_is_zero() {
        let config = ScratchConfig::classic();
        assert_eq!(estimate_progress(0, &config), 0.0);
    }

    #[test]
    fn test_classic_single_sample() {
        // 300x180, r=20, x5: 400π / 54000 * 5 ≈ 0.1164
        let config = ScratchConfig::classic();
        let p = estimate_progress(1, &config);
        assert!((p - 0.1164).abs() < 0.0005, "progress was {p}");
    }

    #[test]
    fn test_classic_reveals_on_fifth_sample() {
        let config = ScratchConfig::classic();
        assert!(estimate_progress(4, &config) <= 0.5);
        assert!(estimate_progress(5, &config) > 0.5);
        assert_eq!(samples_to_reveal(&config), Some(5));
    }

    #[test]
    fn test_lucky_reveals_on_fourth_sample() {
        // 300x200, r=25, x4: 625π / 60000 * 4 ≈ 0.1309 per sample
        let config = CardVariant::Lucky.config();
        assert!(estimate_progress(3, &config) <= 0.5);
        assert!(estimate_progress(4, &config) > 0.5);
        assert_eq!(samples_to_reveal(&config), Some(4));
    }

    #[test]
    fn test_clamped_at_one() {
        let config = ScratchConfig::classic();
        assert_eq!(estimate_progress(10_000, &config), 1.0);
    }

    #[test]
    fn test_zero_area_surface() {
        let config = ScratchConfig {
            width: 0.0,
            ..ScratchConfig::classic()
        };
        assert_eq!(estimate_progress(0, &config), 0.0);
        assert_eq!(estimate_progress(1, &config), 1.0);
    }

    #[test]
    fn test_unreachable_threshold() {
        let config = ScratchConfig {
            radius: 0.0,
            ..ScratchConfig::classic()
        };
        assert_eq!(samples_to_reveal(&config), None);

        let config = ScratchConfig {
            reveal_threshold: 1.0,
            ..ScratchConfig::classic()
        };
        assert_eq!(samples_to_reveal(&config), None);
    }

    proptest! {
        #[test]
        fn prop_progress_monotonic(n in 0usize..20_000) {
            let config = ScratchConfig::classic();
            prop_assert!(estimate_progress(n, &config) <= estimate_progress(n + 1, &config));
        }

        #[test]
        fn prop_progress_in_unit_range(
            n in 0usize..100_000,
            radius in 0.0f32..200.0,
            multiplier in 0.0f32..20.0,
        ) {
            let config = ScratchConfig {
                radius,
                multiplier,
                ..CardVariant::Lucky.config()
            };
            let p = estimate_progress(n, &config);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
