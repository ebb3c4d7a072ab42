//! Property tests for the rating formula and verdict bands
//!
//! Run with: cargo test -p audit-harness --test rating_props

use audit_harness::rating::{score, QualityBand, RatingInputs};
use proptest::prelude::*;

fn inputs_strategy() -> impl Strategy<Value = RatingInputs> {
    (
        0u64..120_000,
        0usize..40,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(load_time_ms, error_count, has_images, has_navigation, has_headings)| RatingInputs {
                load_time_ms,
                error_count,
                has_images,
                has_navigation,
                has_headings,
            },
        )
}

proptest! {
    /// The score is always an integer in 1..=10
    #[test]
    fn score_stays_in_range(inputs in inputs_strategy()) {
        let rating = score(&inputs);
        prop_assert!((1u8..=10).contains(&rating));
    }

    /// The same inputs always produce the same score
    #[test]
    fn score_is_deterministic(inputs in inputs_strategy()) {
        prop_assert_eq!(score(&inputs), score(&inputs));
    }

    /// Additional console errors never raise the score
    #[test]
    fn more_errors_never_raise_score(inputs in inputs_strategy()) {
        let noisier = RatingInputs {
            error_count: inputs.error_count + 1,
            ..inputs
        };
        prop_assert!(score(&noisier) <= score(&inputs));
    }

    /// Slower loads never raise the score
    #[test]
    fn slower_loads_never_raise_score(inputs in inputs_strategy(), extra in 1u64..60_000) {
        let slower = RatingInputs {
            load_time_ms: inputs.load_time_ms + extra,
            ..inputs
        };
        prop_assert!(score(&slower) <= score(&inputs));
    }

    /// A structurally complete, fast, quiet page always scores 10
    #[test]
    fn clean_fast_page_scores_ten(load_time_ms in 0u64..=3_000) {
        let inputs = RatingInputs {
            load_time_ms,
            error_count: 0,
            has_images: true,
            has_navigation: true,
            has_headings: true,
        };
        prop_assert_eq!(score(&inputs), 10);
    }

    /// Every mean rating maps to exactly one band
    #[test]
    fn bands_cover_all_means(mean in 0.0f64..=10.0) {
        let band = QualityBand::from_mean(mean);
        let expected = if mean >= 9.0 {
            QualityBand::Excellent
        } else if mean >= 7.0 {
            QualityBand::Good
        } else if mean >= 5.0 {
            QualityBand::Fair
        } else {
            QualityBand::Poor
        };
        prop_assert_eq!(band, expected);
    }
}
