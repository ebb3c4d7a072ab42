//! Heuristic page quality scoring
//!
//! A page starts at 10 and loses points for slow loads, console errors, and
//! missing structural elements (images, a navigation landmark, headings).
//! The result is clamped to the 1..=10 range.

use serde::{Deserialize, Serialize};

/// Load time above which a page is considered slow, in milliseconds.
pub const SLOW_LOAD_THRESHOLD_MS: u64 = 3_000;

/// Inputs to the quality score, collected from a single page audit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingInputs {
    /// Wall-clock navigation time in milliseconds
    pub load_time_ms: u64,
    /// Number of console errors observed while loading the page
    pub error_count: usize,
    /// Whether the page contains at least one `<img>` element
    pub has_images: bool,
    /// Whether the page contains at least one `<nav>` landmark
    pub has_navigation: bool,
    /// Whether the page contains at least one `h1`/`h2`/`h3` heading
    pub has_headings: bool,
}

/// Score a page on the 1..=10 scale
///
/// Deductions from the starting score of 10:
/// - 2 points if the load took longer than 3 seconds
/// - 1 point per console error (uncapped before clamping)
/// - 2 points each for missing images, navigation, or headings
///
/// The function is pure: the same inputs always produce the same score.
///
/// # Example
///
/// ```
/// use audit_harness::rating::{score, RatingInputs};
///
/// let inputs = RatingInputs {
///     load_time_ms: 1000,
///     error_count: 0,
///     has_images: true,
///     has_navigation: true,
///     has_headings: true,
/// };
/// assert_eq!(score(&inputs), 10);
/// ```
pub fn score(inputs: &RatingInputs) -> u8 {
    let mut rating: i64 = 10;
    if inputs.load_time_ms > SLOW_LOAD_THRESHOLD_MS {
        rating -= 2;
    }
    rating -= inputs.error_count as i64;
    if !inputs.has_images {
        rating -= 2;
    }
    if !inputs.has_navigation {
        rating -= 2;
    }
    if !inputs.has_headings {
        rating -= 2;
    }
    rating.clamp(1, 10) as u8
}

/// Rating recorded for a page that never completed its audit.
pub const FAILED_RATING: u8 = 1;

/// Qualitative verdict derived from the mean rating across all pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityBand {
    /// Band for a mean rating
    pub fn from_mean(mean_rating: f64) -> Self {
        if mean_rating >= 9.0 {
            QualityBand::Excellent
        } else if mean_rating >= 7.0 {
            QualityBand::Good
        } else if mean_rating >= 5.0 {
            QualityBand::Fair
        } else {
            QualityBand::Poor
        }
    }

    /// Short status label
    pub fn label(&self) -> &'static str {
        match self {
            QualityBand::Excellent => "EXCELLENT",
            QualityBand::Good => "GOOD",
            QualityBand::Fair => "FAIR",
            QualityBand::Poor => "POOR",
        }
    }

    /// One-line assessment shown in the console summary
    pub fn assessment(&self) -> &'static str {
        match self {
            QualityBand::Excellent => "Professional quality website",
            QualityBand::Good => "Minor improvements needed",
            QualityBand::Fair => "Significant improvements needed",
            QualityBand::Poor => "Major redesign required",
        }
    }
}
