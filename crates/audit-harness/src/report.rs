//! Audit result types and aggregation

use serde::{Deserialize, Serialize};

use crate::config::PageSpec;
use crate::rating::{QualityBand, FAILED_RATING};

/// Outcome of auditing a single page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// Page name from the configuration
    pub name: String,
    /// Full URL that was audited
    pub url: String,
    /// Whether navigation completed within the timeout
    pub accessible: bool,
    /// Wall-clock navigation time in milliseconds (0 if navigation never completed)
    pub load_time_ms: u64,
    /// Console errors observed, in order, plus the failure reason if the audit failed
    pub errors: Vec<String>,
    /// Console warnings observed, in order
    pub warnings: Vec<String>,
    /// Path of the full-page screenshot, if one was captured
    pub screenshot: Option<String>,
    /// Quality rating in 1..=10
    pub rating: u8,
}

impl PageResult {
    /// Result for a page whose audit failed
    ///
    /// The failure reason is appended after any console errors already
    /// observed, so `errors` is always non-empty and the rating is pinned to
    /// the minimum.
    pub fn failed(
        spec: &PageSpec,
        url: String,
        mut console_errors: Vec<String>,
        warnings: Vec<String>,
        load_time_ms: u64,
        reason: String,
    ) -> Self {
        console_errors.push(reason);
        Self {
            name: spec.name.clone(),
            url,
            accessible: false,
            load_time_ms,
            errors: console_errors,
            warnings,
            screenshot: None,
            rating: FAILED_RATING,
        }
    }
}

/// Aggregate report over a complete audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Name of the audit run
    pub suite_name: String,
    /// Base URL that was audited
    pub base_url: String,
    /// Timestamp when the run started (RFC 3339)
    pub started_at: String,
    /// Total duration of the run in milliseconds
    pub total_duration_ms: u64,
    /// Per-page results, in configured order
    pub pages: Vec<PageResult>,
    /// Number of pages that were accessible
    pub pages_accessible: usize,
    /// Mean load time over all pages, failed pages included
    pub avg_load_time_ms: f64,
    /// Mean rating over all pages
    pub avg_rating: f64,
    /// Total console errors (and failure reasons) across all pages
    pub total_errors: usize,
    /// Total console warnings across all pages
    pub total_warnings: usize,
    /// Qualitative verdict derived from the mean rating
    pub band: QualityBand,
}

impl AuditReport {
    /// Build a report from an ordered result collection
    ///
    /// Means divide by the total page count; pages that failed navigation
    /// contribute their recorded (typically zero) load time.
    pub fn from_pages(
        suite_name: String,
        base_url: String,
        started_at: String,
        total_duration_ms: u64,
        pages: Vec<PageResult>,
    ) -> Self {
        let n = pages.len();
        let pages_accessible = pages.iter().filter(|p| p.accessible).count();
        let total_errors = pages.iter().map(|p| p.errors.len()).sum();
        let total_warnings = pages.iter().map(|p| p.warnings.len()).sum();
        let (avg_load_time_ms, avg_rating) = if n == 0 {
            (0.0, 0.0)
        } else {
            let load_sum: u64 = pages.iter().map(|p| p.load_time_ms).sum();
            let rating_sum: u64 = pages.iter().map(|p| u64::from(p.rating)).sum();
            (load_sum as f64 / n as f64, rating_sum as f64 / n as f64)
        };

        Self {
            suite_name,
            base_url,
            started_at,
            total_duration_ms,
            pages,
            pages_accessible,
            avg_load_time_ms,
            avg_rating,
            total_errors,
            total_warnings,
            band: QualityBand::from_mean(avg_rating),
        }
    }

    /// Whether every configured page was accessible
    pub fn all_accessible(&self) -> bool {
        self.pages_accessible == self.pages.len()
    }
}
