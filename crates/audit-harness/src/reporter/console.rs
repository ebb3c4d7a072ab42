//! Console reporter for audit results
//!
//! Provides human-readable output with per-page status lines and the overall
//! assessment.

use anyhow::Result;
use std::fmt::Write;

use crate::rating::SLOW_LOAD_THRESHOLD_MS;
use crate::report::{AuditReport, PageResult};

/// Mean rating below which remediation hints are shown.
const HINT_THRESHOLD: f64 = 8.0;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format an audit report for console output
    pub fn format(report: &AuditReport) -> Result<String> {
        let mut output = String::new();

        // Header
        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                        AUDIT RESULTS                          ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        // Run info
        writeln!(output, "Suite:     {}", report.suite_name)?;
        writeln!(output, "Base URL:  {}", report.base_url)?;
        writeln!(output, "Started:   {}", report.started_at)?;
        writeln!(output, "Duration:  {}ms", report.total_duration_ms)?;
        writeln!(output)?;

        // Aggregates
        writeln!(output, "Summary:")?;
        writeln!(output, "  Pages Tested:          {}", report.pages.len())?;
        writeln!(
            output,
            "  Pages Accessible:      {}/{}",
            report.pages_accessible,
            report.pages.len()
        )?;
        writeln!(
            output,
            "  Average Load Time:     {}ms",
            report.avg_load_time_ms.round() as u64
        )?;
        writeln!(output, "  Total Console Errors:  {}", report.total_errors)?;
        writeln!(output, "  Average Rating:        {:.1}/10", report.avg_rating)?;
        writeln!(output)?;

        // Per-page lines
        writeln!(output, "Individual Ratings:")?;
        for page in &report.pages {
            Self::format_page(&mut output, page)?;
        }

        // Verdict
        writeln!(output)?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(
            output,
            "Overall Assessment: {} - {}",
            report.band.label(),
            report.band.assessment()
        )?;

        if report.avg_rating < HINT_THRESHOLD {
            writeln!(output)?;
            writeln!(output, "Recommended improvements:")?;
            if report.avg_load_time_ms > SLOW_LOAD_THRESHOLD_MS as f64 {
                writeln!(output, "  • Optimize load time (currently >3s)")?;
            }
            if report.total_errors > 0 {
                writeln!(output, "  • Fix console errors")?;
            }
            if !report.all_accessible() {
                writeln!(output, "  • Fix inaccessible pages")?;
            }
        }

        writeln!(output)?;
        Ok(output)
    }

    fn format_page(output: &mut String, page: &PageResult) -> Result<()> {
        let status = if page.accessible { "OK  " } else { "FAIL" };
        writeln!(
            output,
            "  [{}] {}: {}/10 ({}ms)",
            status, page.name, page.rating, page.load_time_ms
        )?;

        // Show the first few problems inline; the JSON artifact has them all.
        for error in page.errors.iter().take(3) {
            writeln!(output, "         ✗ {}", error)?;
        }
        if page.errors.len() > 3 {
            writeln!(output, "         … and {} more", page.errors.len() - 3)?;
        }

        Ok(())
    }
}
