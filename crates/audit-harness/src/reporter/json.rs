//! JSON reporter for audit results
//!
//! The JSON output is the ordered array of per-page results, matching the
//! `test-results.json` artifact written after each run.

use crate::report::AuditReport;
use anyhow::Result;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format the page results as a JSON array
    ///
    /// # Arguments
    ///
    /// * `report` - The audit report whose pages are serialized
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn format(report: &AuditReport, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(&report.pages)?
        } else {
            serde_json::to_string(&report.pages)?
        };
        Ok(output)
    }
}
