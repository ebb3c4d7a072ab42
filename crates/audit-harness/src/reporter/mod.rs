//! Audit result reporting
//!
//! This module handles formatting and outputting audit results.
//!
//! # Output Formats
//!
//! - **Console**: human-readable summary with per-page status lines and the
//!   overall assessment
//! - **Json / JsonPretty**: the ordered array of per-page results, the shape
//!   of the `test-results.json` artifact
//!
//! # Example
//!
//! ```no_run
//! use audit_harness::reporter::{Reporter, OutputFormat};
//! use audit_harness::report::AuditReport;
//!
//! # fn example(report: AuditReport) -> anyhow::Result<()> {
//! let reporter = Reporter::new(OutputFormat::Console);
//! reporter.report(&report)?;
//!
//! // Or write the JSON artifact
//! Reporter::new(OutputFormat::JsonPretty).write_to_file(&report, "test-results.json")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::report::AuditReport;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

/// Output format for audit results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON array of page results
    Json,
    /// Pretty-printed JSON array of page results
    JsonPretty,
    /// Console output for humans
    Console,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Console
    }
}

/// Reporter for audit results
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report results to stdout
    pub fn report(&self, report: &AuditReport) -> Result<()> {
        let output = self.format_results(report)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write results to a file, overwriting any prior contents
    pub fn write_to_file<P: AsRef<Path>>(&self, report: &AuditReport, path: P) -> Result<()> {
        let output = self.format_results(report)?;
        fs::write(path, output)?;
        Ok(())
    }

    /// Format results as a string
    pub fn format_results(&self, report: &AuditReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}
