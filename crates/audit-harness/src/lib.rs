//! Audit harness for marketing-site quality checks
//!
//! This crate drives a headless browser over a configured list of pages,
//! capturing full-page screenshots, console diagnostics, and load times, and
//! scores each page on a 1..=10 scale.
//!
//! # Features
//!
//! - **Screenshots**: one full-page PNG per audited page
//! - **Console Diagnostics**: page-emitted errors and warnings, in order
//! - **Quality Rating**: deterministic 1..=10 score per page plus an overall
//!   verdict band
//! - **Reports**: human-readable console summary and a JSON artifact
//!
//! # Example
//!
//! ```no_run
//! use audit_harness::{Config, runner::AuditRunner, reporter::{Reporter, OutputFormat}};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Base URL from SITE_URL, default page set
//! let config = Config::from_env();
//!
//! // Launch the browser and audit every page in order
//! let runner = AuditRunner::new().await?;
//! let report = runner.run(&config).await?;
//! runner.close().await?;
//!
//! // Report results
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! Reporter::new(OutputFormat::JsonPretty).write_to_file(&report, "test-results.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Audits can also be configured with TOML files:
//!
//! ```toml
//! [audit]
//! name = "Marketing Site Audit"
//! base_url = "http://localhost:8090"
//! screenshot_dir = "screenshots"
//! results_path = "test-results.json"
//!
//! [viewport]
//! width = 1920
//! height = 1080
//!
//! [[pages]]
//! name = "Home"
//! path = "/"
//!
//! [[pages]]
//! name = "Contact"
//! path = "/contact/"
//! ```

pub mod config;
pub mod rating;
pub mod report;
pub mod reporter;
pub mod runner;

// Re-export main types for convenience
pub use config::{Config, PageSpec};
pub use rating::QualityBand;
pub use report::{AuditReport, PageResult};
pub use reporter::{OutputFormat, Reporter};
pub use runner::AuditRunner;
