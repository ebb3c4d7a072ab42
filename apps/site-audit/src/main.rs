//! site-audit - headless-browser quality audit for marketing sites
//!
//! Audits the configured page set, writes one full-page screenshot per page
//! and a `test-results.json` artifact, and prints a summary with a 1..=10
//! rating per page.
//!
//! Usage:
//!   site-audit [audit.toml]
//!
//! Without a config file the standard page set is audited against `SITE_URL`
//! (default `http://localhost:8090`). Exits non-zero when any page is
//! inaccessible, so the tool can gate CI.

use anyhow::Result;
use std::env;
use std::process::ExitCode;
use tracing::info;

use audit_harness::reporter::{OutputFormat, Reporter};
use audit_harness::runner::AuditRunner;
use audit_harness::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_audit=info,audit_harness=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    info!(
        "Auditing {} pages at {}",
        config.pages.len(),
        config.audit.base_url
    );

    let runner = AuditRunner::new().await?;
    let report = match runner.run(&config).await {
        Ok(report) => {
            runner.close().await?;
            report
        }
        Err(e) => {
            let _ = runner.close().await;
            return Err(e);
        }
    };

    Reporter::new(OutputFormat::Console).report(&report)?;
    Reporter::new(OutputFormat::JsonPretty).write_to_file(&report, &config.audit.results_path)?;

    info!("Screenshots saved to {}", config.audit.screenshot_dir);
    info!("Results saved to {}", config.audit.results_path);

    if !report.all_accessible() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
