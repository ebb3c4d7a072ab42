//! Run an audit from a TOML config file
//!
//! Usage: cargo run -p audit-harness --example run_audit -- <audit.toml>

use anyhow::Result;
use audit_harness::config::Config;
use audit_harness::reporter::{OutputFormat, Reporter};
use audit_harness::runner::AuditRunner;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => {
            println!("Loading config from: {}", path);
            Config::from_file(path)?
        }
        None => Config::from_env(),
    };

    println!("Starting audit: {}", config.audit.name);
    println!("  Base URL: {}", config.audit.base_url);
    println!("  Pages: {}", config.pages.len());
    println!();

    let runner = AuditRunner::new().await?;
    let report = runner.run(&config).await?;
    runner.close().await?;

    // Print results
    let reporter = Reporter::new(OutputFormat::Console);
    reporter.report(&report)?;

    Ok(())
}
