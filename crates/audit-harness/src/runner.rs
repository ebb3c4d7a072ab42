//! Audit execution orchestration
//!
//! This module coordinates the audit run: one shared browser instance, one
//! isolated page context per configured page, strictly sequential processing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Browser Instance                      │
//! ├─────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐    │
//! │  │  Context 1  │ → │  Context 2  │ → │  Context 3  │ …  │
//! │  │   (Home)    │   │  (Company)  │   │ (Platform)  │    │
//! │  └─────────────┘   └─────────────┘   └─────────────┘    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-page failures (navigation timeouts, DNS errors, screenshot or DOM
//! evaluation errors) are downgraded to a recorded [`PageResult`] and never
//! abort the run.
//!
//! # Example
//!
//! ```no_run
//! use audit_harness::{Config, runner::AuditRunner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env();
//! let runner = AuditRunner::new().await?;
//! let report = runner.run(&config).await?;
//! runner.close().await?;
//!
//! for page in &report.pages {
//!     println!("{}: {}/10 ({}ms)", page.name, page.rating, page.load_time_ms);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EventConsoleApiCalled, RemoteObject,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{Config, PageSpec, ViewportConfig};
use crate::rating::{self, RatingInputs};
use crate::report::{AuditReport, PageResult};

/// Per-page failure causes
///
/// Both kinds are caught at the page boundary and recorded in the result;
/// neither aborts the run. The message is what ends up in `errors`, verbatim.
#[derive(Debug, Error)]
enum AuditError {
    /// Navigation never completed: timeout, connection refused, DNS failure
    #[error("{0}")]
    Navigation(String),
    /// Navigation succeeded but a later automation step failed
    #[error("{0}")]
    Automation(String),
}

/// Data gathered from a page that finished loading
struct PageSnapshot {
    load_time_ms: u64,
    screenshot: String,
    has_images: bool,
    has_navigation: bool,
    has_headings: bool,
}

/// A failed audit, keeping whatever load time was recorded before the failure
struct PageFailure {
    load_time_ms: u64,
    error: AuditError,
}

/// Console messages observed on a page, split by severity
#[derive(Debug, Default)]
struct ConsoleLog {
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Captures console error/warning messages for the lifetime of one page context
struct ConsoleCapture {
    log: Arc<Mutex<ConsoleLog>>,
    task: tokio::task::JoinHandle<()>,
}

impl ConsoleCapture {
    /// Subscribe to console API events and accumulate them in the background
    ///
    /// Must be attached before navigating so messages emitted during page
    /// load are captured.
    async fn attach(page: &Page) -> Result<Self> {
        let log = Arc::new(Mutex::new(ConsoleLog::default()));
        let sink = log.clone();

        let mut events = page
            .event_listener::<EventConsoleApiCalled>()
            .await
            .context("Failed to subscribe to console events")?;

        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let text = render_console_args(&event.args);
                let mut log = sink.lock().await;
                match event.r#type {
                    ConsoleApiCalledType::Error => log.errors.push(text),
                    ConsoleApiCalledType::Warning => log.warnings.push(text),
                    _ => {}
                }
            }
        });

        Ok(Self { log, task })
    }

    /// Stop capturing and return the accumulated messages
    async fn finish(self) -> (Vec<String>, Vec<String>) {
        self.task.abort();
        let log = self.log.lock().await;
        (log.errors.clone(), log.warnings.clone())
    }
}

/// Render a console call's arguments into one log line
fn render_console_args(args: &[RemoteObject]) -> String {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        if let Some(value) = arg.value.as_ref() {
            match value.as_str() {
                Some(s) => parts.push(s.to_string()),
                None => parts.push(value.to_string()),
            }
        } else if let Some(description) = arg.description.as_ref() {
            parts.push(description.clone());
        }
    }
    parts.join(" ")
}

/// The audit runner
///
/// Owns the shared browser instance for the whole run. Page contexts are
/// created and closed per audited page.
pub struct AuditRunner {
    browser: Browser,
    handle: tokio::task::JoinHandle<()>,
}

impl AuditRunner {
    /// Create a runner with a headless browser
    ///
    /// # Example
    ///
    /// ```no_run
    /// use audit_harness::runner::AuditRunner;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let runner = AuditRunner::new().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new() -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .build()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Self::with_config(config).await
    }

    /// Create a runner with custom browser configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use audit_harness::runner::AuditRunner;
    /// use chromiumoxide::browser::BrowserConfig;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let browser_config = BrowserConfig::builder()
    ///     .with_head()  // Run with visible browser window
    ///     .build()
    ///     .map_err(|e| anyhow::anyhow!(e))?;
    /// let runner = AuditRunner::with_config(browser_config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_config(config: BrowserConfig) -> Result<Self> {
        info!("Launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("Failed to launch browser")?;

        // Drain browser events for the lifetime of the runner
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        info!("Browser launched successfully");
        Ok(Self { browser, handle })
    }

    /// Audit every configured page, strictly in order
    ///
    /// Pages are processed sequentially with the configured pause between
    /// audits. The returned report contains exactly one [`PageResult`] per
    /// configured page, in input order.
    #[instrument(skip(self, config), fields(suite = %config.audit.name))]
    pub async fn run(&self, config: &Config) -> Result<AuditReport> {
        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();

        fs::create_dir_all(&config.audit.screenshot_dir).with_context(|| {
            format!(
                "Failed to create screenshot directory: {}",
                config.audit.screenshot_dir
            )
        })?;

        info!(
            "Starting audit '{}' over {} pages at {}",
            config.audit.name,
            config.pages.len(),
            config.audit.base_url
        );

        let mut pages = Vec::with_capacity(config.pages.len());
        for (i, spec) in config.pages.iter().enumerate() {
            pages.push(self.audit_page(config, spec).await);
            if i + 1 < config.pages.len() {
                tokio::time::sleep(Duration::from_millis(config.audit.pause_between_pages_ms))
                    .await;
            }
        }

        let report = AuditReport::from_pages(
            config.audit.name.clone(),
            config.audit.base_url.clone(),
            started_at,
            start_time.elapsed().as_millis() as u64,
            pages,
        );

        if report.all_accessible() {
            info!(
                "Audit '{}' completed: {}/{} pages accessible, mean rating {:.1}",
                config.audit.name,
                report.pages_accessible,
                report.pages.len(),
                report.avg_rating
            );
        } else {
            warn!(
                "Audit '{}' completed with {} inaccessible pages",
                config.audit.name,
                report.pages.len() - report.pages_accessible
            );
        }

        Ok(report)
    }

    /// Audit a single page in a fresh context
    ///
    /// All failures are caught here and downgraded to a recorded result. The
    /// page context is closed on every exit path.
    #[instrument(skip(self, config, spec), fields(page = %spec.name))]
    pub async fn audit_page(&self, config: &Config, spec: &PageSpec) -> PageResult {
        let url = spec.url(&config.audit.base_url);
        info!("Auditing {} ({})", spec.name, url);

        let page = match self.browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                error!("Failed to create page context: {}", e);
                return PageResult::failed(spec, url, Vec::new(), Vec::new(), 0, e.to_string());
            }
        };

        // Attach before navigating so load-time messages are not missed.
        let capture = match ConsoleCapture::attach(&page).await {
            Ok(capture) => Some(capture),
            Err(e) => {
                warn!("Console capture unavailable for {}: {}", spec.name, e);
                None
            }
        };

        let outcome = self.drive(config, spec, &url, &page).await;

        let (errors, warnings) = match capture {
            Some(capture) => capture.finish().await,
            None => (Vec::new(), Vec::new()),
        };

        if let Err(e) = page.close().await {
            warn!("Failed to close page context for {}: {}", spec.name, e);
        }

        match outcome {
            Ok(snapshot) => {
                let rating = rating::score(&RatingInputs {
                    load_time_ms: snapshot.load_time_ms,
                    error_count: errors.len(),
                    has_images: snapshot.has_images,
                    has_navigation: snapshot.has_navigation,
                    has_headings: snapshot.has_headings,
                });
                info!(
                    "{}: {}/10 ({}ms, {} console errors)",
                    spec.name,
                    rating,
                    snapshot.load_time_ms,
                    errors.len()
                );
                PageResult {
                    name: spec.name.clone(),
                    url,
                    accessible: true,
                    load_time_ms: snapshot.load_time_ms,
                    errors,
                    warnings,
                    screenshot: Some(snapshot.screenshot),
                    rating,
                }
            }
            Err(failure) => {
                warn!("{}: audit failed: {}", spec.name, failure.error);
                PageResult::failed(
                    spec,
                    url,
                    errors,
                    warnings,
                    failure.load_time_ms,
                    failure.error.to_string(),
                )
            }
        }
    }

    /// Navigate, screenshot, and probe the DOM; any error ends the audit
    async fn drive(
        &self,
        config: &Config,
        spec: &PageSpec,
        url: &str,
        page: &Page,
    ) -> std::result::Result<PageSnapshot, PageFailure> {
        let before_nav = |error: AuditError| PageFailure {
            load_time_ms: 0,
            error,
        };

        apply_viewport(page, &config.viewport)
            .await
            .map_err(|e| before_nav(AuditError::Automation(e.to_string())))?;

        let timeout = Duration::from_millis(config.audit.navigation_timeout_ms);
        let started = Instant::now();
        let nav = tokio::time::timeout(timeout, async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        })
        .await;
        match nav {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(before_nav(AuditError::Navigation(e.to_string()))),
            Err(_) => {
                return Err(before_nav(AuditError::Navigation(format!(
                    "navigation timed out after {}ms",
                    config.audit.navigation_timeout_ms
                ))))
            }
        }
        let load_time_ms = started.elapsed().as_millis() as u64;
        let after_nav = move |error: AuditError| PageFailure {
            load_time_ms,
            error,
        };

        if let Ok(Some(title)) = page.get_title().await {
            debug!("{}: title '{}', loaded in {}ms", spec.name, title, load_time_ms);
        }

        let screenshot_path = Path::new(&config.audit.screenshot_dir).join(spec.screenshot_file());
        page.save_screenshot(
            ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .full_page(true)
                .build(),
            &screenshot_path,
        )
        .await
        .map_err(|e| after_nav(AuditError::Automation(e.to_string())))?;
        debug!("Screenshot saved to {}", screenshot_path.display());

        let has_images = eval_bool(page, "document.querySelector('img') !== null")
            .await
            .map_err(after_nav)?;
        let has_navigation = eval_bool(page, "document.querySelector('nav') !== null")
            .await
            .map_err(after_nav)?;
        let has_headings = eval_bool(page, "document.querySelector('h1, h2, h3') !== null")
            .await
            .map_err(after_nav)?;
        debug!(
            "{}: images={}, navigation={}, headings={}",
            spec.name, has_images, has_navigation, has_headings
        );

        Ok(PageSnapshot {
            load_time_ms,
            screenshot: screenshot_path.display().to_string(),
            has_images,
            has_navigation,
            has_headings,
        })
    }

    /// Close the browser
    ///
    /// Call once after the run; per-page contexts are already closed.
    pub async fn close(mut self) -> Result<()> {
        info!("Closing browser");
        self.browser.close().await.context("Failed to close browser")?;
        let _ = self.handle.await;
        Ok(())
    }
}

/// Size the page context to the configured viewport
async fn apply_viewport(page: &Page, viewport: &ViewportConfig) -> Result<()> {
    let params = SetDeviceMetricsOverrideParams::builder()
        .width(i64::from(viewport.width))
        .height(i64::from(viewport.height))
        .device_scale_factor(1.0)
        .mobile(false)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build viewport params: {}", e))?;
    page.execute(params).await?;
    Ok(())
}

/// Evaluate a JS expression that yields a boolean
async fn eval_bool(page: &Page, expression: &str) -> std::result::Result<bool, AuditError> {
    page.evaluate(expression)
        .await
        .map_err(|e| AuditError::Automation(e.to_string()))?
        .into_value::<bool>()
        .map_err(|e| AuditError::Automation(e.to_string()))
}
