//! Configuration for audit runs
//!
//! This module provides TOML-based configuration for defining which pages to
//! audit, browser viewport dimensions, and output locations. A configuration
//! can also be assembled from the environment for the common case of auditing
//! a locally served site.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that overrides the default base URL.
pub const BASE_URL_ENV: &str = "SITE_URL";

/// Base URL used when `SITE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Audit run configuration
    pub audit: AuditConfig,
    /// Browser viewport dimensions
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Pages to audit, in order
    pub pages: Vec<PageSpec>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - Required fields are missing
    ///
    /// # Example
    ///
    /// ```no_run
    /// use audit_harness::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("audit.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or required fields are missing
    ///
    /// # Example
    ///
    /// ```
    /// use audit_harness::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     [audit]
    ///     name = "Marketing Site"
    ///     base_url = "http://localhost:8090"
    ///
    ///     [[pages]]
    ///     name = "Home"
    ///     path = "/"
    /// "#;
    /// let config = Config::from_str(toml)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Build the default configuration from the environment
    ///
    /// Reads the base URL from `SITE_URL` (falling back to
    /// `http://localhost:8090`) and audits the standard marketing-site page
    /// set: Home, Company, Platform, Industries, Careers, and Contact.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            audit: AuditConfig {
                name: "Marketing Site Audit".to_string(),
                base_url,
                screenshot_dir: default_screenshot_dir(),
                results_path: default_results_path(),
                navigation_timeout_ms: default_navigation_timeout_ms(),
                pause_between_pages_ms: default_pause_between_pages_ms(),
            },
            viewport: ViewportConfig::default(),
            pages: default_pages(),
        }
    }
}

/// Core audit configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Name of the audit run
    pub name: String,
    /// Base URL for the site under audit
    pub base_url: String,
    /// Directory screenshots are written to (default: "screenshots")
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: String,
    /// Path the JSON results artifact is written to (default: "test-results.json")
    #[serde(default = "default_results_path")]
    pub results_path: String,
    /// Navigation timeout in milliseconds (default: 30000)
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
    /// Pause between consecutive page audits in milliseconds (default: 1000)
    #[serde(default = "default_pause_between_pages_ms")]
    pub pause_between_pages_ms: u64,
}

fn default_screenshot_dir() -> String {
    "screenshots".to_string()
}

fn default_results_path() -> String {
    "test-results.json".to_string()
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_pause_between_pages_ms() -> u64 {
    1_000
}

/// Browser viewport dimensions applied to every page context
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Viewport width in CSS pixels (default: 1920)
    #[serde(default = "default_viewport_width")]
    pub width: u32,
    /// Viewport height in CSS pixels (default: 1080)
    #[serde(default = "default_viewport_height")]
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

/// A single page to audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    /// Display name; also determines the screenshot file name
    pub name: String,
    /// Path relative to the base URL, or an absolute URL
    pub path: String,
}

impl PageSpec {
    /// Resolve this page's full URL against a base URL
    pub fn url(&self, base_url: &str) -> String {
        if self.path.starts_with("http://") || self.path.starts_with("https://") {
            return self.path.clone();
        }
        let base = base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }

    /// File name of this page's screenshot
    pub fn screenshot_file(&self) -> String {
        format!("{}.png", self.name.to_lowercase())
    }
}

/// The standard marketing-site page set audited when no config file is given
pub fn default_pages() -> Vec<PageSpec> {
    [
        ("Home", "/"),
        ("Company", "/company/"),
        ("Platform", "/platform/"),
        ("Industries", "/industries/"),
        ("Careers", "/careers/"),
        ("Contact", "/contact/"),
    ]
    .into_iter()
    .map(|(name, path)| PageSpec {
        name: name.to_string(),
        path: path.to_string(),
    })
    .collect()
}
