//! panelkit
//!
//! A handful of small utilities behind one API: an even slat spacing solver
//! with a proportional sketch, QR code links, and a proxy for a news content
//! API.
//!
//! # Features
//!
//! - **net** (default): blocking HTTP clients for the QR and news upstreams
//! - **server** (default): thin JSON proxy endpoints over `tiny_http`
//!
//! # Example
//!
//! ```
//! use panelkit::layout::{solve_spacing, build_render_plan};
//!
//! let result = solve_spacing(100.0, 4, 10.0).unwrap();
//! assert_eq!(result.message(), "Spacing between slats: 17.50 cm");
//!
//! let plan = build_render_plan(100.0, 5, 10.0, result.gap_width, 1280.0);
//! assert_eq!(plan.slat_count(), 5);
//! ```

use std::env;
use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

// Spacing solver, sketch plan and render targets
pub mod layout;

// Calculator session (inputs, result line, legend)
pub mod calculator;

// Cancellable delayed task for search-as-you-type
pub mod debounce;

pub mod news;
pub mod qrcode;

#[cfg(feature = "server")]
pub mod server;

pub use calculator::{Calculation, SpacingCalculator};
pub use debounce::Debouncer;
pub use layout::{CanvasConfig, LayoutRequest, LayoutResult, RenderPlan};

/// Settings for the news content API
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Search endpoint of the content API
    pub endpoint: String,
    /// API key; requests fail with a config error when absent
    pub api_key: Option<String>,
    /// Comma separated `show-fields` value
    pub show_fields: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://content.guardianapis.com/search".to_string(),
            api_key: None,
            show_fields: "thumbnail,trailText,byline".to_string(),
        }
    }
}

/// Settings for QR image links
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Image generation endpoint
    pub endpoint: String,
    /// Edge length of the square image, in pixels
    pub size: u32,
    /// Prefix used to turn plain text into a search link
    pub search_base_url: String,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            size: 200,
            search_base_url: "https://www.google.com/search?q=".to_string(),
        }
    }
}

/// Top-level configuration
///
/// Defaults are safe to use offline: no API key is set, so news requests
/// fail fast with [`Error::Config`] until one is provided.
///
/// # Examples
///
/// ```
/// let cfg = panelkit::ToolkitConfig::default();
/// assert_eq!(cfg.qr.size, 200);
/// assert!(cfg.news.api_key.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ToolkitConfig {
    /// User agent string sent upstream
    pub user_agent: String,
    /// Timeout for a single upstream request in milliseconds
    pub timeout_ms: u64,
    /// Quiet period before a search edit is sent, in milliseconds
    pub debounce_ms: u64,
    /// Width used to bound the sketch when no window width is known
    pub available_width: f64,
    pub canvas: CanvasConfig,
    pub news: NewsConfig,
    pub qr: QrConfig,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("panelkit/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 10_000,
            debounce_ms: 300,
            available_width: 1280.0,
            canvas: CanvasConfig::default(),
            news: NewsConfig::default(),
            qr: QrConfig::default(),
        }
    }
}

impl ToolkitConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// - `GUARDIAN_API_KEY`: news API key
    /// - `PANELKIT_NEWS_ENDPOINT`: override the news search endpoint
    /// - `PANELKIT_QR_ENDPOINT`: override the QR image endpoint
    /// - `PANELKIT_TIMEOUT_MS`: upstream request timeout
    /// - `PANELKIT_DEBOUNCE_MS`: search debounce period
    /// - `PANELKIT_AVAILABLE_WIDTH`: default available width for sketches
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.news.api_key = env::var("GUARDIAN_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if let Ok(endpoint) = env::var("PANELKIT_NEWS_ENDPOINT") {
            cfg.news.endpoint = endpoint;
        }
        if let Ok(endpoint) = env::var("PANELKIT_QR_ENDPOINT") {
            cfg.qr.endpoint = endpoint;
        }
        if let Some(ms) = env::var("PANELKIT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            cfg.timeout_ms = ms.max(1);
        }
        if let Some(ms) = env::var("PANELKIT_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            cfg.debounce_ms = ms;
        }
        if let Some(w) = env::var("PANELKIT_AVAILABLE_WIDTH")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|w| w.is_finite() && *w > 0.0)
        {
            cfg.available_width = w;
        }
        cfg
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
