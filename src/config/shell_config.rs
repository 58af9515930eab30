// Shell configuration structures
// Every section falls back to its defaults when omitted from the file

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{ObserverConfig, DEFAULT_QUIET_WINDOW_MS};
use crate::shell::LayoutMetrics;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub observer: ObserverSection,
    pub logging: LoggingConfig,
    pub header: HeaderConfig,
}

/// Native window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

/// Fixed panel sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub toolbar_width: f32,
    pub watchlist_width: f32,
    pub header_height: f32,
}

/// Stable-dimension observer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverSection {
    pub quiet_window_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Symbol header shown above the chart area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub symbol: String,
    pub exchange: String,
    pub last_price: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Chart Shell".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let metrics = LayoutMetrics::default();
        Self {
            toolbar_width: metrics.toolbar_width,
            watchlist_width: metrics.watchlist_width,
            header_height: metrics.header_height,
        }
    }
}

impl Default for ObserverSection {
    fn default() -> Self {
        Self {
            quiet_window_ms: DEFAULT_QUIET_WINDOW_MS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC/USD".to_string(),
            exchange: "BINANCE".to_string(),
            last_price: "64,231.50".to_string(),
        }
    }
}

impl ShellConfig {
    /// Observer settings derived from the `[observer]` section
    pub fn observer_config(&self) -> ObserverConfig {
        ObserverConfig::with_quiet_window(Duration::from_millis(self.observer.quiet_window_ms))
    }

    /// Panel metrics derived from the `[layout]` section
    pub fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            toolbar_width: self.layout.toolbar_width,
            watchlist_width: self.layout.watchlist_width,
            header_height: self.layout.header_height,
        }
    }
}
