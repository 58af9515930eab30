// Configuration module for the dashboard shell
// Read-only: the file is loaded and validated, never written back

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod shell_config;

pub use shell_config::*;

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "CHART_SHELL_CONFIG";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "chart_shell.toml";

/// Upper bound for the observer quiet window
const MAX_QUIET_WINDOW_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
    config: ShellConfig,
    loaded: bool,
}

impl ConfigManager {
    /// Create configuration manager with default path
    pub fn new() -> Self {
        Self::with_path(DEFAULT_CONFIG_FILE)
    }

    /// Create configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            config: ShellConfig::default(),
            loaded: false,
        }
    }

    /// Use `CHART_SHELL_CONFIG` when set, the default path otherwise
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::with_path(path),
            _ => Self::new(),
        }
    }

    /// Load and validate the configuration file
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound(self.config_path.display().to_string())
            } else {
                ConfigError::Io(e)
            }
        })?;
        self.config = parse_config(&content)?;
        self.loaded = true;
        log::info!("Loaded configuration from {}", self.config_path.display());
        Ok(())
    }

    /// Load with fallback to defaults if the file is missing or invalid
    pub fn load_or_default(&mut self) -> &Self {
        if let Err(e) = self.load() {
            log::warn!("Failed to load config, using defaults: {}", e);
            self.config = ShellConfig::default();
            self.loaded = true;
        }
        self
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Configuration file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Check if configuration is loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and validate a TOML document
pub fn parse_config(content: &str) -> Result<ShellConfig, ConfigError> {
    let config: ShellConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Validate value ranges that serde cannot express
pub fn validate(config: &ShellConfig) -> Result<(), ConfigError> {
    let window = &config.window;
    if !(window.width.is_finite() && window.width > 0.0 && window.height.is_finite() && window.height > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "window size must be positive, got {}x{}",
            window.width, window.height
        )));
    }

    let layout = &config.layout;
    for (name, value) in [
        ("toolbar_width", layout.toolbar_width),
        ("watchlist_width", layout.watchlist_width),
        ("header_height", layout.header_height),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "layout.{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }

    if config.observer.quiet_window_ms > MAX_QUIET_WINDOW_MS {
        return Err(ConfigError::Invalid(format!(
            "observer.quiet_window_ms must not exceed {}, got {}",
            MAX_QUIET_WINDOW_MS, config.observer.quiet_window_ms
        )));
    }

    if config.logging.level.parse::<log::LevelFilter>().is_err() {
        return Err(ConfigError::Invalid(format!(
            "Unknown log level '{}'",
            config.logging.level
        )));
    }

    Ok(())
}
