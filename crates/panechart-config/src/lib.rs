//! Configuration for the panechart engine.
//!
//! Loads layout and scaling policy from TOML files. Everything has a
//! default, so hosts can run without any file present.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub scale: ScaleConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./panechart.toml`
    /// 2. `~/.config/panechart/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load("panechart.toml") {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("panechart").join("config.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("panechart.toml")
    }
}

/// Pane layout policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fraction of total height given to the main pane when sub-panes
    /// exist. Sub-panes split the remainder evenly.
    pub main_pane_ratio: f32,
    /// Viewport dimension (either axis) below which panes are not built.
    pub min_viewport: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            main_pane_ratio: 0.6,
            min_viewport: 40.0,
        }
    }
}

impl LayoutConfig {
    /// The main pane ratio clamped to a usable band. A configured value
    /// outside `[0.1, 0.9]` would starve either the price pane or the
    /// sub-panes.
    pub fn main_ratio_clamped(&self) -> f32 {
        self.main_pane_ratio.clamp(0.1, 0.9)
    }
}

/// Price axis scaling policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Padding added above and below the visible price span, as a fraction
    /// of that span.
    pub price_padding: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            price_padding: 0.08,
        }
    }
}
