//! Gallery configuration.
//!
//! Handles loading and validating `config.toml` from the source directory.
//! All options are optional — the stock defaults below produce a sensible
//! mosaic — and unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! content_width = 1000      # Gallery width in pixels (must be > 0)
//! margin = 4                # Gap between tiles in pixels
//!
//! [scan]
//! extensions = ["jpg", "jpeg", "png", "webp", "tiff"]
//! # max_workers = 4         # Max parallel probes (omit for auto = CPU cores)
//!
//! [render]
//! background = "#0a0a0a"    # Preview page background
//! caption = "#999999"       # Caption/metadata text color
//! ```
//!
//! The layout engine itself does not defend against degenerate widths
//! (see [`crate::layout`]); validation here is the boundary that keeps
//! `content_width <= 0` out of the engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
///
/// User config files need only specify the values they want to override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Layout engine settings (content width, margin).
    pub layout: LayoutConfig,
    /// Source directory scanning settings.
    pub scan: ScanConfig,
    /// Preview rendering settings.
    pub render: RenderConfig,
}

/// Settings handed to the layout engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Gallery width in pixels. Widths above 1000 unlock the denser
    /// wide-layout row shapes.
    pub content_width: i32,
    /// Gap between tiles in pixels.
    pub margin: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            content_width: 1000,
            margin: 4,
        }
    }
}

/// Settings for the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions treated as images (case-insensitive).
    pub extensions: Vec<String>,
    /// Max parallel dimension probes. `None` = one per CPU core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp", "tiff"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_workers: None,
        }
    }
}

/// Settings for the HTML preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Page background color.
    pub background: String,
    /// Caption/metadata text color.
    pub caption: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            caption: "#999999".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Load `config.toml` from `dir`, falling back to stock defaults when
    /// the file doesn't exist. The result is always validated.
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("config.toml");
        let config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.content_width <= 0 {
            return Err(ConfigError::Validation(
                "layout.content_width must be positive".into(),
            ));
        }
        if self.layout.margin < 0 {
            return Err(ConfigError::Validation(
                "layout.margin must not be negative".into(),
            ));
        }
        if self.layout.margin * 2 >= self.layout.content_width {
            return Err(ConfigError::Validation(
                "layout.margin leaves no room for tiles".into(),
            ));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if let Some(0) = self.scan.max_workers {
            return Err(ConfigError::Validation(
                "scan.max_workers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Number of rayon workers for the scan stage: configured value capped at
/// the core count, or one per core when unset.
pub fn effective_workers(scan: &ScanConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    match scan.max_workers {
        Some(n) => n.min(cores),
        None => cores,
    }
}

/// The stock `config.toml`, fully documented — backs `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# tiled-gal configuration
# All options are optional - defaults shown below.

[layout]
# Gallery width in pixels. Must be positive. Widths above 1000 unlock the
# denser wide-layout row shapes (five-across rows).
content_width = 1000
# Gap between tiles in pixels.
margin = 4

[scan]
# File extensions treated as images (case-insensitive).
extensions = ["jpg", "jpeg", "png", "webp", "tiff"]
# Max parallel dimension probes. Omit for auto = one per CPU core.
# max_workers = 4

[render]
# Preview page background color.
background = "#0a0a0a"
# Caption/metadata text color.
caption = "#999999"
"##
}
