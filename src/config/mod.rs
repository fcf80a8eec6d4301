//! Configuration file support for classboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/classboard/config.toml`. Settings include tool defaults,
//! surface size, history limits, export options and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, DrawingConfig, ExportConfig, HistoryConfig};

use crate::input::{MAX_FONT_SIZE, MAX_SIZE, MIN_FONT_SIZE, MIN_SIZE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted surface edge in pixels.
const MAX_CANVAS_EDGE: i32 = 8192;

/// Main configuration structure containing all user settings.
///
/// All fields have defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#1f6feb"
/// default_size = 4.0
/// default_brush = "square"
/// default_font_size = 24.0
///
/// [canvas]
/// width = 1280
/// height = 720
/// background_color = "white"
///
/// [history]
/// max_snapshots = 30
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool defaults (color, size, brush, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Surface dimensions and board color
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Undo history limits
    #[serde(default)]
    pub history: HistoryConfig,

    /// PNG export options
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_size`: 1.0 - 100.0
    /// - `default_font_size`: 8.0 - 72.0
    /// - `canvas.width` / `canvas.height`: 1 - 8192
    /// - `history.max_snapshots`: 0 (unlimited) or at least 2
    /// - `export.filename_template`: only known chrono specifiers
    pub fn validate_and_clamp(&mut self) {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.drawing.default_size) {
            warn!(
                "Invalid default_size {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_size, MIN_SIZE, MAX_SIZE
            );
            self.drawing.default_size = self.drawing.default_size.clamp(MIN_SIZE, MAX_SIZE);
        }

        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.drawing.default_font_size) {
            warn!(
                "Invalid default_font_size {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
            );
            self.drawing.default_font_size = self
                .drawing
                .default_font_size
                .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }

        if !(1..=MAX_CANVAS_EDGE).contains(&self.canvas.width) {
            warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width, MAX_CANVAS_EDGE
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_EDGE);
        }

        if !(1..=MAX_CANVAS_EDGE).contains(&self.canvas.height) {
            warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height, MAX_CANVAS_EDGE
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_EDGE);
        }

        if self.history.max_snapshots == 1 {
            warn!("history.max_snapshots = 1 leaves nothing to undo, raising to 2");
            self.history.max_snapshots = 2;
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !crate::export::is_valid_filename_template(&self.export.filename_template) {
            let fallback = ExportConfig::default().filename_template;
            warn!(
                "Invalid export filename_template '{}', falling back to '{}'",
                self.export.filename_template, fallback
            );
            self.export.filename_template = fallback;
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/classboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("classboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
