//! Configuration for SlabKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Editor tunables (history depth, snapping, dimensions, nudging)
//! - Overlay image handling (downscale limit, JPEG quality, slab size)
//! - Autosave (debounce, size warning, location)

use serde::{Deserialize, Serialize};
use slabkit_designer::history::HISTORY_MAX;
use slabkit_designer::model::{DEFAULT_DIMENSION_OFFSET_PX, DEFAULT_SLAB_HEIGHT, DEFAULT_SLAB_WIDTH};
use slabkit_designer::EditorOptions;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Number of undo steps kept
    pub history_depth: usize,
    /// Dimension snap radius in inches
    pub snap_radius: f64,
    /// Largest dimension offset from its segment, in pixels
    pub max_dimension_offset: f64,
    /// Offset given to newly placed dimensions, in pixels
    pub default_dimension_offset: f64,
    /// Arrow-key step multiplier while shift is held
    pub nudge_multiplier: f64,
    /// Pointer travel (pixels) below which a blank-canvas press is a click
    pub click_threshold_px: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        let options = EditorOptions::default();
        Self {
            history_depth: HISTORY_MAX,
            snap_radius: options.snap_radius,
            max_dimension_offset: options.max_dimension_offset,
            default_dimension_offset: DEFAULT_DIMENSION_OFFSET_PX,
            nudge_multiplier: options.nudge_multiplier,
            click_threshold_px: options.click_threshold_px,
        }
    }
}

/// Overlay image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Longest edge of a stored overlay image, in pixels
    pub max_dimension: u32,
    /// JPEG quality (1-100) used when re-encoding large photos
    pub jpeg_quality: u8,
    /// Slab width given to new overlays, inches
    pub default_slab_width: f64,
    /// Slab height given to new overlays, inches
    pub default_slab_height: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        let options = EditorOptions::default();
        Self {
            max_dimension: options.overlay_max_dimension,
            jpeg_quality: options.overlay_jpeg_quality,
            default_slab_width: DEFAULT_SLAB_WIDTH,
            default_slab_height: DEFAULT_SLAB_HEIGHT,
        }
    }
}

/// Autosave settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    pub enabled: bool,
    /// Quiet period after the last edit before saving
    pub debounce_ms: u64,
    /// Payload size above which a warning is logged
    pub warn_bytes: u64,
    /// Autosave file; the platform data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 400,
            warn_bytes: 4_500_000,
            path: None,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub overlay: OverlaySettings,
    pub autosave: AutosaveSettings,
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load config, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let editor = &self.editor;
        if editor.history_depth == 0 {
            return Err(ConfigError::out_of_range("editor.history_depth", editor.history_depth));
        }
        if !positive(editor.snap_radius) {
            return Err(ConfigError::out_of_range("editor.snap_radius", editor.snap_radius));
        }
        if !positive(editor.max_dimension_offset) {
            return Err(ConfigError::out_of_range(
                "editor.max_dimension_offset",
                editor.max_dimension_offset,
            ));
        }
        if !(editor.default_dimension_offset.is_finite()
            && editor.default_dimension_offset.abs() <= editor.max_dimension_offset) {
            return Err(ConfigError::out_of_range(
                "editor.default_dimension_offset",
                editor.default_dimension_offset,
            ));
        }
        if !positive(editor.nudge_multiplier) {
            return Err(ConfigError::out_of_range(
                "editor.nudge_multiplier",
                editor.nudge_multiplier,
            ));
        }
        if !(editor.click_threshold_px.is_finite() && editor.click_threshold_px >= 0.0) {
            return Err(ConfigError::out_of_range(
                "editor.click_threshold_px",
                editor.click_threshold_px,
            ));
        }

        let overlay = &self.overlay;
        if overlay.max_dimension == 0 {
            return Err(ConfigError::out_of_range("overlay.max_dimension", 0));
        }
        if overlay.jpeg_quality == 0 || overlay.jpeg_quality > 100 {
            return Err(ConfigError::out_of_range("overlay.jpeg_quality", overlay.jpeg_quality));
        }
        if !positive(overlay.default_slab_width) || !positive(overlay.default_slab_height) {
            return Err(ConfigError::out_of_range(
                "overlay.default_slab",
                format!("{}x{}", overlay.default_slab_width, overlay.default_slab_height),
            ));
        }

        if self.autosave.debounce_ms == 0 {
            return Err(ConfigError::out_of_range("autosave.debounce_ms", 0));
        }
        if self.autosave.warn_bytes == 0 {
            return Err(ConfigError::out_of_range("autosave.warn_bytes", 0));
        }

        Ok(())
    }

    /// Editor tunables for [`slabkit_designer::Editor::with_options`]
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            history_depth: self.editor.history_depth,
            snap_radius: self.editor.snap_radius,
            max_dimension_offset: self.editor.max_dimension_offset,
            default_dimension_offset: self.editor.default_dimension_offset,
            nudge_multiplier: self.editor.nudge_multiplier,
            click_threshold_px: self.editor.click_threshold_px,
            overlay_max_dimension: self.overlay.max_dimension,
            overlay_jpeg_quality: self.overlay.jpeg_quality,
            default_slab_width: self.overlay.default_slab_width,
            default_slab_height: self.overlay.default_slab_height,
        }
    }
}

/// `<config dir>/slabkit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no config directory on this platform".to_string())
    })?;
    Ok(dir.join("slabkit").join("config.toml"))
}
