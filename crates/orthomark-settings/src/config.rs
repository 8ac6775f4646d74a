//! Configuration and settings management for OrthoMark
//!
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Snapping (endpoint capture radius)
//! - CRS pair of loaded orthophotos
//! - Drawing defaults
//! - Raster export parameters

use std::path::{Path, PathBuf};

use orthomark_core::Crs;
use orthomark_designer::{ExportOptions, SessionOptions, ShapeColor, DEFAULT_SNAP_THRESHOLD};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// File name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Endpoint capture radius in image pixels
    pub threshold_px: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

/// Coordinate reference systems of loaded datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrsSettings {
    /// Projected CRS of the orthophoto, e.g. `EPSG:4548`
    pub source: String,
    /// CRS coordinates are reported in, e.g. `EPSG:4490`
    pub target: String,
}

impl Default for CrsSettings {
    fn default() -> Self {
        Self {
            source: "EPSG:4548".to_string(),
            target: "EPSG:4490".to_string(),
        }
    }
}

/// Drawing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Palette name of the initial line colour
    pub default_color: String,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            default_color: ShapeColor::default().name().to_string(),
        }
    }
}

/// Raster export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub dpi: u32,
    /// Output width in inches
    pub width_in: f64,
    /// Scale bar length in image pixels
    pub scale_bar_length_px: f64,
    /// Scale bar tick spacing in image pixels
    pub scale_bar_tick_px: f64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            dpi: options.dpi,
            width_in: options.width_in,
            scale_bar_length_px: options.scale_bar_length_px,
            scale_bar_tick_px: options.scale_bar_tick_px,
        }
    }
}

impl From<&ExportSettings> for ExportOptions {
    fn from(settings: &ExportSettings) -> Self {
        ExportOptions {
            dpi: settings.dpi,
            width_in: settings.width_in,
            scale_bar_length_px: settings.scale_bar_length_px,
            scale_bar_tick_px: settings.scale_bar_tick_px,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub snap: SnapSettings,
    pub crs: CrsSettings,
    pub drawing: DrawingSettings,
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Platform config file location, e.g. `~/.config/orthomark/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
        path.push("orthomark");
        path.push(CONFIG_FILE_NAME);
        Ok(path)
    }

    /// Load the platform config file, or defaults when it does not exist.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.snap.threshold_px.is_finite() && self.snap.threshold_px > 0.0) {
            return Err(SettingsError::invalid("snap.threshold_px", "must be > 0"));
        }

        Crs::parse(&self.crs.source)
            .map_err(|e| SettingsError::invalid("crs.source", e.to_string()))?;
        Crs::parse(&self.crs.target)
            .map_err(|e| SettingsError::invalid("crs.target", e.to_string()))?;

        if ShapeColor::from_name(&self.drawing.default_color).is_none() {
            return Err(SettingsError::invalid(
                "drawing.default_color",
                format!("unknown colour '{}'", self.drawing.default_color),
            ));
        }

        if self.export.dpi == 0 {
            return Err(SettingsError::invalid("export.dpi", "must be > 0"));
        }
        if !(self.export.width_in > 0.0) {
            return Err(SettingsError::invalid("export.width_in", "must be > 0"));
        }
        if !(self.export.scale_bar_length_px > 0.0) {
            return Err(SettingsError::invalid(
                "export.scale_bar_length_px",
                "must be > 0",
            ));
        }
        if !(self.export.scale_bar_tick_px > 0.0)
            || self.export.scale_bar_tick_px > self.export.scale_bar_length_px
        {
            return Err(SettingsError::invalid(
                "export.scale_bar_tick_px",
                "must be > 0 and no longer than the bar",
            ));
        }

        Ok(())
    }

    /// Session settings derived from this config.
    pub fn session_options(&self) -> SettingsResult<SessionOptions> {
        self.validate()?;
        let source_crs = Crs::parse(&self.crs.source)
            .map_err(|e| SettingsError::invalid("crs.source", e.to_string()))?;
        let target_crs = Crs::parse(&self.crs.target)
            .map_err(|e| SettingsError::invalid("crs.target", e.to_string()))?;
        Ok(SessionOptions {
            snap_threshold: self.snap.threshold_px,
            color: ShapeColor::from_name(&self.drawing.default_color).unwrap_or_default(),
            source_crs,
            target_crs,
            export: ExportOptions::from(&self.export),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.snap.threshold_px, 10.0);
        assert_eq!(config.crs.source, "EPSG:4548");
        assert_eq!(config.drawing.default_color, "blue");
        assert_eq!(config.export.dpi, 300);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        config.snap.threshold_px = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.crs.source = "EPSG:9999".to_string();
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "crs.source"
        ));

        let mut config = Config::default();
        config.drawing.default_color = "purple".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.export.scale_bar_tick_px = 500.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_options() {
        let mut config = Config::default();
        config.drawing.default_color = "红色".to_string();
        let options = config.session_options().unwrap();
        assert_eq!(options.color, ShapeColor::Red);
        assert_eq!(options.source_crs.epsg, 4548);
        assert_eq!(options.target_crs.epsg, 4490);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[snap]\nthreshold_px = 4.5\n").unwrap();
        assert_eq!(config.snap.threshold_px, 4.5);
        assert_eq!(config.export, ExportSettings::default());
    }
}
