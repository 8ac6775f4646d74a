//! OrthoMark Settings Crate
//!
//! Handles application configuration: snapping, CRS pair, drawing defaults and
//! export parameters, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, CrsSettings, DrawingSettings, ExportSettings, SnapSettings};
pub use error::{SettingsError, SettingsResult};
