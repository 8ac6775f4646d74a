//! Flat exports of a session: rendered PNG overlay, DXF vectors, survey CSV.

mod csv;
mod dxf;
mod raster;

pub use self::csv::{export_survey_csv, write_survey_csv, SURVEY_CSV_HEADER};
pub use self::dxf::{build_drawing, export_dxf, LAYER_DIMENSIONS, LAYER_LABELS, LAYER_LINES, LAYER_POLYGONS};
pub use self::raster::Exporter;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// PNG encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// DXF serialisation failed
    #[error("DXF error: {0}")]
    Dxf(#[from] ::dxf::DxfError),

    /// CSV serialisation failed
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The view rectangle has no area
    #[error("Invalid view bounds")]
    InvalidView,

    /// Requested output raster cannot be allocated
    #[error("Invalid output size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// There was nothing to write
    #[error("Nothing to export: {0}")]
    Empty(&'static str),
}

/// Raster export settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Output resolution.
    pub dpi: u32,
    /// Output width in inches; height follows the view aspect ratio.
    pub width_in: f64,
    /// Scale bar length in source pixels.
    pub scale_bar_length_px: f64,
    /// Scale bar tick spacing in source pixels.
    pub scale_bar_tick_px: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dpi: 300,
            width_in: 10.0,
            scale_bar_length_px: 200.0,
            scale_bar_tick_px: 40.0,
        }
    }
}
