//! Elevation collaborators.
//!
//! Sources follow the raster readers' convention of answering `0.0` for any
//! failure or out-of-range query. [`resolve_altitude`] applies the DSM-then-DOM
//! fallback and records which source answered, so a missing value is explicit
//! in the result instead of hiding behind the sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Value returned by an elevation source that has no answer.
pub const NO_DATA: f64 = 0.0;

/// Something that can answer "what is the altitude at this pixel".
pub trait ElevationSource {
    /// Altitude at `(col, row)`, or [`NO_DATA`] on any failure.
    fn altitude_at(&self, col: f64, row: f64) -> f64;
}

impl<F> ElevationSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn altitude_at(&self, col: f64, row: f64) -> f64 {
        self(col, row)
    }
}

/// An in-memory single-band elevation raster indexed by pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct GridElevation {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl GridElevation {
    /// Returns `None` when `values` does not hold `width * height` cells.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Option<Self> {
        if width.checked_mul(height)? != values.len() {
            return None;
        }
        Some(Self {
            width,
            height,
            values,
        })
    }

    /// A grid with the same value everywhere.
    pub fn constant(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl ElevationSource for GridElevation {
    fn altitude_at(&self, col: f64, row: f64) -> f64 {
        let c = col.round();
        let r = row.round();
        if !c.is_finite() || !r.is_finite() || c < 0.0 || r < 0.0 {
            return NO_DATA;
        }
        let (c, r) = (c as usize, r as usize);
        if c >= self.width || r >= self.height {
            return NO_DATA;
        }
        let v = self.values[r * self.width + c];
        if v.is_finite() {
            v
        } else {
            NO_DATA
        }
    }
}

/// Which collaborator supplied an altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltitudeSource {
    Dsm,
    Dom,
    Unavailable,
}

/// An altitude together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Altitude {
    pub value: f64,
    pub source: AltitudeSource,
}

impl Altitude {
    pub fn unavailable() -> Self {
        Self {
            value: NO_DATA,
            source: AltitudeSource::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.source != AltitudeSource::Unavailable
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.value)
    }
}

/// Query the surface model first and the orthophoto dataset second.
///
/// A source answering exactly [`NO_DATA`] counts as "no answer". When neither
/// answers, the altitude is `0.0` marked [`AltitudeSource::Unavailable`].
pub fn resolve_altitude(
    dsm: Option<&dyn ElevationSource>,
    dom: Option<&dyn ElevationSource>,
    col: f64,
    row: f64,
) -> Altitude {
    if let Some(src) = dsm {
        let value = src.altitude_at(col, row);
        if value != NO_DATA {
            return Altitude {
                value,
                source: AltitudeSource::Dsm,
            };
        }
        debug!("DSM has no altitude at ({}, {}), trying DOM", col, row);
    }
    if let Some(src) = dom {
        let value = src.altitude_at(col, row);
        if value != NO_DATA {
            return Altitude {
                value,
                source: AltitudeSource::Dom,
            };
        }
    }
    debug!("No altitude available at ({}, {})", col, row);
    Altitude::unavailable()
}
