//! Pixel to geographic coordinate pipeline.
//!
//! `pixel -> projected (affine) -> geographic (reprojection) -> DMS text`.
//! The transformer is immutable once built and every call is a pure function of
//! its inputs, so it can be shared freely by the tools of a session.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::TransformError;
use crate::geo::{self, AffineTransform, Crs, Dms, Ellipsoid};
use crate::types::Point;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn lon_dms(&self) -> Dms {
        Dms::from_decimal(self.lon, false)
    }

    pub fn lat_dms(&self) -> Dms {
        Dms::from_decimal(self.lat, true)
    }
}

/// Result of reading a pixel position through the transform pipeline.
///
/// Reprojection failures never escape to the caller; they degrade to
/// [`CoordinateReading::RawPixel`].
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateReading {
    Geographic {
        geo: GeoPoint,
        lon: Dms,
        lat: Dms,
    },
    RawPixel {
        x: f64,
        y: f64,
    },
}

impl CoordinateReading {
    /// Two-line label text: longitude over latitude, or raw pixel values.
    pub fn label_text(&self) -> String {
        match self {
            CoordinateReading::Geographic { lon, lat, .. } => format!("{}\n{}", lon, lat),
            CoordinateReading::RawPixel { x, y } => format!("X: {:.4}\nY: {:.4}", x, y),
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, CoordinateReading::Geographic { .. })
    }
}

/// Apply `transform` to a pixel position. No rounding.
pub fn pixel_to_geo(col: f64, row: f64, transform: &AffineTransform) -> (f64, f64) {
    transform.apply(col, row)
}

/// Affine transform plus the CRS pair of the loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTransformer {
    affine: AffineTransform,
    source: Crs,
    target: Crs,
}

impl CoordinateTransformer {
    pub fn new(affine: AffineTransform, source: Crs, target: Crs) -> Self {
        Self {
            affine,
            source,
            target,
        }
    }

    /// Build from CRS identifiers such as `"EPSG:4548"`.
    pub fn from_codes(
        affine: AffineTransform,
        source: &str,
        target: &str,
    ) -> Result<Self, TransformError> {
        Ok(Self::new(affine, Crs::parse(source)?, Crs::parse(target)?))
    }

    pub fn affine(&self) -> &AffineTransform {
        &self.affine
    }

    pub fn source(&self) -> &Crs {
        &self.source
    }

    pub fn target(&self) -> &Crs {
        &self.target
    }

    /// Ground size of one pixel in source CRS units.
    pub fn pixel_size(&self) -> (f64, f64) {
        self.affine.pixel_size()
    }

    /// Pixel to projected coordinates in the source CRS.
    pub fn pixel_to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        pixel_to_geo(col, row, &self.affine)
    }

    /// Reproject source-CRS coordinates into the target CRS.
    pub fn reproject(&self, x: f64, y: f64) -> Result<(f64, f64), TransformError> {
        geo::reproject(x, y, &self.source, &self.target)
    }

    /// Inverse of [`pixel_to_geo`](Self::pixel_to_geo).
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> Result<(f64, f64), TransformError> {
        Ok(self.affine.inverse()?.apply(x, y))
    }

    /// Full pipeline to geographic degrees.
    ///
    /// When the target CRS is projected, the result is expressed on the
    /// geographic base of the source ellipsoid instead.
    pub fn pixel_to_lonlat(&self, p: Point) -> Result<GeoPoint, TransformError> {
        let (x, y) = self.pixel_to_geo(p.x, p.y);
        let (lon, lat) = if self.target.is_geographic() {
            self.reproject(x, y)?
        } else {
            geo::to_geographic(x, y, &self.source)?
        };
        Ok(GeoPoint::new(lon, lat))
    }

    /// Read a pixel position as DMS text, falling back to raw pixel values.
    pub fn read(&self, p: Point) -> CoordinateReading {
        match self.pixel_to_lonlat(p) {
            Ok(geo) => CoordinateReading::Geographic {
                geo,
                lon: geo.lon_dms(),
                lat: geo.lat_dms(),
            },
            Err(e) => {
                warn!("Coordinate transform failed at {}: {}", p, e);
                CoordinateReading::RawPixel { x: p.x, y: p.y }
            }
        }
    }

    /// Ellipsoidal ground distance in meters between two pixel positions.
    pub fn ground_distance(&self, a: Point, b: Point) -> Result<f64, TransformError> {
        let ga = self.pixel_to_lonlat(a)?;
        let gb = self.pixel_to_lonlat(b)?;
        Ok(geo::geodesic_distance(
            &Ellipsoid::WGS84,
            ga.lon,
            ga.lat,
            gb.lon,
            gb.lat,
        ))
    }
}
