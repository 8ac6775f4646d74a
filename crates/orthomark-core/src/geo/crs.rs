//! Coordinate reference system catalogue.
//!
//! Only the systems an orthophoto survey in mainland China realistically meets are
//! known here: CGCS2000 geographic and Gauss-Krüger zones, WGS84 geographic and UTM,
//! and Web Mercator. Everything else is rejected with
//! [`TransformError::UnsupportedCrs`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ellipsoid::Ellipsoid;
use crate::error::TransformError;

/// Parameters of a transverse Mercator (Gauss-Krüger / UTM) projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransverseMercator {
    /// Central meridian in degrees.
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

/// Projection kind carried by a [`Crs`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CrsKind {
    /// Longitude / latitude in decimal degrees.
    Geographic,
    TransverseMercator(TransverseMercator),
    /// Spherical Web Mercator (EPSG:3857).
    WebMercator,
}

/// A resolved coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    pub epsg: u32,
    pub ellipsoid: Ellipsoid,
    pub kind: CrsKind,
}

impl Crs {
    /// CGCS2000 geographic (EPSG:4490).
    pub const CGCS2000: Crs = Crs {
        epsg: 4490,
        ellipsoid: Ellipsoid::CGCS2000,
        kind: CrsKind::Geographic,
    };

    /// WGS84 geographic (EPSG:4326).
    pub const WGS84: Crs = Crs {
        epsg: 4326,
        ellipsoid: Ellipsoid::WGS84,
        kind: CrsKind::Geographic,
    };

    /// Resolve an EPSG code.
    pub fn from_epsg(code: u32) -> Result<Crs, TransformError> {
        let crs = match code {
            4490 => Self::CGCS2000,
            4326 => Self::WGS84,
            3857 => Crs {
                epsg: code,
                ellipsoid: Ellipsoid::SPHERE_WEB,
                kind: CrsKind::WebMercator,
            },
            // CGCS2000 3-degree Gauss-Krüger, zone number prefixed to the easting
            4513..=4533 => {
                let zone = (code - 4513 + 25) as f64;
                Self::gauss_kruger(code, zone * 3.0, zone * 1_000_000.0 + 500_000.0)
            }
            // CGCS2000 3-degree Gauss-Krüger, central meridian variants
            4534..=4554 => {
                let zone = (code - 4534 + 25) as f64;
                Self::gauss_kruger(code, zone * 3.0, 500_000.0)
            }
            // CGCS2000 6-degree Gauss-Krüger, zone number prefixed to the easting
            4491..=4501 => {
                let zone = (code - 4491 + 13) as f64;
                Self::gauss_kruger(code, zone * 6.0 - 3.0, zone * 1_000_000.0 + 500_000.0)
            }
            // CGCS2000 6-degree Gauss-Krüger, central meridian variants
            4502..=4512 => {
                let zone = (code - 4502 + 13) as f64;
                Self::gauss_kruger(code, zone * 6.0 - 3.0, 500_000.0)
            }
            32601..=32660 => Self::utm(code, code - 32600, false),
            32701..=32760 => Self::utm(code, code - 32700, true),
            _ => {
                return Err(TransformError::UnsupportedCrs {
                    code: format!("EPSG:{}", code),
                })
            }
        };
        Ok(crs)
    }

    /// Parse `"EPSG:4548"`, `"epsg:4548"` or a bare `"4548"`.
    pub fn parse(s: &str) -> Result<Crs, TransformError> {
        let trimmed = s.trim();
        let digits = match trimmed.split_once(':') {
            Some((authority, rest)) if authority.eq_ignore_ascii_case("EPSG") => rest,
            Some(_) => {
                return Err(TransformError::UnsupportedCrs {
                    code: trimmed.to_string(),
                })
            }
            None => trimmed,
        };
        let code: u32 = digits
            .trim()
            .parse()
            .map_err(|_| TransformError::UnsupportedCrs {
                code: trimmed.to_string(),
            })?;
        Self::from_epsg(code)
    }

    fn gauss_kruger(epsg: u32, central_meridian: f64, false_easting: f64) -> Crs {
        Crs {
            epsg,
            ellipsoid: Ellipsoid::CGCS2000,
            kind: CrsKind::TransverseMercator(TransverseMercator {
                central_meridian,
                scale_factor: 1.0,
                false_easting,
                false_northing: 0.0,
            }),
        }
    }

    fn utm(epsg: u32, zone: u32, south: bool) -> Crs {
        Crs {
            epsg,
            ellipsoid: Ellipsoid::WGS84,
            kind: CrsKind::TransverseMercator(TransverseMercator {
                central_meridian: zone as f64 * 6.0 - 183.0,
                scale_factor: 0.9996,
                false_easting: 500_000.0,
                false_northing: if south { 10_000_000.0 } else { 0.0 },
            }),
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self.kind, CrsKind::Geographic)
    }

    /// The geographic CRS on the same ellipsoid.
    pub fn geographic_base(&self) -> Crs {
        if self.ellipsoid == Ellipsoid::WGS84 || self.ellipsoid == Ellipsoid::SPHERE_WEB {
            Self::WGS84
        } else {
            Self::CGCS2000
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

impl FromStr for Crs {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Crs::parse(s)
    }
}
