//! Georeferencing: affine raster transforms, CRS definitions, projection math,
//! DMS formatting and geodesic distance.

pub mod affine;
pub mod crs;
pub mod dms;
pub mod ellipsoid;
pub mod geodesic;
pub mod projection;

pub use affine::AffineTransform;
pub use crs::{Crs, CrsKind, TransverseMercator};
pub use dms::{to_dms, Dms, Hemisphere};
pub use ellipsoid::Ellipsoid;
pub use geodesic::{geodesic_distance, haversine_distance, vincenty_distance};
pub use projection::{from_geographic, reproject, to_geographic};
