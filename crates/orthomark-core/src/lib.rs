//! # OrthoMark Core
//!
//! Geometry and georeferencing foundation for the annotation engine.
//!
//! - [`types`]: pixel-space points, shape ids, view bounds
//! - [`geo`]: affine transforms, CRS catalogue, projections, DMS, geodesics
//! - [`transformer`]: the pixel → projected → geographic → DMS pipeline
//! - [`elevation`]: altitude collaborators and the DSM/DOM fallback chain
//! - [`error`]: the shared error taxonomy

pub mod elevation;
pub mod error;
pub mod geo;
pub mod transformer;
pub mod types;

pub use elevation::{resolve_altitude, Altitude, AltitudeSource, ElevationSource, GridElevation};
pub use error::{Error, Result, TransformError};
pub use geo::{to_dms, AffineTransform, Crs, Dms};
pub use transformer::{CoordinateReading, CoordinateTransformer, GeoPoint};
pub use types::{Bounds, Point, ShapeId};
