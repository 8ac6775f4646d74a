//! Error handling for OrthoMark
//!
//! Provides the error taxonomy shared by every layer of the annotation engine:
//! - Transform errors (affine inversion, CRS reprojection)
//! - Degenerate shape errors (polygons with too few vertices)
//! - Missing dataset errors (tool actions without a loaded raster)
//!
//! None of these are fatal to an annotation session. The session layer turns
//! them into notices or fallback values.

use thiserror::Error;

/// Coordinate transform error type
///
/// Raised by affine inversion and CRS reprojection. Callers that materialise
/// coordinate labels recover from it by displaying raw pixel coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The CRS code is not one the projection engine understands
    #[error("Unsupported CRS: {code}")]
    UnsupportedCrs {
        /// The CRS identifier as given by the caller.
        code: String,
    },

    /// The affine transform has a zero determinant
    #[error("Singular affine transform (determinant is zero)")]
    SingularAffine,

    /// The coordinate lies outside the valid domain of the projection
    #[error("Coordinate ({x}, {y}) outside the domain of {crs}")]
    OutOfDomain {
        /// X (or longitude) of the rejected coordinate.
        x: f64,
        /// Y (or latitude) of the rejected coordinate.
        y: f64,
        /// The CRS whose domain was violated.
        crs: String,
    },

    /// The projection produced NaN or infinite output
    #[error("Projection produced a non-finite result")]
    NonFinite,
}

/// Main error type for OrthoMark
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Coordinate transform error
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// A polygon was committed with fewer than three vertices
    #[error("Degenerate shape: polygon needs at least 3 vertices, got {vertices}")]
    DegenerateShape {
        /// Number of vertices that were supplied.
        vertices: usize,
    },

    /// A tool action needs a loaded dataset and none is active
    #[error("No dataset loaded")]
    NoDataset,
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
