//! Affine georeferencing transform for rasters.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Six-coefficient affine mapping from pixel (col, row) to projected (x, y):
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
///
/// GDAL orders the same coefficients as `[c, a, b, f, d, e]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Identity mapping; pixel coordinates are used as projected coordinates.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    /// North-up transform with square-ish pixels and an upper-left origin.
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self::new(pixel_width, 0.0, origin_x, 0.0, -pixel_height.abs(), origin_y)
    }

    /// Create from a GDAL-style geotransform array `[c, a, b, f, d, e]`.
    pub fn from_gdal(gt: &[f64; 6]) -> Self {
        Self {
            a: gt[1],
            b: gt[2],
            c: gt[0],
            d: gt[4],
            e: gt[5],
            f: gt[3],
        }
    }

    /// Convert to a GDAL-style geotransform array `[c, a, b, f, d, e]`.
    pub fn to_gdal(&self) -> [f64; 6] {
        [self.c, self.a, self.b, self.f, self.d, self.e]
    }

    /// Apply the forward transform: (col, row) -> (x, y). No rounding.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let x = self.a * col + self.b * row + self.c;
        let y = self.d * col + self.e * row + self.f;
        (x, y)
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Compute the inverse transform, mapping projected (x, y) back to (col, row).
    pub fn inverse(&self) -> Result<AffineTransform, TransformError> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON {
            return Err(TransformError::SingularAffine);
        }
        let inv_det = 1.0 / det;
        Ok(AffineTransform {
            a: self.e * inv_det,
            b: -self.b * inv_det,
            c: (self.b * self.f - self.e * self.c) * inv_det,
            d: -self.d * inv_det,
            e: self.a * inv_det,
            f: (self.d * self.c - self.a * self.f) * inv_det,
        })
    }

    /// Ground size of one pixel along each axis, `(|a|, |e|)`.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.a.abs(), self.e.abs())
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_identity() {
        let aff = AffineTransform::identity();
        assert_eq!(aff.apply(5.0, 10.0), (5.0, 10.0));
    }

    #[test]
    fn test_apply_with_offset_and_scale() {
        // 0.05 m resolution, top-left at (500_000, 3_900_000), north-up
        let aff = AffineTransform::north_up(500_000.0, 3_900_000.0, 0.05, 0.05);
        assert_eq!(aff.apply(0.0, 0.0), (500_000.0, 3_900_000.0));

        let (x, y) = aff.apply(100.0, 100.0);
        assert!((x - 500_005.0).abs() < 1e-9);
        assert!((y - 3_899_995.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let aff = AffineTransform::new(0.1, 0.02, 400_000.0, -0.01, -0.1, 3_800_000.0);
        let inv = aff.inverse().unwrap();
        let (x, y) = aff.apply(1234.5, 678.25);
        let (col, row) = inv.apply(x, y);
        assert!((col - 1234.5).abs() < 1e-6);
        assert!((row - 678.25).abs() < 1e-6);
    }

    #[test]
    fn test_singular_affine() {
        let aff = AffineTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(aff.inverse(), Err(TransformError::SingularAffine));
    }

    #[test]
    fn test_gdal_order() {
        let gt = [500_000.0, 2.0, 0.0, 6_000_000.0, 0.0, -2.0];
        let aff = AffineTransform::from_gdal(&gt);
        assert_eq!(aff.a, 2.0);
        assert_eq!(aff.e, -2.0);
        assert_eq!(aff.to_gdal(), gt);
        assert_eq!(aff.pixel_size(), (2.0, 2.0));
    }
}
