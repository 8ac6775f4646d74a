use orthomark_core::{AffineTransform, CoordinateTransformer, Crs, Point, TransformError};

fn transformer() -> CoordinateTransformer {
    let affine = AffineTransform::north_up(512_345.0, 3_456_789.0, 0.1, 0.1);
    CoordinateTransformer::new(
        affine,
        Crs::parse("EPSG:4548").unwrap(),
        Crs::parse("EPSG:4490").unwrap(),
    )
}

#[test]
fn test_pixel_to_geo_is_exact_affine() {
    let t = transformer();
    let (x, y) = t.pixel_to_geo(10.0, 20.0);
    assert!((x - 512_346.0).abs() < 1e-9);
    assert!((y - 3_456_787.0).abs() < 1e-9);
}

#[test]
fn test_lonlat_east_of_central_meridian() {
    let t = transformer();
    let geo = t.pixel_to_lonlat(Point::new(0.0, 0.0)).unwrap();
    assert!(geo.lon > 117.0 && geo.lon < 117.2, "lon {}", geo.lon);
    assert!(geo.lat > 31.0 && geo.lat < 31.5, "lat {}", geo.lat);
}

/// Identical input yields identical output
#[test]
fn test_reproject_is_referentially_transparent() {
    let t = transformer();
    let a = t.reproject(512_000.0, 3_450_000.0).unwrap();
    let b = t.reproject(512_000.0, 3_450_000.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_unsupported_crs_is_reported() {
    let err = CoordinateTransformer::from_codes(AffineTransform::identity(), "EPSG:2000", "EPSG:4490")
        .unwrap_err();
    assert_eq!(
        err,
        TransformError::UnsupportedCrs {
            code: "EPSG:2000".to_string()
        }
    );
}

/// Reprojection failure degrades to a raw-pixel label instead of an error
#[test]
fn test_label_fallback_never_fails() {
    let affine = AffineTransform::new(f64::NAN, 0.0, 0.0, 0.0, 1.0, 0.0);
    let t = CoordinateTransformer::new(affine, Crs::from_epsg(4548).unwrap(), Crs::CGCS2000);
    let reading = t.read(Point::new(3.0, 4.0));
    assert!(!reading.is_geographic());
    assert_eq!(reading.label_text(), "X: 3.0000\nY: 4.0000");
}
