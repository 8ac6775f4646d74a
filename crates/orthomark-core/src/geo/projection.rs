//! Forward and inverse map projections.
//!
//! Transverse Mercator uses the series expansions from Snyder, *Map Projections:
//! A Working Manual* (USGS 1395), which stay sub-millimetre within a 3-degree or
//! 6-degree zone. Reprojection always passes through geographic coordinates on the
//! source ellipsoid; no datum shift is applied between CGCS2000 and WGS84.

use std::f64::consts::FRAC_PI_4;

use super::crs::{Crs, CrsKind, TransverseMercator};
use super::ellipsoid::Ellipsoid;
use crate::error::TransformError;

/// Latitude limit of spherical Web Mercator.
const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Beyond this longitude offset from the central meridian the series diverge.
const TM_MAX_LON_OFFSET: f64 = 45.0;

/// Reproject `(x, y)` from `src` to `dst`.
///
/// Geographic coordinates are `(lon, lat)` in degrees, projected ones `(easting,
/// northing)` in meters. The function is pure: same input, same output.
pub fn reproject(x: f64, y: f64, src: &Crs, dst: &Crs) -> Result<(f64, f64), TransformError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(TransformError::NonFinite);
    }
    if src == dst {
        return Ok((x, y));
    }
    let (lon, lat) = to_geographic(x, y, src)?;
    let out = from_geographic(lon, lat, dst)?;
    if out.0.is_finite() && out.1.is_finite() {
        Ok(out)
    } else {
        Err(TransformError::NonFinite)
    }
}

/// Convert coordinates in `crs` to `(lon, lat)` degrees on the same ellipsoid.
pub fn to_geographic(x: f64, y: f64, crs: &Crs) -> Result<(f64, f64), TransformError> {
    let (lon, lat) = match crs.kind {
        CrsKind::Geographic => (x, y),
        CrsKind::TransverseMercator(params) => tm_inverse(x, y, &crs.ellipsoid, &params),
        CrsKind::WebMercator => web_mercator_inverse(x, y),
    };
    if !lon.is_finite() || !lat.is_finite() {
        return Err(TransformError::NonFinite);
    }
    check_geographic(lon, lat, crs)?;
    Ok((lon, lat))
}

/// Convert `(lon, lat)` degrees into `crs`.
pub fn from_geographic(lon: f64, lat: f64, crs: &Crs) -> Result<(f64, f64), TransformError> {
    check_geographic(lon, lat, crs)?;
    match crs.kind {
        CrsKind::Geographic => Ok((lon, lat)),
        CrsKind::TransverseMercator(params) => {
            if (lon - params.central_meridian).abs() > TM_MAX_LON_OFFSET {
                return Err(out_of_domain(lon, lat, crs));
            }
            Ok(tm_forward(lon, lat, &crs.ellipsoid, &params))
        }
        CrsKind::WebMercator => {
            if lat.abs() > WEB_MERCATOR_MAX_LAT {
                return Err(out_of_domain(lon, lat, crs));
            }
            Ok(web_mercator_forward(lon, lat))
        }
    }
}

fn check_geographic(lon: f64, lat: f64, crs: &Crs) -> Result<(), TransformError> {
    if lat.abs() > 90.0 || lon.abs() > 360.0 {
        return Err(out_of_domain(lon, lat, crs));
    }
    Ok(())
}

fn out_of_domain(x: f64, y: f64, crs: &Crs) -> TransformError {
    TransformError::OutOfDomain {
        x,
        y,
        crs: crs.to_string(),
    }
}

/// Meridian arc length from the equator to latitude `phi` (radians).
fn meridian_arc(phi: f64, ell: &Ellipsoid) -> f64 {
    let e2 = ell.e2();
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    ell.a
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

/// Transverse Mercator forward, `(lon, lat)` degrees to `(easting, northing)`.
pub fn tm_forward(lon: f64, lat: f64, ell: &Ellipsoid, p: &TransverseMercator) -> (f64, f64) {
    let phi = lat.to_radians();
    let dlam = (lon - p.central_meridian).to_radians();
    let e2 = ell.e2();
    let ep2 = ell.ep2();
    let k0 = p.scale_factor;

    let (sin_phi, cos_phi) = phi.sin_cos();
    let tan_phi = phi.tan();
    let n = ell.a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = dlam * cos_phi;
    let m = meridian_arc(phi, ell);

    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let x = k0
        * n
        * (a + (1.0 - t + c) * a3 / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);
    let y = k0
        * (m + n
            * tan_phi
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

    (p.false_easting + x, p.false_northing + y)
}

/// Transverse Mercator inverse, `(easting, northing)` to `(lon, lat)` degrees.
pub fn tm_inverse(x: f64, y: f64, ell: &Ellipsoid, p: &TransverseMercator) -> (f64, f64) {
    let e2 = ell.e2();
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = ell.ep2();
    let k0 = p.scale_factor;

    let m = (y - p.false_northing) / k0;
    let mu = m / (ell.a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
    let sq = (1.0 - e2).sqrt();
    let e1 = (1.0 - sq) / (1.0 + sq);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

    let (sin1, cos1) = phi1.sin_cos();
    let tan1 = phi1.tan();
    let c1 = ep2 * cos1 * cos1;
    let t1 = tan1 * tan1;
    let w = 1.0 - e2 * sin1 * sin1;
    let n1 = ell.a / w.sqrt();
    let r1 = ell.a * (1.0 - e2) / (w * w.sqrt());
    let d = (x - p.false_easting) / (n1 * k0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d3 * d;
    let d5 = d4 * d;
    let d6 = d5 * d;

    let phi = phi1
        - (n1 * tan1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d6
                    / 720.0);
    let lam = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d5 / 120.0)
        / cos1;

    (p.central_meridian + lam.to_degrees(), phi.to_degrees())
}

fn web_mercator_forward(lon: f64, lat: f64) -> (f64, f64) {
    let r = Ellipsoid::SPHERE_WEB.a;
    let x = r * lon.to_radians();
    let y = r * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

fn web_mercator_inverse(x: f64, y: f64) -> (f64, f64) {
    let r = Ellipsoid::SPHERE_WEB.a;
    let lon = (x / r).to_degrees();
    let lat = (2.0 * (y / r).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}
