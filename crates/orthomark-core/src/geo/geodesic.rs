//! Geodesic distance on the ellipsoid.

use super::ellipsoid::Ellipsoid;

/// Mean Earth radius used by the spherical fallback.
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

const VINCENTY_MAX_ITER: usize = 100;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// Vincenty inverse formula. Returns `None` when the iteration does not converge,
/// which only happens for nearly antipodal points.
pub fn vincenty_distance(
    ellipsoid: &Ellipsoid,
    lon1: f64,
    lat1: f64,
    lon2: f64,
    lat2: f64,
) -> Option<f64> {
    let a = ellipsoid.a;
    let f = ellipsoid.f;
    let b = ellipsoid.b();

    let l = (lon2 - lon1).to_radians();
    let u1 = ((1.0 - f) * lat1.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * lat2.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITER {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial line: cos_sq_alpha = 0
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - lambda_prev).abs() < VINCENTY_TOLERANCE {
            let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Some(b * big_a * (sigma - delta_sigma));
        }
    }
    None
}

/// Great-circle distance on a sphere of mean Earth radius.
pub fn haversine_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlam = (lon2 - lon1).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlam / 2.0).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS * h.sqrt().asin()
}

/// Ellipsoidal distance in meters, falling back to haversine when Vincenty diverges.
pub fn geodesic_distance(ellipsoid: &Ellipsoid, lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    vincenty_distance(ellipsoid, lon1, lat1, lon2, lat2).unwrap_or_else(|| {
        tracing::debug!("Vincenty did not converge, using haversine");
        haversine_distance(lon1, lat1, lon2, lat2)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_along_equator() {
        let d = vincenty_distance(&Ellipsoid::WGS84, 0.0, 0.0, 1.0, 0.0).unwrap();
        assert!((d - 111_319.490_8).abs() < 0.01, "distance {}", d);
    }

    #[test]
    fn test_coincident_points() {
        let d = vincenty_distance(&Ellipsoid::CGCS2000, 117.0, 31.0, 117.0, 31.0).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_close_to_haversine_for_short_lines() {
        let v = geodesic_distance(&Ellipsoid::WGS84, 117.0, 31.0, 117.01, 31.0);
        let h = haversine_distance(117.0, 31.0, 117.01, 31.0);
        assert!((v - h).abs() / v < 0.005);
    }
}
