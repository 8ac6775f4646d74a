use orthomark_core::geo::{to_dms, Dms};
use orthomark_core::AffineTransform;
use proptest::prelude::*;

proptest! {
    /// Forward then inverse affine returns the original pixel
    #[test]
    fn prop_affine_roundtrip(
        col in 0.0f64..20_000.0,
        row in 0.0f64..20_000.0,
        res in 0.01f64..5.0,
        skew in -0.01f64..0.01,
    ) {
        let aff = AffineTransform::new(res, skew, 500_000.0, skew, -res, 3_500_000.0);
        let inv = aff.inverse().unwrap();
        let (x, y) = aff.apply(col, row);
        let (c, r) = inv.apply(x, y);
        prop_assert!((c - col).abs() < 1e-5);
        prop_assert!((r - row).abs() < 1e-5);
    }

    /// DMS fields stay in range and the suffix follows the sign
    #[test]
    fn prop_dms_fields_in_range(deg in -180.0f64..180.0) {
        let dms = Dms::from_decimal(deg, false);
        prop_assert!(dms.minutes < 60);
        prop_assert!(dms.seconds >= 0.0 && dms.seconds < 60.0);
        let text = to_dms(deg, false);
        if deg < 0.0 {
            prop_assert!(text.ends_with('W'));
        } else {
            prop_assert!(text.ends_with('E'));
        }
        prop_assert!((dms.to_decimal() - deg).abs() < 1e-6);
    }
}
