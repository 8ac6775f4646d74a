use orthomark_core::geo::{to_dms, Dms, Hemisphere};

/// Zero degrees takes the positive hemisphere on both axes
#[test]
fn test_zero_degrees_suffix() {
    assert!(to_dms(0.0, true).ends_with('N'));
    assert!(to_dms(0.0, false).ends_with('E'));
}

#[test]
fn test_negative_latitude_decomposition() {
    let text = to_dms(-22.5017, true);
    assert!(text.starts_with("22°30′06."), "{}", text);
    assert!(text.ends_with("″S"));
    assert_eq!(text, "22°30′06.1200″S");
}

#[test]
fn test_longitude_example() {
    let dms = Dms::from_decimal(113.501_731, false);
    assert_eq!(dms.degrees, 113);
    assert_eq!(dms.minutes, 30);
    assert_eq!(dms.hemisphere, Hemisphere::East);
    assert_eq!(dms.to_string(), "113°30′06.2316″E");
}

#[test]
fn test_small_values_are_zero_padded() {
    assert_eq!(to_dms(1.0 + 1.0 / 60.0 + 1.5 / 3600.0, true), "01°01′01.5000″N");
}
