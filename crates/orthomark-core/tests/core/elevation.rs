use orthomark_core::elevation::NO_DATA;
use orthomark_core::{resolve_altitude, AltitudeSource, ElevationSource, GridElevation};

/// A DSM hole (sentinel 0.0) falls through to the DOM band
#[test]
fn test_dsm_hole_uses_dom() {
    let mut values = vec![55.0; 16];
    values[5] = NO_DATA;
    let dsm = GridElevation::new(4, 4, values).unwrap();
    let dom = GridElevation::constant(4, 4, 48.25);

    let hit = resolve_altitude(Some(&dsm), Some(&dom), 0.0, 0.0);
    assert_eq!(hit.source, AltitudeSource::Dsm);
    assert_eq!(hit.value, 55.0);

    let hole = resolve_altitude(Some(&dsm), Some(&dom), 1.0, 1.0);
    assert_eq!(hole.source, AltitudeSource::Dom);
    assert_eq!(hole.value, 48.25);
}

/// Outside both rasters the altitude is explicitly unavailable
#[test]
fn test_out_of_range_unavailable() {
    let dsm = GridElevation::constant(4, 4, 10.0);
    let dom = GridElevation::constant(4, 4, 20.0);
    let alt = resolve_altitude(Some(&dsm), Some(&dom), 100.0, 100.0);
    assert_eq!(alt.source, AltitudeSource::Unavailable);
    assert_eq!(alt.value, 0.0);
}

#[test]
fn test_nan_cells_are_no_data() {
    let dsm = GridElevation::new(1, 1, vec![f64::NAN]).unwrap();
    assert_eq!(dsm.altitude_at(0.0, 0.0), NO_DATA);
}
