//! Text-bearing records: coordinate labels, dimensions, annotations, survey points.

use orthomark_core::{Altitude, Dms, Point, ShapeId};
use serde::{Deserialize, Serialize};

/// Which tool produced a coordinate label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelOrigin {
    /// Point-coordinate probe.
    Probe,
    /// Coordinate-picking (survey point capture).
    Survey,
}

/// Coordinate text pinned to a pixel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateLabel {
    pub position: Point,
    /// Rendered text; DMS longitude over latitude, or raw pixel values on fallback.
    pub text: String,
    /// `(lon, lat)` when the transform succeeded.
    pub dms: Option<(Dms, Dms)>,
    pub altitude: Option<Altitude>,
    /// Shape whose removal also removes this label.
    pub anchor: Option<ShapeId>,
    pub origin: LabelOrigin,
}

impl CoordinateLabel {
    pub fn new(position: Point, text: impl Into<String>, origin: LabelOrigin) -> Self {
        Self {
            position,
            text: text.into(),
            dms: None,
            altitude: None,
            anchor: None,
            origin,
        }
    }

    pub fn with_dms(mut self, lon: Dms, lat: Dms) -> Self {
        self.dms = Some((lon, lat));
        self
    }

    pub fn with_altitude(mut self, altitude: Altitude) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn anchored_to(mut self, id: ShapeId) -> Self {
        self.anchor = Some(id);
        self
    }
}

/// Unit of a measured distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Meters,
    Pixels,
}

impl DistanceUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Pixels => "px",
        }
    }
}

/// A two-point measurement with a midpoint label. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAnnotation {
    pub start: Point,
    pub end: Point,
    pub distance: f64,
    pub unit: DistanceUnit,
}

impl DimensionAnnotation {
    /// Measure between two pixel positions.
    ///
    /// With a pixel size the distance is in meters, otherwise in pixels.
    pub fn measure(start: Point, end: Point, pixel_size: Option<(f64, f64)>) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let (distance, unit) = match pixel_size {
            Some((sx, sy)) => (
                ((dx * sx).powi(2) + (dy * sy).powi(2)).sqrt(),
                DistanceUnit::Meters,
            ),
            None => ((dx * dx + dy * dy).sqrt(), DistanceUnit::Pixels),
        };
        Self {
            start,
            end,
            distance,
            unit,
        }
    }

    pub fn label_position(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    pub fn label_text(&self) -> String {
        format!("{:.2} {}", self.distance, self.unit.suffix())
    }
}

/// Free-text annotation with a user-chosen order token.
///
/// Order tokens need not be numeric, unique or sequential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub position: Point,
    pub order: String,
    pub content: String,
}

/// A captured survey point, one row of the coordinate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    /// 1-based position in capture order.
    pub index: usize,
    pub point_type: String,
    pub latitude: Dms,
    pub longitude: Dms,
    pub altitude: Altitude,
    pub description: String,
    pub position: Point,
}

impl SurveyPoint {
    /// Altitude rounded to millimetres for tabular output.
    pub fn altitude_text(&self) -> String {
        format!("{:.3}", self.altitude.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_in_pixels() {
        let dim = DimensionAnnotation::measure(Point::new(0.0, 0.0), Point::new(3.0, 4.0), None);
        assert_eq!(dim.distance, 5.0);
        assert_eq!(dim.unit, DistanceUnit::Pixels);
        assert_eq!(dim.label_text(), "5.00 px");
        assert_eq!(dim.label_position(), Point::new(1.5, 2.0));
    }

    #[test]
    fn test_dimension_in_meters() {
        let dim = DimensionAnnotation::measure(
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Some((2.0, 2.0)),
        );
        assert_eq!(dim.distance, 10.0);
        assert_eq!(dim.label_text(), "10.00 m");
    }

    #[test]
    fn test_anisotropic_pixels() {
        let dim = DimensionAnnotation::measure(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Some((0.3, 0.4)),
        );
        assert!((dim.distance - 5.0).abs() < 1e-12);
    }
}
