//! Everything a session has committed: shapes, labels, dimensions, annotations
//! and survey points.

use orthomark_core::{Altitude, Dms, Point};

use crate::labels::{Annotation, DimensionAnnotation, LabelOrigin, SurveyPoint};
use crate::shape_store::ShapeStore;

/// Committed annotation content of one session.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub shapes: ShapeStore,
    dimensions: Vec<DimensionAnnotation>,
    annotations: Vec<Annotation>,
    survey_points: Vec<SurveyPoint>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dimension(&mut self, dimension: DimensionAnnotation) {
        self.dimensions.push(dimension);
    }

    pub fn dimensions(&self) -> &[DimensionAnnotation] {
        &self.dimensions
    }

    pub fn clear_dimensions(&mut self) -> usize {
        let n = self.dimensions.len();
        self.dimensions.clear();
        n
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn clear_annotations(&mut self) -> usize {
        let n = self.annotations.len();
        self.annotations.clear();
        n
    }

    /// Records a survey point and returns its 1-based index.
    pub fn add_survey_point(
        &mut self,
        point_type: String,
        description: String,
        longitude: Dms,
        latitude: Dms,
        altitude: Altitude,
        position: Point,
    ) -> usize {
        let index = self.survey_points.len() + 1;
        self.survey_points.push(SurveyPoint {
            index,
            point_type,
            latitude,
            longitude,
            altitude,
            description,
            position,
        });
        index
    }

    pub fn survey_points(&self) -> &[SurveyPoint] {
        &self.survey_points
    }

    /// Removes survey points and the labels the picking tool placed for them.
    pub fn clear_survey_points(&mut self) -> usize {
        let n = self.survey_points.len();
        self.survey_points.clear();
        self.shapes.clear_labels(LabelOrigin::Survey);
        n
    }

    /// Whether nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
            && self.shapes.labels().is_empty()
            && self.dimensions.is_empty()
            && self.annotations.is_empty()
            && self.survey_points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::CoordinateLabel;

    #[test]
    fn test_survey_indices_are_sequential() {
        let mut doc = Document::new();
        let lon = Dms::from_decimal(117.0, false);
        let lat = Dms::from_decimal(31.0, true);
        let a = doc.add_survey_point(
            "桩".into(),
            "".into(),
            lon,
            lat,
            Altitude::unavailable(),
            Point::new(0.0, 0.0),
        );
        let b = doc.add_survey_point(
            "桩".into(),
            "".into(),
            lon,
            lat,
            Altitude::unavailable(),
            Point::new(1.0, 0.0),
        );
        assert_eq!((a, b), (1, 2));
    }

    #[test]
    fn test_clear_survey_points_removes_survey_labels_only() {
        let mut doc = Document::new();
        doc.shapes.add_label(CoordinateLabel::new(
            Point::new(0.0, 0.0),
            "probe",
            LabelOrigin::Probe,
        ));
        doc.shapes.add_label(CoordinateLabel::new(
            Point::new(1.0, 1.0),
            "survey",
            LabelOrigin::Survey,
        ));
        doc.clear_survey_points();
        assert_eq!(doc.shapes.labels().len(), 1);
        assert_eq!(doc.shapes.labels()[0].text, "probe");
    }
}
