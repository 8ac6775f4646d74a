//! The loaded raster context shared by every tool.

use std::fmt;

use orthomark_core::{resolve_altitude, Altitude, CoordinateTransformer, ElevationSource, Point};

/// Georeferencing and elevation collaborators of the loaded orthophoto.
///
/// Read-only for the lifetime of a load; the session lends it to tools by
/// shared reference.
pub struct Dataset {
    transformer: CoordinateTransformer,
    dom: Option<Box<dyn ElevationSource>>,
    dsm: Option<Box<dyn ElevationSource>>,
}

impl Dataset {
    pub fn new(transformer: CoordinateTransformer) -> Self {
        Self {
            transformer,
            dom: None,
            dsm: None,
        }
    }

    /// Attach the orthophoto's own elevation band.
    pub fn with_dom(mut self, source: impl ElevationSource + 'static) -> Self {
        self.dom = Some(Box::new(source));
        self
    }

    /// Attach a surface model.
    pub fn with_dsm(mut self, source: impl ElevationSource + 'static) -> Self {
        self.dsm = Some(Box::new(source));
        self
    }

    pub fn transformer(&self) -> &CoordinateTransformer {
        &self.transformer
    }

    pub fn has_dom(&self) -> bool {
        self.dom.is_some()
    }

    pub fn has_dsm(&self) -> bool {
        self.dsm.is_some()
    }

    /// Altitude at a pixel, DSM first, then DOM.
    pub fn altitude_at(&self, p: Point) -> Altitude {
        resolve_altitude(self.dsm.as_deref(), self.dom.as_deref(), p.x, p.y)
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("transformer", &self.transformer)
            .field("dom", &self.dom.is_some())
            .field("dsm", &self.dsm.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthomark_core::{AffineTransform, AltitudeSource, Crs, GridElevation};

    #[test]
    fn test_altitude_chain() {
        let t = CoordinateTransformer::new(
            AffineTransform::identity(),
            Crs::from_epsg(4548).unwrap(),
            Crs::CGCS2000,
        );
        let ds = Dataset::new(t)
            .with_dom(GridElevation::constant(4, 4, 11.0))
            .with_dsm(GridElevation::constant(2, 2, 22.0));

        assert_eq!(ds.altitude_at(Point::new(1.0, 1.0)).source, AltitudeSource::Dsm);
        let alt = ds.altitude_at(Point::new(3.0, 3.0));
        assert_eq!(alt.source, AltitudeSource::Dom);
        assert_eq!(alt.value, 11.0);
    }
}
