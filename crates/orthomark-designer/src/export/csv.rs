//! Survey point table export.

use std::io::Write;
use std::path::Path;

use tracing::info;

use super::ExportError;
use crate::labels::SurveyPoint;

/// Column captions: index, point type, latitude, longitude, altitude, description.
pub const SURVEY_CSV_HEADER: [&str; 6] = ["序号", "测点类型", "纬度", "经度", "海拔高程", "测点说明"];

/// Write survey points as UTF-8 CSV with a header row.
pub fn write_survey_csv<W: Write>(points: &[SurveyPoint], writer: W) -> Result<(), ExportError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(SURVEY_CSV_HEADER)?;
    for p in points {
        wtr.write_record([
            p.index.to_string(),
            p.point_type.clone(),
            p.latitude.to_string(),
            p.longitude.to_string(),
            p.altitude_text(),
            p.description.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write survey points to `path`. Refuses to create a file for an empty list.
pub fn export_survey_csv(points: &[SurveyPoint], path: &Path) -> Result<usize, ExportError> {
    if points.is_empty() {
        return Err(ExportError::Empty("survey points"));
    }
    let file = std::fs::File::create(path)?;
    write_survey_csv(points, file)?;
    info!("Exported {} survey points to {}", points.len(), path.display());
    Ok(points.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthomark_core::{Altitude, AltitudeSource, Dms, Point};

    fn point(index: usize, description: &str) -> SurveyPoint {
        SurveyPoint {
            index,
            point_type: "界址点".to_string(),
            latitude: Dms::from_decimal(31.5, true),
            longitude: Dms::from_decimal(117.25, false),
            altitude: Altitude {
                value: 23.456_78,
                source: AltitudeSource::Dsm,
            },
            description: description.to_string(),
            position: Point::new(0.0, 0.0),
        }
    }

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        write_survey_csv(&[point(1, "东南角, 石砌")], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("序号,测点类型,纬度,经度,海拔高程,测点说明"));
        assert_eq!(
            lines.next(),
            Some("1,界址点,31°30′00.0000″N,117°15′00.0000″E,23.457,\"东南角, 石砌\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_list_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coords.csv");
        let err = export_survey_csv(&[], &path).unwrap_err();
        assert!(matches!(err, ExportError::Empty(_)));
        assert!(!path.exists());
    }
}
