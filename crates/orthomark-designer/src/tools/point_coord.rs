use orthomark_core::{CoordinateReading, Point};
use tracing::debug;

use super::{Commit, PointerButton, ToolContext, ToolOutcome};
use crate::labels::{CoordinateLabel, LabelOrigin};
use crate::snap::SnapIndex;

/// Drops a coordinate label at every click.
///
/// The label stays at the raw click position. When the click lands within the
/// snap radius of a line endpoint the label is anchored to that line, so erasing
/// the line removes the label as well.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointCoordTool;

impl PointCoordTool {
    pub fn pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        button: PointerButton,
    ) -> ToolOutcome {
        if button != PointerButton::Primary {
            return ToolOutcome::Ignored;
        }
        let dataset = match ctx.require_dataset() {
            Ok(dataset) => dataset,
            Err(e) => return ToolOutcome::Notice(e.into()),
        };

        let reading = dataset.transformer().read(point);
        let mut label = CoordinateLabel::new(point, reading.label_text(), LabelOrigin::Probe);
        let raw_pixels = match reading {
            CoordinateReading::Geographic { lon, lat, .. } => {
                label = label.with_dms(lon, lat);
                false
            }
            CoordinateReading::RawPixel { .. } => true,
        };

        let snap = SnapIndex::new(&ctx.document.shapes).find_nearest(point, ctx.snap_threshold);
        if let Some(id) = snap.shape {
            debug!("Coordinate label anchored to {}", id);
            label = label.anchored_to(id);
        }

        ctx.document.shapes.add_label(label);
        ToolOutcome::Committed(Commit::CoordinateLabel { raw_pixels })
    }
}
