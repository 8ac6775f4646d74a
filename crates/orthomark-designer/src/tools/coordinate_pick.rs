use orthomark_core::Point;
use tracing::{info, warn};

use super::{Commit, PointerButton, ToolContext, ToolOutcome};
use crate::labels::{CoordinateLabel, LabelOrigin};
use crate::notice::Notice;
use crate::prompt::PromptKind;

/// Survey point capture.
///
/// Transforms the click, resolves its altitude (DSM, then DOM), then asks for
/// point type and description. Cancelling the prompt records nothing; empty
/// fields are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinatePickTool;

impl CoordinatePickTool {
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

        let geo = match dataset.transformer().pixel_to_lonlat(point) {
            Ok(geo) => geo,
            Err(e) => {
                warn!("Cannot pick coordinate at {}: {}", point, e);
                return ToolOutcome::Notice(Notice::TransformFailed(e));
            }
        };
        let altitude = dataset.altitude_at(point);

        let Some(fields) = ctx.prompt.request(PromptKind::SurveyPoint) else {
            return ToolOutcome::Notice(Notice::PromptCancelled);
        };

        let (lon, lat) = (geo.lon_dms(), geo.lat_dms());
        let index = ctx.document.add_survey_point(
            fields.first,
            fields.second,
            lon,
            lat,
            altitude,
            point,
        );
        ctx.document.shapes.add_label(
            CoordinateLabel::new(point, format!("{}\n{}", lon, lat), LabelOrigin::Survey)
                .with_dms(lon, lat)
                .with_altitude(altitude),
        );
        info!("Survey point {} recorded at {} {}", index, lat, lon);
        ToolOutcome::Committed(Commit::SurveyPoint(index))
    }
}
