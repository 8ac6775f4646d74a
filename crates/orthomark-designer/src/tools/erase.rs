use orthomark_core::Point;
use tracing::debug;

use super::{Commit, PointerButton, ToolContext, ToolOutcome};

/// Removes the line owning the nearest endpoint within the snap radius.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EraseTool;

impl EraseTool {
    pub fn pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        button: PointerButton,
    ) -> ToolOutcome {
        if button != PointerButton::Primary {
            return ToolOutcome::Ignored;
        }
        match ctx
            .document
            .shapes
            .remove_nearest(point, ctx.snap_threshold)
        {
            Some(id) => ToolOutcome::Committed(Commit::Erased(id)),
            None => {
                debug!("Nothing to erase near {}", point);
                ToolOutcome::Ignored
            }
        }
    }
}
