//! Two-click distance measurement.

use orthomark_core::Point;
use tracing::debug;

use super::{Commit, Draft, PointerButton, ToolContext, ToolOutcome};
use crate::labels::DimensionAnnotation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionState {
    AwaitingFirstPoint,
    AwaitingSecondPoint { start: Point },
}

/// Clicks are taken raw, without snapping. Distances are in meters when a
/// dataset in a projected CRS is loaded and in pixels otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionTool {
    state: DimensionState,
}

impl Default for DimensionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl DimensionTool {
    pub fn new() -> Self {
        Self {
            state: DimensionState::AwaitingFirstPoint,
        }
    }

    pub fn state(&self) -> DimensionState {
        self.state
    }

    pub fn pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        button: PointerButton,
    ) -> ToolOutcome {
        if button != PointerButton::Primary {
            return ToolOutcome::Ignored;
        }
        match self.state {
            DimensionState::AwaitingFirstPoint => {
                self.state = DimensionState::AwaitingSecondPoint { start: point };
                ToolOutcome::DraftUpdated
            }
            DimensionState::AwaitingSecondPoint { start } => {
                // Pixel size of a geographic raster is in degrees
                let pixel_size = ctx
                    .dataset
                    .map(|d| d.transformer())
                    .filter(|t| !t.source().is_geographic())
                    .map(|t| t.pixel_size());
                let dimension = DimensionAnnotation::measure(start, point, pixel_size);
                let text = dimension.label_text();
                debug!("Measured {} from {} to {}", text, start, point);
                ctx.document.add_dimension(dimension);
                self.state = DimensionState::AwaitingFirstPoint;
                ToolOutcome::Committed(Commit::Dimension(text))
            }
        }
    }

    pub fn stop(&mut self) -> ToolOutcome {
        let pending = matches!(self.state, DimensionState::AwaitingSecondPoint { .. });
        self.state = DimensionState::AwaitingFirstPoint;
        if pending {
            ToolOutcome::Discarded
        } else {
            ToolOutcome::Ignored
        }
    }

    pub fn draft(&self) -> Option<Draft> {
        match self.state {
            DimensionState::AwaitingSecondPoint { start } => Some(Draft::Marker(start)),
            DimensionState::AwaitingFirstPoint => None,
        }
    }
}
