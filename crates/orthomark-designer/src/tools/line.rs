//! Continuous segment drawing with endpoint snapping.

use orthomark_core::Point;
use tracing::debug;

use super::{Commit, Draft, PointerButton, ToolContext, ToolOutcome};
use crate::snap::SnapIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineState {
    AwaitingFirstPoint,
    /// `start` is the last committed point; `cursor` the snapped pointer position.
    AwaitingSecondPoint { start: Point, cursor: Option<Point> },
}

/// Each click after the first commits an independent segment from the previous
/// point, then becomes the start of the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTool {
    state: LineState,
}

impl Default for LineTool {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTool {
    pub fn new() -> Self {
        Self {
            state: LineState::AwaitingFirstPoint,
        }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    fn snap(ctx: &ToolContext<'_>, point: Point) -> Point {
        SnapIndex::new(&ctx.document.shapes)
            .find_nearest(point, ctx.snap_threshold)
            .point
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
        let snapped = Self::snap(ctx, point);
        match self.state {
            LineState::AwaitingFirstPoint => {
                self.state = LineState::AwaitingSecondPoint {
                    start: snapped,
                    cursor: None,
                };
                ToolOutcome::DraftUpdated
            }
            LineState::AwaitingSecondPoint { start, .. } => {
                if start == snapped {
                    // Zero-length segment
                    return ToolOutcome::Ignored;
                }
                let id = ctx.document.shapes.add_line(start, snapped, ctx.color);
                self.state = LineState::AwaitingSecondPoint {
                    start: snapped,
                    cursor: None,
                };
                ToolOutcome::Committed(Commit::Line(id))
            }
        }
    }

    pub fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        match self.state {
            LineState::AwaitingFirstPoint => ToolOutcome::Ignored,
            LineState::AwaitingSecondPoint { start, .. } => {
                self.state = LineState::AwaitingSecondPoint {
                    start,
                    cursor: Some(Self::snap(ctx, point)),
                };
                ToolOutcome::DraftUpdated
            }
        }
    }

    pub fn stop(&mut self) -> ToolOutcome {
        let had_draft = matches!(self.state, LineState::AwaitingSecondPoint { .. });
        self.state = LineState::AwaitingFirstPoint;
        if had_draft {
            debug!("Line tool stopped, preview discarded");
            ToolOutcome::Discarded
        } else {
            ToolOutcome::Ignored
        }
    }

    pub fn draft(&self) -> Option<Draft> {
        match self.state {
            LineState::AwaitingSecondPoint {
                start,
                cursor: Some(to),
            } => Some(Draft::Preview { from: start, to }),
            _ => None,
        }
    }
}
