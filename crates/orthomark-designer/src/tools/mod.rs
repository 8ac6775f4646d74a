//! Tool state machines.
//!
//! Exactly one [`ActiveTool`] exists per session. Every pointer or cancel event
//! is dispatched to it with a [`ToolContext`] that borrows the session's
//! dataset, document and text prompt for the duration of that one event.

mod annotate;
mod coordinate_pick;
mod dimension;
mod erase;
mod line;
mod point_coord;
mod polygon;

pub use annotate::AnnotateTool;
pub use coordinate_pick::CoordinatePickTool;
pub use dimension::{DimensionState, DimensionTool};
pub use erase::EraseTool;
pub use line::{LineState, LineTool};
pub use point_coord::PointCoordTool;
pub use polygon::{PolygonState, PolygonTool};

use std::fmt;
use std::str::FromStr;

use orthomark_core::{Error, Point, ShapeId};

use crate::dataset::Dataset;
use crate::document::Document;
use crate::notice::Notice;
use crate::prompt::TextPrompt;
use crate::shapes::ShapeColor;

/// Tool names as the host refers to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Line,
    Polygon,
    Erase,
    PointCoordinate,
    Dimension,
    Annotate,
    CoordinatePick,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Line => "line",
            ToolKind::Polygon => "polygon",
            ToolKind::Erase => "erase",
            ToolKind::PointCoordinate => "point-coord",
            ToolKind::Dimension => "dimension",
            ToolKind::Annotate => "annotate",
            ToolKind::CoordinatePick => "pick-coordinate",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim() {
            "line" => ToolKind::Line,
            "polygon" => ToolKind::Polygon,
            "erase" => ToolKind::Erase,
            "point-coord" | "point-coordinate" => ToolKind::PointCoordinate,
            "dimension" => ToolKind::Dimension,
            "annotate" | "annotation" => ToolKind::Annotate,
            "pick-coordinate" | "coordinate-pick" => ToolKind::CoordinatePick,
            other => return Err(format!("Unknown tool: {}", other)),
        };
        Ok(kind)
    }
}

/// Mouse button of a pointer-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What a committed event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Line(ShapeId),
    Polygon(ShapeId),
    Erased(ShapeId),
    /// `raw_pixels` is set when the transform failed and pixel values were shown.
    CoordinateLabel { raw_pixels: bool },
    Dimension(String),
    Annotation { order: String },
    SurveyPoint(usize),
}

/// Result of dispatching one event to a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The event has no meaning in the current state.
    Ignored,
    /// Draft geometry changed; nothing was persisted.
    DraftUpdated,
    Committed(Commit),
    /// Draft geometry was thrown away without a commit.
    Discarded,
    Notice(Notice),
}

/// Non-persistent geometry a tool wants drawn while it works.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    /// Rubber-band segment of the line tool.
    Preview { from: Point, to: Point },
    /// Open polyline of collected polygon vertices.
    Polyline(Vec<Point>),
    /// First point of a pending measurement.
    Marker(Point),
}

/// Everything a tool may touch while handling one event.
pub struct ToolContext<'a> {
    pub dataset: Option<&'a Dataset>,
    pub document: &'a mut Document,
    pub prompt: &'a mut dyn TextPrompt,
    pub snap_threshold: f64,
    pub color: ShapeColor,
}

impl<'a> ToolContext<'a> {
    /// The loaded dataset, or [`Error::NoDataset`].
    pub fn require_dataset(&self) -> orthomark_core::Result<&'a Dataset> {
        self.dataset.ok_or(Error::NoDataset)
    }
}

/// The single active tool of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActiveTool {
    #[default]
    Idle,
    Line(LineTool),
    Polygon(PolygonTool),
    Erase(EraseTool),
    PointCoordinate(PointCoordTool),
    Dimension(DimensionTool),
    Annotate(AnnotateTool),
    CoordinatePick(CoordinatePickTool),
}

impl ActiveTool {
    /// A freshly started tool in its initial state.
    pub fn start(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Line => ActiveTool::Line(LineTool::new()),
            ToolKind::Polygon => ActiveTool::Polygon(PolygonTool::new()),
            ToolKind::Erase => ActiveTool::Erase(EraseTool),
            ToolKind::PointCoordinate => ActiveTool::PointCoordinate(PointCoordTool),
            ToolKind::Dimension => ActiveTool::Dimension(DimensionTool::new()),
            ToolKind::Annotate => ActiveTool::Annotate(AnnotateTool),
            ToolKind::CoordinatePick => ActiveTool::CoordinatePick(CoordinatePickTool),
        }
    }

    pub fn kind(&self) -> Option<ToolKind> {
        match self {
            ActiveTool::Idle => None,
            ActiveTool::Line(_) => Some(ToolKind::Line),
            ActiveTool::Polygon(_) => Some(ToolKind::Polygon),
            ActiveTool::Erase(_) => Some(ToolKind::Erase),
            ActiveTool::PointCoordinate(_) => Some(ToolKind::PointCoordinate),
            ActiveTool::Dimension(_) => Some(ToolKind::Dimension),
            ActiveTool::Annotate(_) => Some(ToolKind::Annotate),
            ActiveTool::CoordinatePick(_) => Some(ToolKind::CoordinatePick),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ActiveTool::Idle)
    }

    pub fn pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        button: PointerButton,
    ) -> ToolOutcome {
        match self {
            ActiveTool::Idle => ToolOutcome::Ignored,
            ActiveTool::Line(tool) => tool.pointer_down(ctx, point, button),
            ActiveTool::Polygon(tool) => tool.pointer_down(ctx, point, button),
            ActiveTool::Erase(tool) => tool.pointer_down(ctx, point, button),
            ActiveTool::PointCoordinate(tool) => tool.pointer_down(ctx, point, button),
            ActiveTool::Dimension(tool) => tool.pointer_down(ctx, point, button),
            ActiveTool::Annotate(tool) => tool.pointer_down(ctx, point, button),
            ActiveTool::CoordinatePick(tool) => tool.pointer_down(ctx, point, button),
        }
    }

    pub fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        match self {
            ActiveTool::Line(tool) => tool.pointer_move(ctx, point),
            ActiveTool::Idle
            | ActiveTool::Polygon(_)
            | ActiveTool::Erase(_)
            | ActiveTool::PointCoordinate(_)
            | ActiveTool::Dimension(_)
            | ActiveTool::Annotate(_)
            | ActiveTool::CoordinatePick(_) => ToolOutcome::Ignored,
        }
    }

    /// Run the tool's exit action. Committed content is left untouched.
    pub fn stop(&mut self, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        match self {
            ActiveTool::Idle => ToolOutcome::Ignored,
            ActiveTool::Line(tool) => tool.stop(),
            ActiveTool::Polygon(tool) => tool.stop(ctx),
            ActiveTool::Dimension(tool) => tool.stop(),
            ActiveTool::Erase(_)
            | ActiveTool::PointCoordinate(_)
            | ActiveTool::Annotate(_)
            | ActiveTool::CoordinatePick(_) => ToolOutcome::Ignored,
        }
    }

    /// Whether the tool has reached a terminal state and should give way to Idle.
    pub fn is_finished(&self) -> bool {
        match self {
            ActiveTool::Polygon(tool) => tool.is_closed(),
            _ => false,
        }
    }

    pub fn draft(&self) -> Option<Draft> {
        match self {
            ActiveTool::Line(tool) => tool.draft(),
            ActiveTool::Polygon(tool) => tool.draft(),
            ActiveTool::Dimension(tool) => tool.draft(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_roundtrip() {
        for kind in [
            ToolKind::Line,
            ToolKind::Polygon,
            ToolKind::Erase,
            ToolKind::PointCoordinate,
            ToolKind::Dimension,
            ToolKind::Annotate,
            ToolKind::CoordinatePick,
        ] {
            assert_eq!(kind.name().parse::<ToolKind>(), Ok(kind));
            assert_eq!(ActiveTool::start(kind).kind(), Some(kind));
        }
        assert!("lasso".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_idle_ignores_events() {
        let mut doc = Document::new();
        let mut prompt = crate::prompt::CancelPrompt;
        let mut ctx = ToolContext {
            dataset: None,
            document: &mut doc,
            prompt: &mut prompt,
            snap_threshold: 10.0,
            color: ShapeColor::Blue,
        };
        let mut tool = ActiveTool::Idle;
        assert_eq!(
            tool.pointer_down(&mut ctx, Point::new(1.0, 1.0), PointerButton::Primary),
            ToolOutcome::Ignored
        );
        assert_eq!(tool.stop(&mut ctx), ToolOutcome::Ignored);
        assert!(tool.draft().is_none());
    }
}
