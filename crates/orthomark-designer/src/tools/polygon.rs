//! Polygon collection.

use orthomark_core::Point;
use tracing::{debug, warn};

use super::{Commit, Draft, PointerButton, ToolContext, ToolOutcome};
use crate::shapes::PolygonShape;

#[derive(Debug, Clone, PartialEq)]
pub enum PolygonState {
    Collecting(Vec<Point>),
    Closed,
}

/// Left clicks append raw vertices; right click or stop closes the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonTool {
    state: PolygonState,
}

impl Default for PolygonTool {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonTool {
    pub fn new() -> Self {
        Self {
            state: PolygonState::Collecting(Vec::new()),
        }
    }

    pub fn state(&self) -> &PolygonState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, PolygonState::Closed)
    }

    pub fn pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        button: PointerButton,
    ) -> ToolOutcome {
        if button == PointerButton::Secondary {
            return self.close(ctx);
        }
        match &mut self.state {
            PolygonState::Collecting(vertices) => {
                vertices.push(point);
                ToolOutcome::DraftUpdated
            }
            PolygonState::Closed => ToolOutcome::Ignored,
        }
    }

    pub fn stop(&mut self, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        match self.state {
            PolygonState::Collecting(_) => self.close(ctx),
            PolygonState::Closed => ToolOutcome::Ignored,
        }
    }

    /// Commit the collected ring, or drop it when it has fewer than three vertices.
    fn close(&mut self, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        let vertices = match std::mem::replace(&mut self.state, PolygonState::Closed) {
            PolygonState::Collecting(vertices) => vertices,
            PolygonState::Closed => return ToolOutcome::Ignored,
        };
        if vertices.len() < PolygonShape::MIN_VERTICES {
            debug!("Polygon draft with {} vertices discarded", vertices.len());
            return ToolOutcome::Discarded;
        }
        match ctx.document.shapes.add_polygon(vertices) {
            Ok(id) => ToolOutcome::Committed(Commit::Polygon(id)),
            Err(e) => {
                warn!("Polygon rejected: {}", e);
                ToolOutcome::Notice(e.into())
            }
        }
    }

    pub fn draft(&self) -> Option<Draft> {
        match &self.state {
            PolygonState::Collecting(vertices) if !vertices.is_empty() => {
                Some(Draft::Polyline(vertices.clone()))
            }
            _ => None,
        }
    }
}
