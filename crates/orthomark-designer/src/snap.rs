//! Endpoint snapping.
//!
//! Only line endpoints participate; polygon vertices are never snap targets.
//!
//! The lookup is a linear scan over every line endpoint in insertion order. At
//! annotation scale (tens to a few hundred segments) a query costs microseconds,
//! so no spatial index is maintained. Revisit if sessions grow to many thousands
//! of lines.

use orthomark_core::{Point, ShapeId};
use tracing::trace;

use crate::shape_store::ShapeStore;

/// Default snap radius in pixels.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 10.0;

/// Outcome of a snap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Snapped endpoint, or the query point unchanged.
    pub point: Point,
    /// Owner of the snapped endpoint.
    pub shape: Option<ShapeId>,
}

impl SnapResult {
    pub fn is_snapped(&self) -> bool {
        self.shape.is_some()
    }
}

/// Nearest-endpoint queries over the lines of a [`ShapeStore`].
#[derive(Debug, Clone, Copy)]
pub struct SnapIndex<'a> {
    store: &'a ShapeStore,
}

impl<'a> SnapIndex<'a> {
    pub fn new(store: &'a ShapeStore) -> Self {
        Self { store }
    }

    /// Nearest line endpoint regardless of distance.
    ///
    /// Ties keep the first endpoint found (shape insertion order, then `p1`
    /// before `p2`).
    pub fn nearest_endpoint(&self, query: Point) -> Option<(Point, ShapeId, f64)> {
        let mut best: Option<(Point, ShapeId, f64)> = None;
        for (id, line) in self.store.lines() {
            for endpoint in line.endpoints() {
                let dist = endpoint.distance_to(&query);
                if best.is_none_or(|(_, _, d)| dist < d) {
                    best = Some((endpoint, id, dist));
                }
            }
        }
        best
    }

    /// Snap `query` to the nearest endpoint within `threshold` (inclusive).
    pub fn find_nearest(&self, query: Point, threshold: f64) -> SnapResult {
        match self.nearest_endpoint(query) {
            Some((point, id, dist)) if dist <= threshold => {
                trace!("Snapped {} to {} of shape {}", query, point, id);
                SnapResult {
                    point,
                    shape: Some(id),
                }
            }
            _ => SnapResult {
                point: query,
                shape: None,
            },
        }
    }
}
