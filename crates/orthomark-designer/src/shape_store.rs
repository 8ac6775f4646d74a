//! Shape storage.
//!
//! Owns every persisted line and polygon together with the coordinate labels
//! that can be anchored to them, so that removing a shape can cascade to its
//! labels in one step.

use orthomark_core::{Point, Result, ShapeId};
use tracing::{debug, info};

use crate::labels::{CoordinateLabel, LabelOrigin};
use crate::shapes::{LineShape, PolygonShape, Shape, ShapeColor, StoredShape};
use crate::snap::SnapIndex;

/// Insertion-ordered collection of shapes and coordinate labels.
#[derive(Debug, Clone)]
pub struct ShapeStore {
    shapes: Vec<StoredShape>,
    labels: Vec<CoordinateLabel>,
    next_id: u64,
    visible: bool,
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeStore {
    /// Creates an empty, visible store.
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            labels: Vec::new(),
            next_id: 1,
            visible: true,
        }
    }

    /// Generates a new unique ID. IDs are never reused.
    fn generate_id(&mut self) -> ShapeId {
        let id = ShapeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds a line segment.
    pub fn add_line(&mut self, p1: Point, p2: Point, color: ShapeColor) -> ShapeId {
        let id = self.generate_id();
        self.shapes.push(StoredShape {
            id,
            shape: Shape::Line(LineShape::new(p1, p2, color)),
        });
        debug!("Added line {} from {} to {}", id, p1, p2);
        id
    }

    /// Adds a closed polygon. Fewer than three vertices is rejected and nothing is stored.
    pub fn add_polygon(&mut self, vertices: Vec<Point>) -> Result<ShapeId> {
        let polygon = PolygonShape::new(vertices)?;
        let id = self.generate_id();
        debug!(
            "Added polygon {} with {} vertices",
            id,
            polygon.vertices().len()
        );
        self.shapes.push(StoredShape {
            id,
            shape: Shape::Polygon(polygon),
        });
        Ok(id)
    }

    /// Gets a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id).map(|s| &s.shape)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Removes a shape and every label anchored to it.
    ///
    /// A label counts as anchored when it names the shape explicitly or, for a
    /// line, sits exactly on one of its endpoints. Survey labels belong to their
    /// survey points and are never cascaded.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id == id)?;
        let removed = self.shapes.remove(idx).shape;

        let before = self.labels.len();
        let line = removed.as_line().copied();
        self.labels.retain(|label| {
            if label.origin == LabelOrigin::Survey {
                return true;
            }
            let explicit = label.anchor == Some(id);
            let on_endpoint = line.is_some_and(|l| l.has_endpoint(&label.position));
            !(explicit || on_endpoint)
        });
        let cascaded = before - self.labels.len();

        debug!(
            "Removed {} {} ({} anchored labels)",
            removed.kind_name(),
            id,
            cascaded
        );
        Some(removed)
    }

    /// Removes the line whose endpoint is nearest to `query`, within `threshold`.
    pub fn remove_nearest(&mut self, query: Point, threshold: f64) -> Option<ShapeId> {
        let id = SnapIndex::new(self).find_nearest(query, threshold).shape?;
        self.remove(id).map(|_| id)
    }

    /// Removes all shapes and point-coordinate labels. Survey labels stay until
    /// their survey points are cleared. Safe to call repeatedly.
    pub fn clear_all(&mut self) {
        let count = self.shapes.len() + self.clear_labels(LabelOrigin::Probe);
        self.shapes.clear();
        if count > 0 {
            info!("Cleared {} shapes and labels", count);
        }
    }

    /// Removes all polygons, leaving lines alone. Returns how many were removed.
    pub fn clear_polygons(&mut self) -> usize {
        let ids: Vec<ShapeId> = self.polygons().map(|(id, _)| id).collect();
        for id in &ids {
            self.remove(*id);
        }
        ids.len()
    }

    /// Render-visibility flag for shapes, drafts and coordinate labels.
    pub fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Adds a coordinate label.
    pub fn add_label(&mut self, label: CoordinateLabel) {
        self.labels.push(label);
    }

    pub fn labels(&self) -> &[CoordinateLabel] {
        &self.labels
    }

    /// Removes labels produced by one tool. Returns how many were removed.
    pub fn clear_labels(&mut self, origin: LabelOrigin) -> usize {
        let before = self.labels.len();
        self.labels.retain(|label| label.origin != origin);
        before - self.labels.len()
    }

    /// Iterates shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredShape> {
        self.shapes.iter()
    }

    pub fn lines(&self) -> impl Iterator<Item = (ShapeId, &LineShape)> {
        self.shapes
            .iter()
            .filter_map(|s| s.shape.as_line().map(|line| (s.id, line)))
    }

    pub fn polygons(&self) -> impl Iterator<Item = (ShapeId, &PolygonShape)> {
        self.shapes
            .iter()
            .filter_map(|s| s.shape.as_polygon().map(|poly| (s.id, poly)))
    }

    /// Returns the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
