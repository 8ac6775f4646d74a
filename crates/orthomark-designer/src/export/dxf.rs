//! DXF vector export.
//!
//! Geometry is written in raw pixel coordinates, one layer per content kind.

use std::path::Path;

use ::dxf::entities::{Entity, EntityType, Line, LwPolyline, Text};
use ::dxf::enums::AcadVersion;
use ::dxf::tables::Layer;
use ::dxf::{Color, Drawing, LwPolylineVertex, Point as DxfPoint};
use orthomark_core::Point;
use tracing::info;

use super::ExportError;
use crate::document::Document;

pub const LAYER_LINES: &str = "LINES";
pub const LAYER_POLYGONS: &str = "POLYGONS";
pub const LAYER_DIMENSIONS: &str = "DIMENSIONS";
pub const LAYER_LABELS: &str = "LABELS";

const LABEL_TEXT_HEIGHT: f64 = 8.0;
const DIMENSION_TEXT_HEIGHT: f64 = 12.0;

fn dxf_point(p: Point) -> DxfPoint {
    DxfPoint::new(p.x, p.y, 0.0)
}

fn on_layer(specific: EntityType, layer: &str, color: Option<Color>) -> Entity {
    let mut entity = Entity::new(specific);
    entity.common.layer = layer.to_string();
    if let Some(color) = color {
        entity.common.color = color;
    }
    entity
}

fn text_entity(at: Point, value: &str, height: f64) -> EntityType {
    EntityType::Text(Text {
        location: dxf_point(at),
        text_height: height,
        value: value.to_string(),
        ..Default::default()
    })
}

/// Build the drawing for a document's committed content.
pub fn build_drawing(document: &Document) -> Drawing {
    let mut drawing = Drawing::new();
    // LWPOLYLINE needs R13 or later
    drawing.header.version = AcadVersion::R2000;
    for (name, aci) in [
        (LAYER_LINES, 5),
        (LAYER_POLYGONS, 1),
        (LAYER_DIMENSIONS, 5),
        (LAYER_LABELS, 7),
    ] {
        drawing.add_layer(Layer {
            name: name.to_string(),
            color: Color::from_index(aci),
            ..Default::default()
        });
    }

    for (_, line) in document.shapes.lines() {
        let specific = EntityType::Line(Line::new(dxf_point(line.p1), dxf_point(line.p2)));
        drawing.add_entity(on_layer(
            specific,
            LAYER_LINES,
            Some(Color::from_index(line.color.aci())),
        ));
    }

    for (_, polygon) in document.shapes.polygons() {
        let mut poly = LwPolyline::default();
        poly.vertices = polygon
            .vertices()
            .iter()
            .map(|v| LwPolylineVertex {
                x: v.x,
                y: v.y,
                ..Default::default()
            })
            .collect();
        // bit 0: closed
        poly.flags |= 1;
        drawing.add_entity(on_layer(
            EntityType::LwPolyline(poly),
            LAYER_POLYGONS,
            None,
        ));
    }

    for dim in document.dimensions() {
        let specific = EntityType::Line(Line::new(dxf_point(dim.start), dxf_point(dim.end)));
        drawing.add_entity(on_layer(specific, LAYER_DIMENSIONS, None));
        drawing.add_entity(on_layer(
            text_entity(
                dim.label_position(),
                &dim.label_text(),
                DIMENSION_TEXT_HEIGHT,
            ),
            LAYER_DIMENSIONS,
            None,
        ));
    }

    for label in document.shapes.labels() {
        // DXF TEXT is single-line; DMS pairs are joined with a space
        let value = label.text.replace('\n', " ");
        drawing.add_entity(on_layer(
            text_entity(label.position, &value, LABEL_TEXT_HEIGHT),
            LAYER_LABELS,
            None,
        ));
    }

    drawing
}

/// Write the document to a DXF file. Returns the number of entities written.
pub fn export_dxf(document: &Document, path: &Path) -> Result<usize, ExportError> {
    let drawing = build_drawing(document);
    let count = drawing.entities().count();
    drawing.save_file(path)?;
    info!("Exported {} DXF entities to {}", count, path.display());
    Ok(count)
}
