//! Static raster overlay renderer.
//! Draws the document over a white canvas using tiny-skia for geometry and rusttype for text.
//!
//! Layout:
//! - Source pixel coordinates inside the view map linearly onto the output width
//! - Sizes given in points scale with the output DPI
//! - North arrow upper-right, scale bar lower-middle, annotation legend lower-left

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use orthomark_core::{Bounds, CoordinateTransformer, Point};
use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};
use tracing::{debug, info};

use super::{ExportError, ExportOptions};
use crate::document::Document;
use crate::font_manager;

/// Largest edge the renderer will allocate.
const MAX_EDGE: u32 = 16_384;

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [255, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const YELLOW: [u8; 3] = [255, 255, 0];

fn paint(rgb: [u8; 3], alpha: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(rgb[0], rgb[1], rgb[2], alpha));
    paint.anti_alias = true;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        ..Default::default()
    }
}

/// Renders a document to a flat RGB image.
#[derive(Debug, Clone, Copy)]
pub struct Exporter<'a> {
    options: ExportOptions,
    transformer: Option<&'a CoordinateTransformer>,
}

impl<'a> Exporter<'a> {
    /// Creates a new exporter without georeferencing; the scale bar is omitted.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            transformer: None,
        }
    }

    pub fn with_transformer(mut self, transformer: &'a CoordinateTransformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Output raster size for a view: fixed width, height following the view aspect ratio.
    pub fn output_size(&self, view: &Bounds) -> Result<(u32, u32), ExportError> {
        if !view.is_valid() {
            return Err(ExportError::InvalidView);
        }
        let width = (f64::from(self.options.dpi) * self.options.width_in).round();
        let height = (width * view.height() / view.width()).round().max(1.0);
        let (w, h) = (width.max(0.0) as u32, height as u32);
        if w == 0 || w > MAX_EDGE || height > f64::from(MAX_EDGE) {
            return Err(ExportError::InvalidSize {
                width: w,
                height: h,
            });
        }
        Ok((w, h))
    }

    /// Scale-bar ratio: ground metres from the view centre to its right edge
    /// over the full view width in pixels. `None` when the view cannot be
    /// georeferenced.
    pub fn scale(&self, view: &Bounds) -> Option<f64> {
        let transformer = self.transformer?;
        let width = view.width();
        if !(width > 0.0) {
            return None;
        }
        let center = view.center();
        let edge = Point::new(view.max_x, center.y);
        match transformer.ground_distance(center, edge) {
            Ok(d) if d.is_finite() && d > 0.0 => Some(d / width),
            Ok(_) => None,
            Err(e) => {
                debug!("Scale bar omitted: {}", e);
                None
            }
        }
    }

    /// Render the document as seen through `view`.
    pub fn render(&self, document: &Document, view: &Bounds) -> Result<RgbImage, ExportError> {
        let (width, height) = self.output_size(view)?;
        let Some(mut pixmap) = Pixmap::new(width, height) else {
            return Err(ExportError::InvalidSize { width, height });
        };
        pixmap.fill(Color::WHITE);

        let mut canvas = OverlayCanvas {
            pixmap: &mut pixmap,
            view: *view,
            zoom: width as f64 / view.width(),
            pt: self.options.dpi as f32 / 72.0,
            font: font_manager::label_font(),
        };

        if document.shapes.is_visible() {
            canvas.draw_shapes(document);
        }
        canvas.draw_dimensions(document);
        canvas.draw_annotations(document);
        canvas.draw_north_arrow();
        if let Some(m_per_px) = self.scale(view) {
            canvas.draw_scale_bar(&self.options, m_per_px);
        }

        // Convert Pixmap to RgbImage
        let data = pixmap.data();
        Ok(RgbImage::from_fn(width, height, |x, y| {
            let idx = ((y * width + x) * 4) as usize;
            Rgb([data[idx], data[idx + 1], data[idx + 2]])
        }))
    }

    /// Render and write a PNG. Returns the output size.
    pub fn save_png(
        &self,
        document: &Document,
        view: &Bounds,
        path: &Path,
    ) -> Result<(u32, u32), ExportError> {
        let image = self.render(document, view)?;
        image.save_with_format(path, ImageFormat::Png)?;
        info!(
            "Exported {}x{} PNG to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(image.dimensions())
    }
}

struct OverlayCanvas<'p> {
    pixmap: &'p mut Pixmap,
    view: Bounds,
    zoom: f64,
    /// Output pixels per typographic point.
    pt: f32,
    font: Option<&'static Font<'static>>,
}

impl OverlayCanvas<'_> {
    fn width(&self) -> f32 {
        self.pixmap.width() as f32
    }

    fn height(&self) -> f32 {
        self.pixmap.height() as f32
    }

    fn map(&self, p: Point) -> (f32, f32) {
        (
            ((p.x - self.view.min_x) * self.zoom) as f32,
            ((p.y - self.view.min_y) * self.zoom) as f32,
        )
    }

    fn draw_shapes(&mut self, document: &Document) {
        for (_, line) in document.shapes.lines() {
            let (x1, y1) = self.map(line.p1);
            let (x2, y2) = self.map(line.p2);
            let mut pb = PathBuilder::new();
            pb.move_to(x1, y1);
            pb.line_to(x2, y2);
            if let Some(path) = pb.finish() {
                self.pixmap.stroke_path(
                    &path,
                    &paint(line.color.rgb(), 255),
                    &stroke(self.pt),
                    Transform::identity(),
                    None,
                );
            }
        }

        for (_, polygon) in document.shapes.polygons() {
            let mut pb = PathBuilder::new();
            for (i, v) in polygon.vertices().iter().enumerate() {
                let (x, y) = self.map(*v);
                if i == 0 {
                    pb.move_to(x, y);
                } else {
                    pb.line_to(x, y);
                }
            }
            pb.close();
            if let Some(path) = pb.finish() {
                let mut dashed = stroke(self.pt);
                dashed.dash = StrokeDash::new(vec![4.0 * self.pt, 2.0 * self.pt], 0.0);
                self.pixmap.stroke_path(
                    &path,
                    &paint(RED, 255),
                    &dashed,
                    Transform::identity(),
                    None,
                );
            }
        }

        let size = 8.0 * self.pt;
        for label in document.shapes.labels() {
            let (x, y) = self.map(label.position);
            let Some((w, h)) = self.measure(&label.text, size) else {
                continue;
            };
            let pad = 2.0 * self.pt;
            // anchored at the box's lower-left corner
            let top = y - h - 2.0 * pad;
            self.fill_box(x, top, w + 2.0 * pad, h + 2.0 * pad, WHITE, 178, None);
            self.draw_text(&label.text, x + pad, top + pad, size, BLACK);
        }
    }

    fn draw_dimensions(&mut self, document: &Document) {
        let size = 12.0 * self.pt;
        for dim in document.dimensions() {
            let (x1, y1) = self.map(dim.start);
            let (x2, y2) = self.map(dim.end);
            let mut pb = PathBuilder::new();
            pb.move_to(x1, y1);
            pb.line_to(x2, y2);
            if let Some(path) = pb.finish() {
                self.pixmap.stroke_path(
                    &path,
                    &paint(BLUE, 255),
                    &stroke(2.0 * self.pt),
                    Transform::identity(),
                    None,
                );
            }
            let text = dim.label_text();
            if let Some((w, h)) = self.measure(&text, size) {
                let (cx, cy) = self.map(dim.label_position());
                self.draw_text(&text, cx - w / 2.0, cy - h / 2.0, size, BLUE);
            }
        }
    }

    fn draw_annotations(&mut self, document: &Document) {
        let annotations = document.annotations();
        if annotations.is_empty() {
            return;
        }

        let size = 10.0 * self.pt;
        let pad = 2.0 * self.pt;
        for a in annotations {
            let token = a.order.to_string();
            let (x, y) = self.map(a.position);
            if let Some((w, h)) = self.measure(&token, size) {
                let (bw, bh) = (w + 2.0 * pad, h + 2.0 * pad);
                self.fill_box(x - bw / 2.0, y - bh / 2.0, bw, bh, YELLOW, 128, Some(RED));
                self.draw_text(&token, x - w / 2.0, y - h / 2.0, size, RED);
            }
        }

        let legend: String = annotations
            .iter()
            .map(|a| format!("{}. {}", a.order, a.content))
            .collect::<Vec<_>>()
            .join("\n");
        let size = 14.0 * self.pt;
        if let Some((w, h)) = self.measure(&legend, size) {
            let pad = 4.0 * self.pt;
            let left = 0.02 * self.width();
            let top = 0.98 * self.height() - h - 2.0 * pad;
            self.fill_box(left, top, w + 2.0 * pad, h + 2.0 * pad, WHITE, 204, Some(BLACK));
            self.draw_text(&legend, left + pad, top + pad, size, BLACK);
        }
    }

    fn draw_north_arrow(&mut self) {
        let (w, h) = (self.width(), self.height());
        let x = 0.98 * w;
        let (tail, tip) = (0.20 * h, 0.10 * h);
        let head = (tail - tip) * 0.3;

        let mut pb = PathBuilder::new();
        pb.move_to(x, tail);
        pb.line_to(x, tip);
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint(RED, 255),
                &stroke(2.0 * self.pt),
                Transform::identity(),
                None,
            );
        }
        let mut pb = PathBuilder::new();
        pb.move_to(x, tip);
        pb.line_to(x - head / 2.0, tip + head);
        pb.line_to(x + head / 2.0, tip + head);
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &paint(RED, 255),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }

        let size = 14.0 * self.pt;
        if let Some((tw, th)) = self.measure("N", size) {
            self.draw_text("N", x - tw / 2.0, 0.05 * h - th / 2.0, size, RED);
        }
    }

    fn draw_scale_bar(&mut self, options: &ExportOptions, m_per_px: f64) {
        let bar = (options.scale_bar_length_px * self.zoom) as f32;
        let tick_step = options.scale_bar_tick_px * self.zoom;
        if bar <= 0.0 || tick_step <= 0.0 {
            return;
        }
        let x0 = 0.4 * self.width();
        let y0 = 0.9 * self.height();
        let tick_len = 15.0 * self.pt;

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x0 + bar, y0);
        let ticks = (options.scale_bar_length_px / options.scale_bar_tick_px).floor() as usize;
        for i in 0..=ticks {
            let tx = x0 + (i as f64 * tick_step) as f32;
            pb.move_to(tx, y0);
            pb.line_to(tx, y0 - tick_len);
        }
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint(BLACK, 255),
                &stroke(self.pt),
                Transform::identity(),
                None,
            );
        }

        let size = 8.0 * self.pt;
        for i in 0..=ticks {
            let meters = i as f64 * options.scale_bar_tick_px * m_per_px;
            let text = format!("{:.1}m", meters);
            if let Some((w, h)) = self.measure(&text, size) {
                let tx = x0 + (i as f64 * tick_step) as f32;
                self.draw_text(&text, tx - w / 2.0, y0 - tick_len - h - self.pt, size, BLACK);
            }
        }

        let caption = format!("1 : {:.2} m/px", m_per_px);
        let size = 10.0 * self.pt;
        if let Some((w, _)) = self.measure(&caption, size) {
            self.draw_text(&caption, x0 + bar / 2.0 - w / 2.0, y0 + 2.0 * self.pt, size, BLACK);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_box(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: [u8; 3],
        alpha: u8,
        edge: Option<[u8; 3]>,
    ) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint(fill, alpha), Transform::identity(), None);
        if let Some(edge) = edge {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.stroke_path(
                &path,
                &paint(edge, 255),
                &stroke(self.pt),
                Transform::identity(),
                None,
            );
        }
    }

    /// Width and height of a (possibly multi-line) text block, or `None` without a font.
    fn measure(&self, text: &str, size: f32) -> Option<(f32, f32)> {
        let font = self.font?;
        let scale = Scale::uniform(size);
        let v = font.v_metrics(scale);
        let line_height = v.ascent - v.descent + v.line_gap;
        let mut width = 0.0f32;
        let mut lines = 0;
        for line in text.lines() {
            lines += 1;
            let w = font
                .layout(line, scale, rt_point(0.0, 0.0))
                .last()
                .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0);
            width = width.max(w);
        }
        Some((width, line_height * lines.max(1) as f32))
    }

    /// Draw text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, rgb: [u8; 3]) {
        let Some(font) = self.font else {
            return;
        };
        let scale = Scale::uniform(size);
        let v = font.v_metrics(scale);
        let line_height = v.ascent - v.descent + v.line_gap;
        let (width, height) = (self.pixmap.width() as i32, self.pixmap.height() as i32);

        for (row, line) in text.lines().enumerate() {
            let start = rt_point(x, y + v.ascent + row as f32 * line_height);
            for glyph in font.layout(line, scale, start) {
                let Some(bb) = glyph.pixel_bounding_box() else {
                    continue;
                };
                let data = self.pixmap.data_mut();
                glyph.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || px >= width || py < 0 || py >= height || coverage <= 0.0 {
                        return;
                    }
                    let idx = ((py * width + px) * 4) as usize;
                    let pixel = &mut data[idx..idx + 4];
                    // background is opaque, so plain source-over on the colour channels
                    let a = coverage.min(1.0);
                    for c in 0..3 {
                        let dst = f32::from(pixel[c]);
                        pixel[c] = (f32::from(rgb[c]) * a + dst * (1.0 - a)).round() as u8;
                    }
                    pixel[3] = 255;
                });
            }
        }
    }
}
