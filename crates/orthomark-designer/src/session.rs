//! Session controller.
//!
//! A [`Session`] owns the loaded dataset, the committed [`Document`] and the
//! single [`ActiveTool`]. Host events go through it one at a time; the session
//! lends its context to the tool for the duration of each event.

use std::fmt;
use std::path::Path;

use orthomark_core::{AffineTransform, Bounds, CoordinateTransformer, Crs, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commands::{Reply, SessionCommand};
use crate::dataset::Dataset;
use crate::document::Document;
use crate::export::{self, ExportError, ExportOptions, Exporter};
use crate::labels::LabelOrigin;
use crate::notice::Notice;
use crate::prompt::{CancelPrompt, TextPrompt};
use crate::shapes::ShapeColor;
use crate::snap::DEFAULT_SNAP_THRESHOLD;
use crate::tools::{ActiveTool, Draft, PointerButton, ToolContext, ToolKind, ToolOutcome};

/// View used for export when neither an explicit view nor any content exists.
const FALLBACK_VIEW: Bounds = Bounds {
    min_x: 0.0,
    min_y: 0.0,
    max_x: 1000.0,
    max_y: 1000.0,
};

/// Margin added around content extents when deriving a view.
const CONTENT_MARGIN: f64 = 20.0;

/// Settings a session is created with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub snap_threshold: f64,
    pub color: ShapeColor,
    pub source_crs: Crs,
    pub target_crs: Crs,
    pub export: ExportOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            color: ShapeColor::default(),
            // CGCS2000 3-degree zone, central meridian 117E
            source_crs: Crs::from_epsg(4548).unwrap_or(Crs::CGCS2000),
            target_crs: Crs::CGCS2000,
            export: ExportOptions::default(),
        }
    }
}

/// Snapshot for the `status` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub tool: Option<ToolKind>,
    pub color: ShapeColor,
    pub dataset_loaded: bool,
    pub visible: bool,
    pub lines: usize,
    pub polygons: usize,
    pub labels: usize,
    pub dimensions: usize,
    pub annotations: usize,
    pub survey_points: usize,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tool={} color={} dataset={} visible={} lines={} polygons={} labels={} dimensions={} annotations={} points={}",
            self.tool.map(|k| k.name()).unwrap_or("idle"),
            self.color,
            self.dataset_loaded,
            self.visible,
            self.lines,
            self.polygons,
            self.labels,
            self.dimensions,
            self.annotations,
            self.survey_points
        )
    }
}

/// One interactive annotation session.
#[derive(Debug, Default)]
pub struct Session {
    options: SessionOptions,
    dataset: Option<Dataset>,
    document: Document,
    tool: ActiveTool,
    color: ShapeColor,
    view: Option<Bounds>,
}

impl Session {
    /// Creates a new session with no dataset and the Idle tool.
    pub fn new(options: SessionOptions) -> Self {
        Self {
            color: options.color,
            options,
            dataset: None,
            document: Document::new(),
            tool: ActiveTool::Idle,
            view: None,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Replace the loaded dataset.
    pub fn load_dataset(&mut self, dataset: Dataset) {
        info!(
            "Dataset loaded: {} -> {}, dom={}, dsm={}",
            dataset.transformer().source(),
            dataset.transformer().target(),
            dataset.has_dom(),
            dataset.has_dsm()
        );
        self.dataset = Some(dataset);
    }

    /// Load a dataset from a bare affine transform and the configured CRS pair.
    pub fn load_transform(&mut self, affine: AffineTransform) {
        let transformer =
            CoordinateTransformer::new(affine, self.options.source_crs, self.options.target_crs);
        self.load_dataset(Dataset::new(transformer));
    }

    pub fn unload(&mut self) {
        if self.dataset.take().is_some() {
            info!("Dataset unloaded");
        }
    }

    pub fn set_view(&mut self, view: Bounds) {
        self.view = Some(view);
    }

    /// Explicit view if set, otherwise the padded extents of all content.
    pub fn view_bounds(&self) -> Bounds {
        if let Some(view) = self.view.filter(Bounds::is_valid) {
            return view;
        }
        self.content_bounds().unwrap_or(FALLBACK_VIEW)
    }

    fn content_bounds(&self) -> Option<Bounds> {
        let doc = &self.document;
        if doc.is_empty() {
            return None;
        }
        let points = doc
            .shapes
            .lines()
            .flat_map(|(_, l)| l.endpoints())
            .chain(
                doc.shapes
                    .polygons()
                    .flat_map(|(_, p)| p.vertices().iter().copied()),
            )
            .chain(doc.shapes.labels().iter().map(|l| l.position))
            .chain(doc.dimensions().iter().flat_map(|d| [d.start, d.end]))
            .chain(doc.annotations().iter().map(|a| a.position));

        let mut extent: Option<(f64, f64, f64, f64)> = None;
        for p in points {
            extent = Some(match extent {
                None => (p.x, p.y, p.x, p.y),
                Some((x0, y0, x1, y1)) => (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
            });
        }
        let (x0, y0, x1, y1) = extent?;
        Some(Bounds::new(
            x0 - CONTENT_MARGIN,
            y0 - CONTENT_MARGIN,
            x1 + CONTENT_MARGIN,
            y1 + CONTENT_MARGIN,
        ))
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.tool.kind()
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    /// Set the line colour by palette name.
    pub fn set_color(&mut self, name: &str) -> Result<ShapeColor, Notice> {
        match ShapeColor::from_name(name) {
            Some(color) => {
                self.color = color;
                debug!("Colour set to {}", color);
                Ok(color)
            }
            None => {
                info!("Unknown colour {:?} ignored", name);
                Err(Notice::UnknownColor(name.trim().to_string()))
            }
        }
    }

    pub fn set_visibility(&mut self, visible: bool) {
        self.document.shapes.set_visibility(visible);
    }

    fn dispatch<F>(&mut self, prompt: &mut dyn TextPrompt, event: F) -> ToolOutcome
    where
        F: FnOnce(&mut ActiveTool, &mut ToolContext<'_>) -> ToolOutcome,
    {
        let mut ctx = ToolContext {
            dataset: self.dataset.as_ref(),
            document: &mut self.document,
            prompt,
            snap_threshold: self.options.snap_threshold,
            color: self.color,
        };
        let outcome = event(&mut self.tool, &mut ctx);
        match &outcome {
            ToolOutcome::Committed(commit) => info!("Committed {:?}", commit),
            ToolOutcome::Notice(notice) => info!("{}", notice),
            _ => {}
        }
        if self.tool.is_finished() {
            debug!("Tool finished, returning to idle");
            self.tool = ActiveTool::Idle;
        }
        outcome
    }

    /// Switch tools. The previous tool's exit action runs first, so an open
    /// polygon is closed and a pending line preview is dropped.
    pub fn start_tool(&mut self, kind: ToolKind) -> ToolOutcome {
        let outcome = self.stop_tool();
        info!("Tool started: {}", kind);
        self.tool = ActiveTool::start(kind);
        outcome
    }

    /// Escape: run the exit action and return to Idle.
    pub fn stop_tool(&mut self) -> ToolOutcome {
        let kind = self.tool.kind();
        let outcome = self.dispatch(&mut CancelPrompt, |tool, ctx| tool.stop(ctx));
        if let Some(kind) = kind {
            debug!("Tool stopped: {}", kind);
        }
        self.tool = ActiveTool::Idle;
        outcome
    }

    pub fn pointer_down(
        &mut self,
        point: Point,
        button: PointerButton,
        prompt: &mut dyn TextPrompt,
    ) -> ToolOutcome {
        self.dispatch(prompt, |tool, ctx| tool.pointer_down(ctx, point, button))
    }

    pub fn pointer_move(&mut self, point: Point) -> ToolOutcome {
        self.dispatch(&mut CancelPrompt, |tool, ctx| tool.pointer_move(ctx, point))
    }

    /// Draft geometry of the active tool; hidden together with the shapes.
    pub fn draft(&self) -> Option<Draft> {
        if !self.document.shapes.is_visible() {
            return None;
        }
        self.tool.draft()
    }

    /// Remove every line and polygon plus all coordinate labels.
    pub fn clear_shapes(&mut self) -> usize {
        let n = self.document.shapes.len();
        self.document.shapes.clear_all();
        info!("Cleared {} shapes", n);
        n
    }

    pub fn clear_polygons(&mut self) -> usize {
        self.document.shapes.clear_polygons()
    }

    pub fn clear_annotations(&mut self) -> usize {
        self.document.clear_annotations()
    }

    pub fn clear_dimensions(&mut self) -> usize {
        self.document.clear_dimensions()
    }

    /// Remove all survey points and the labels they placed.
    pub fn clear_coords(&mut self) -> usize {
        self.document.clear_survey_points()
    }

    /// Render the current view to a PNG file.
    pub fn export_png(&self, path: &Path) -> Result<(u32, u32), ExportError> {
        let view = self.view_bounds();
        let mut exporter = Exporter::new(self.options.export);
        if let Some(dataset) = &self.dataset {
            exporter = exporter.with_transformer(dataset.transformer());
        }
        exporter.save_png(&self.document, &view, path)
    }

    pub fn export_dxf(&self, path: &Path) -> Result<usize, ExportError> {
        export::export_dxf(&self.document, path)
    }

    /// Write the survey CSV. With no points nothing is written.
    pub fn export_coords(&self, path: &Path) -> Result<usize, ExportError> {
        export::export_survey_csv(self.document.survey_points(), path)
    }

    pub fn status(&self) -> SessionStatus {
        let shapes = &self.document.shapes;
        SessionStatus {
            tool: self.tool.kind(),
            color: self.color,
            dataset_loaded: self.dataset.is_some(),
            visible: shapes.is_visible(),
            lines: shapes.lines().count(),
            polygons: shapes.polygons().count(),
            labels: shapes
                .labels()
                .iter()
                .filter(|l| l.origin == LabelOrigin::Probe)
                .count(),
            dimensions: self.document.dimensions().len(),
            annotations: self.document.annotations().len(),
            survey_points: self.document.survey_points().len(),
        }
    }

    /// Execute one console command.
    ///
    /// Recoverable conditions come back as [`Reply::Notice`]; only export
    /// failures are errors.
    pub fn apply(
        &mut self,
        command: SessionCommand,
        prompt: &mut dyn TextPrompt,
    ) -> Result<Reply, ExportError> {
        let reply = match command {
            SessionCommand::LoadTransform(affine) => {
                self.load_transform(affine);
                Reply::Done
            }
            SessionCommand::Unload => {
                self.unload();
                Reply::Done
            }
            SessionCommand::View(view) => {
                if !view.is_valid() {
                    return Err(ExportError::InvalidView);
                }
                self.set_view(view);
                Reply::Done
            }
            SessionCommand::Start(kind) => Reply::Tool(self.start_tool(kind)),
            SessionCommand::Click(p) => {
                Reply::Tool(self.pointer_down(p, PointerButton::Primary, prompt))
            }
            SessionCommand::RightClick(p) => {
                Reply::Tool(self.pointer_down(p, PointerButton::Secondary, prompt))
            }
            SessionCommand::Move(p) => Reply::Tool(self.pointer_move(p)),
            SessionCommand::Escape => Reply::Tool(self.stop_tool()),
            SessionCommand::SetColor(name) => match self.set_color(&name) {
                Ok(_) => Reply::Done,
                Err(notice) => Reply::Notice(notice),
            },
            SessionCommand::Show => {
                self.set_visibility(true);
                Reply::Done
            }
            SessionCommand::Hide => {
                self.set_visibility(false);
                Reply::Done
            }
            SessionCommand::ClearShapes => Reply::Cleared(self.clear_shapes()),
            SessionCommand::ClearPolygons => Reply::Cleared(self.clear_polygons()),
            SessionCommand::ClearAnnotations => Reply::Cleared(self.clear_annotations()),
            SessionCommand::ClearDimensions => Reply::Cleared(self.clear_dimensions()),
            SessionCommand::ClearCoords => Reply::Cleared(self.clear_coords()),
            SessionCommand::Export(path) => {
                let (w, h) = self.export_png(&path)?;
                Reply::Exported {
                    path,
                    detail: format!("{}x{}", w, h),
                }
            }
            SessionCommand::ExportDxf(path) => {
                let n = self.export_dxf(&path)?;
                Reply::Exported {
                    path,
                    detail: format!("{} entities", n),
                }
            }
            SessionCommand::ExportCoords(path) => match self.export_coords(&path) {
                Ok(n) => Reply::Exported {
                    path,
                    detail: format!("{} points", n),
                },
                Err(ExportError::Empty(what)) => {
                    warn!("Nothing to export to {}", path.display());
                    Reply::Notice(Notice::NothingToExport(what))
                }
                Err(e) => return Err(e),
            },
            SessionCommand::Status => Reply::Status(self.status()),
            SessionCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }
}
