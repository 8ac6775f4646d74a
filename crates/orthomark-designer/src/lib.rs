//! # OrthoMark Designer
//!
//! Interactive drafting over a georeferenced orthophoto: the shape store,
//! endpoint snapping, the per-tool state machines and the flat exporters.
//!
//! ## Core Components
//!
//! - **ShapeStore**: lines, polygons and coordinate labels with stable ids
//! - **SnapIndex**: nearest line endpoint within a pixel threshold
//! - **Tools**: line, polygon, erase, point-coordinate, dimension, annotate
//!   and coordinate-pick state machines behind one [`ActiveTool`]
//! - **Session**: owns the dataset, document and active tool; dispatches events
//! - **Export**: PNG overlay with north arrow and scale bar, DXF, survey CSV
//!
//! ## Architecture
//!
//! ```text
//! Session
//!   ├── Dataset (CoordinateTransformer + elevation sources)
//!   ├── Document
//!   │     ├── ShapeStore (lines, polygons, labels)
//!   │     └── dimensions, annotations, survey points
//!   └── ActiveTool ── ToolContext ──> SnapIndex
//!
//! Exporter / DXF / CSV (read the Document)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orthomark_designer::{PointerButton, ScriptedPrompt, Session, ToolKind};
//!
//! let mut session = Session::default();
//! session.start_tool(ToolKind::Line);
//! session.pointer_down((0.0, 0.0).into(), PointerButton::Primary, &mut ScriptedPrompt::new());
//! session.pointer_down((40.0, 30.0).into(), PointerButton::Primary, &mut ScriptedPrompt::new());
//! session.export_dxf("overlay.dxf".as_ref())?;
//! ```

pub mod commands;
pub mod dataset;
pub mod document;
pub mod export;
pub mod font_manager;
pub mod labels;
pub mod notice;
pub mod prompt;
pub mod session;
pub mod shape_store;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use commands::{CommandError, Reply, SessionCommand};
pub use dataset::Dataset;
pub use document::Document;
pub use export::{ExportError, ExportOptions, Exporter};
pub use labels::{
    Annotation, CoordinateLabel, DimensionAnnotation, DistanceUnit, LabelOrigin, SurveyPoint,
};
pub use notice::Notice;
pub use prompt::{CancelPrompt, PromptFields, PromptKind, ScriptedPrompt, TextPrompt};
pub use session::{Session, SessionOptions, SessionStatus};
pub use shape_store::ShapeStore;
pub use shapes::{LineShape, PolygonShape, Shape, ShapeColor, StoredShape};
pub use snap::{SnapIndex, SnapResult, DEFAULT_SNAP_THRESHOLD};
pub use tools::{ActiveTool, Commit, Draft, PointerButton, ToolContext, ToolKind, ToolOutcome};
