//! Informational notices.
//!
//! Nothing a tool does is fatal to the session. Conditions the user should
//! hear about are reported as a [`Notice`] instead of an error.

use std::fmt;

use orthomark_core::{Error, TransformError};

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The tool needs a loaded dataset.
    NoDataset,
    /// The user dismissed the text capture dialog.
    PromptCancelled,
    /// The text capture dialog came back with an empty field.
    IncompleteFields,
    /// A coordinate could not be transformed and no fallback applies.
    TransformFailed(TransformError),
    /// A polygon was rejected for having too few vertices.
    DegenerateShape(usize),
    /// `set-color` was given a name outside the palette.
    UnknownColor(String),
    /// An export had nothing to write.
    NothingToExport(&'static str),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoDataset => write!(f, "No orthophoto loaded"),
            Notice::PromptCancelled => write!(f, "Cancelled"),
            Notice::IncompleteFields => write!(f, "Both fields are required"),
            Notice::TransformFailed(e) => write!(f, "Coordinate transform failed: {}", e),
            Notice::DegenerateShape(n) => write!(f, "Polygon needs at least 3 vertices, got {}", n),
            Notice::UnknownColor(name) => write!(f, "Unknown colour: {}", name),
            Notice::NothingToExport(what) => write!(f, "No {} to export", what),
        }
    }
}

impl From<Error> for Notice {
    fn from(err: Error) -> Self {
        match err {
            Error::Transform(e) => Notice::TransformFailed(e),
            Error::DegenerateShape { vertices } => Notice::DegenerateShape(vertices),
            Error::NoDataset => Notice::NoDataset,
        }
    }
}
