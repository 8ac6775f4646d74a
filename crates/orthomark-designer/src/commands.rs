//! Line-oriented session commands.
//!
//! Hosts without a widget toolkit drive a [`Session`](crate::Session) with
//! one command per line, e.g. `start-line`, `click 10 20`, `export out.png`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use orthomark_core::{AffineTransform, Bounds, Point};
use thiserror::Error;

use crate::notice::Notice;
use crate::session::SessionStatus;
use crate::tools::{ToolKind, ToolOutcome};

/// Command parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The first word is not a command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// Wrong number of arguments
    #[error("{command} expects {expected}")]
    Arity {
        command: String,
        expected: &'static str,
    },

    /// An argument is not a number
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// One parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    LoadTransform(AffineTransform),
    Unload,
    View(Bounds),
    Start(ToolKind),
    Click(Point),
    RightClick(Point),
    Move(Point),
    Escape,
    SetColor(String),
    Show,
    Hide,
    ClearShapes,
    ClearPolygons,
    ClearAnnotations,
    ClearDimensions,
    ClearCoords,
    Export(PathBuf),
    ExportDxf(PathBuf),
    ExportCoords(PathBuf),
    Status,
    Quit,
}

fn numbers<const N: usize>(
    command: &str,
    args: &[&str],
    expected: &'static str,
) -> Result<[f64; N], CommandError> {
    if args.len() != N {
        return Err(CommandError::Arity {
            command: command.to_string(),
            expected,
        });
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandError::InvalidNumber(arg.to_string()))?;
    }
    Ok(out)
}

fn point(command: &str, args: &[&str]) -> Result<Point, CommandError> {
    let [x, y] = numbers::<2>(command, args, "x y")?;
    Ok(Point::new(x, y))
}

fn path(command: &str, rest: &str) -> Result<PathBuf, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Arity {
            command: command.to_string(),
            expected: "a path",
        });
    }
    Ok(PathBuf::from(rest))
}

impl SessionCommand {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let cmd = match command {
            "load-transform" => {
                let [a, b, c, d, e, f] = numbers::<6>(command, &args, "a b c d e f")?;
                SessionCommand::LoadTransform(AffineTransform::new(a, b, c, d, e, f))
            }
            "unload" => SessionCommand::Unload,
            "view" => {
                let [x0, y0, x1, y1] = numbers::<4>(command, &args, "x0 y0 x1 y1")?;
                SessionCommand::View(Bounds::new(x0, y0, x1, y1))
            }
            "click" => SessionCommand::Click(point(command, &args)?),
            "right-click" => SessionCommand::RightClick(point(command, &args)?),
            "move" => SessionCommand::Move(point(command, &args)?),
            "escape" => SessionCommand::Escape,
            "set-color" => {
                if rest.is_empty() {
                    return Err(CommandError::Arity {
                        command: command.to_string(),
                        expected: "a colour name",
                    });
                }
                SessionCommand::SetColor(rest.to_string())
            }
            "show" => SessionCommand::Show,
            "hide" => SessionCommand::Hide,
            "clear-shapes" => SessionCommand::ClearShapes,
            "clear-polygons" => SessionCommand::ClearPolygons,
            "clear-annotations" => SessionCommand::ClearAnnotations,
            "clear-dimensions" => SessionCommand::ClearDimensions,
            "clear-coords" => SessionCommand::ClearCoords,
            "export" => SessionCommand::Export(path(command, rest)?),
            "export-dxf" => SessionCommand::ExportDxf(path(command, rest)?),
            "export-coords" => SessionCommand::ExportCoords(path(command, rest)?),
            "status" => SessionCommand::Status,
            "quit" | "exit" => SessionCommand::Quit,
            other => match other.strip_prefix("start-").map(ToolKind::from_str) {
                Some(Ok(kind)) => SessionCommand::Start(kind),
                _ => return Err(CommandError::Unknown(other.to_string())),
            },
        };
        Ok(Some(cmd))
    }
}

/// What the session reports back for one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Done,
    Tool(ToolOutcome),
    Cleared(usize),
    Exported { path: PathBuf, detail: String },
    Status(SessionStatus),
    Notice(Notice),
    Quit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Done => write!(f, "ok"),
            Reply::Tool(ToolOutcome::Committed(commit)) => write!(f, "committed {:?}", commit),
            Reply::Tool(ToolOutcome::Notice(notice)) | Reply::Notice(notice) => {
                write!(f, "notice: {}", notice)
            }
            Reply::Tool(outcome) => write!(f, "{:?}", outcome),
            Reply::Cleared(n) => write!(f, "cleared {}", n),
            Reply::Exported { path, detail } => {
                write!(f, "exported {} ({})", path.display(), detail)
            }
            Reply::Status(status) => write!(f, "{}", status),
            Reply::Quit => write!(f, "bye"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_starts() {
        assert_eq!(
            SessionCommand::parse("start-point-coordinate").unwrap(),
            Some(SessionCommand::Start(ToolKind::PointCoordinate))
        );
        assert_eq!(
            SessionCommand::parse("start-annotation").unwrap(),
            Some(SessionCommand::Start(ToolKind::Annotate))
        );
        assert_eq!(
            SessionCommand::parse("start-coordinate-pick").unwrap(),
            Some(SessionCommand::Start(ToolKind::CoordinatePick))
        );
        assert!(matches!(
            SessionCommand::parse("start-spline"),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            SessionCommand::parse("  click 3 4.5 ").unwrap(),
            Some(SessionCommand::Click(Point::new(3.0, 4.5)))
        );
        assert_eq!(
            SessionCommand::parse("export out dir/overlay.png").unwrap(),
            Some(SessionCommand::Export(PathBuf::from("out dir/overlay.png")))
        );
        assert_eq!(
            SessionCommand::parse("set-color 红色").unwrap(),
            Some(SessionCommand::SetColor("红色".into()))
        );
        assert!(matches!(
            SessionCommand::parse("click 3"),
            Err(CommandError::Arity { .. })
        ));
        assert!(matches!(
            SessionCommand::parse("move 3 x"),
            Err(CommandError::InvalidNumber(_))
        ));
        assert_eq!(SessionCommand::parse("# comment").unwrap(), None);
    }
}
