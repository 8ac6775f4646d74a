//! # OrthoMark
//!
//! Annotation toolkit for georeferenced orthophotos:
//! - Pixel to geographic coordinate readout in DMS, with DSM/DOM altitudes
//! - CAD-style line and polygon drafting with endpoint snapping
//! - Distance measurement, numbered annotations and survey point capture
//! - PNG overlay (north arrow, scale bar), DXF and survey CSV export
//!
//! ## Architecture
//!
//! The workspace is organized as multiple crates:
//!
//! 1. **orthomark-core** - Geometry, CRS catalogue, projections, `CoordinateTransformer`
//! 2. **orthomark-designer** - Shape store, snapping, tool state machines, exporters
//! 3. **orthomark-settings** - JSON/TOML configuration
//! 4. **orthomark** - Logging setup and a line-oriented console host

use std::io::{BufRead, Lines, Write};

use tracing::{debug, warn};

pub use orthomark_core as core;
pub use orthomark_designer as designer;
pub use orthomark_settings as settings;

pub use orthomark_core::{AffineTransform, Bounds, CoordinateTransformer, Crs, Point};
pub use orthomark_designer::{
    PromptFields, PromptKind, Reply, Session, SessionCommand, SessionOptions, TextPrompt, ToolKind,
};
pub use orthomark_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, leaving stdout to the console protocol
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Build a session from validated configuration.
pub fn session_from_config(config: &Config) -> anyhow::Result<Session> {
    Ok(Session::new(config.session_options()?))
}

/// Answers text prompts with the next two input lines. End of input cancels.
pub struct LinePrompt<'a, R> {
    lines: &'a mut Lines<R>,
}

impl<'a, R: BufRead> LinePrompt<'a, R> {
    pub fn new(lines: &'a mut Lines<R>) -> Self {
        Self { lines }
    }

    fn next_line(&mut self) -> Option<String> {
        match self.lines.next()? {
            Ok(line) => Some(line),
            Err(e) => {
                warn!("Prompt input failed: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead> TextPrompt for LinePrompt<'_, R> {
    fn request(&mut self, kind: PromptKind) -> Option<PromptFields> {
        let (first_label, second_label) = kind.field_labels();
        debug!("Prompting for {} / {}", first_label, second_label);
        let first = self.next_line()?;
        let second = self.next_line()?;
        Some(PromptFields::new(first, second))
    }
}

/// Drive a session from line-oriented input until `quit` or end of input.
///
/// Every command gets one reply line on `output`. Malformed commands and
/// failed exports are reported and the loop continues. Returns the number of
/// commands executed.
pub fn run_console<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> anyhow::Result<usize> {
    let mut lines = input.lines();
    let mut executed = 0;
    while let Some(line) = lines.next() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {}", e)?;
                continue;
            }
        };
        executed += 1;
        let mut prompt = LinePrompt::new(&mut lines);
        match session.apply(command, &mut prompt) {
            Ok(Reply::Quit) => {
                writeln!(output, "{}", Reply::Quit)?;
                break;
            }
            Ok(reply) => writeln!(output, "{}", reply)?,
            Err(e) => writeln!(output, "error: {}", e)?,
        }
    }
    output.flush()?;
    Ok(executed)
}
