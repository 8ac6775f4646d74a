use std::io::{self, BufWriter};
use std::path::PathBuf;

use orthomark::{init_logging, run_console, session_from_config, Config, BUILD_DATE, VERSION};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let mut config_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-V" | "--version" => {
                println!("orthomark {} (built {})", VERSION, BUILD_DATE);
                return Ok(());
            }
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config expects a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    // Initialize logging
    init_logging()?;

    let config = match config_path {
        Some(path) => Config::load_from_file(&path)?,
        None => Config::load_or_default().unwrap_or_else(|e| {
            warn!("Falling back to default config: {}", e);
            Config::default()
        }),
    };
    let mut session = session_from_config(&config)?;
    info!("OrthoMark {} ready, reading commands from stdin", VERSION);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let executed = run_console(&mut session, stdin.lock(), BufWriter::new(stdout.lock()))?;
    info!("Session ended after {} commands", executed);
    Ok(())
}
