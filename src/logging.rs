// 📝 Logging - env_logger setup for both run modes
//
// RUST_LOG overrides the default level whenever a destination exists
// (stderr, or the configured TUI log file).

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// Plain CLI use: log to stderr, warnings and up by default
pub fn init_stderr() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();
}

/// Interactive use: stderr belongs to the terminal UI, so logs go to a
/// file, or nowhere when no file is configured.
pub fn init_for_tui(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    let _ = builder.try_init();
    Ok(())
}
