//! File logging with tracing
//!
//! The TUI owns the terminal, so logs go to a daily rolling file under
//! `<data_local_dir>/pokedex-explorer/logs/`. The filter is read from
//! `POKEDEX_LOG`, e.g. `POKEDEX_LOG=debug pokedex-explorer`.

use std::io;
use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "POKEDEX_LOG";
const DEFAULT_FILTER: &str = "pokedex_explorer=info,warn";

pub fn init() -> io::Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "pokedex-explorer.log");
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(dir = %log_dir.display(), "pokedex explorer starting");
    Ok(log_dir)
}

fn log_directory() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("pokedex-explorer").join("logs")
}
