//! Tracing setup for Sortbox.
//!
//! The configured level applies to Sortbox itself and to the HTTP request
//! spans from `tower_http`; every other crate logs warnings only. Setting
//! `RUST_LOG` replaces these defaults entirely.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Result, SortboxError};

/// Targets that follow the configured level.
const APP_TARGETS: &[&str] = &[env!("CARGO_CRATE_NAME"), "tower_http"];

/// Map a configured level name to a filter. Unknown names mean `info`.
fn level_filter(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => LevelFilter::OFF,
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Default filter directives for `level`, e.g. `sortbox=debug,tower_http=debug,warn`.
fn default_directives(level: &str) -> String {
    let level = level_filter(level);
    let mut directives: Vec<String> = APP_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    directives.push(LevelFilter::WARN.min(level).to_string());
    directives.join(",")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(File::options().create(true).append(true).open(path)?)
}

/// Install the global subscriber: stdout plus the configured log file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_file = open_log_file(Path::new(&config.file))?;
    let writer = std::io::stdout.and(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(build_filter(&config.level))
        .try_init()
        .map_err(|e| SortboxError::Config(e.to_string()))?;

    tracing::debug!(file = %config.file, "Logging to file");
    Ok(())
}

/// Install a stdout-only subscriber, used when the log file cannot be opened.
pub fn init_console_only(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(build_filter(level))
        .try_init();
}
