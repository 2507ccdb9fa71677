//! Structured logging for deck embeddings.
//!
//! Built on the `tracing` ecosystem: a JSON fmt layer writing to a
//! non-blocking rolling file appender, filtered through `EnvFilter`. Each
//! run gets a UUID v7 run id that names the log file
//! (`pagedeck-<run_id>.json`) and tags telemetry exports, and old run logs
//! are cleaned up against a retention limit at initialization.
//!
//! The log level comes from [`LoggingSettings`] and can be overridden with
//! `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=debug ./pagedeck-emulator
//! RUST_LOG=pagedeck_core::view=trace,info ./pagedeck-emulator
//! ```

use crate::settings::LoggingSettings;
#[cfg(feature = "otel")]
use crate::telemetry;
use anyhow::{Context as ResultExt, Error};
use std::fs;
use std::fs::DirEntry;
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const GIT_VERSION: &str = env!("GIT_VERSION");
const LOG_FILE_PREFIX: &str = "pagedeck-";
const LOG_FILE_SUFFIX: &str = "json";

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Returns the unique run ID for this process.
///
/// Generated on first access and constant afterwards; used to name the log
/// file and to tag telemetry exports.
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

/// Removes old run logs so at most `max_files` remain.
///
/// Run ids are UUID v7 and therefore timestamp-sortable, so lexicographic
/// order of the filenames is chronological order; sorting by name yields
/// oldest-first for removal. `max_files == 0` keeps everything.
fn cleanup_run_logs(log_dir: &std::path::Path, max_files: usize) -> Result<(), Error> {
    if max_files == 0 {
        return Ok(());
    }

    let mut entries = collect_run_log_entries(log_dir)?;
    if entries.len() <= max_files {
        return Ok(());
    }

    entries.sort_by_key(|entry| entry.file_name());
    let remove_count = entries.len().saturating_sub(max_files);
    for entry in entries.into_iter().take(remove_count) {
        fs::remove_file(entry.path())
            .with_context(|| format!("can't remove old log file {}", entry.path().display()))?;
    }

    Ok(())
}

fn collect_run_log_entries(log_dir: &std::path::Path) -> Result<Vec<DirEntry>, Error> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
    {
        let entry = entry.context("can't read log directory entry")?;
        if is_run_log_entry(&entry) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

fn is_run_log_entry(entry: &DirEntry) -> bool {
    let file_name = entry.file_name();
    let file_name = file_name.to_string_lossy();
    if !file_name.starts_with(LOG_FILE_PREFIX) {
        return false;
    }

    file_name.ends_with(LOG_FILE_SUFFIX)
}

/// Initializes the logging system.
///
/// Creates the log directory, applies the retention policy, wires the JSON
/// fmt layer onto a non-blocking appender, and installs the subscriber.
/// With the `otel` feature, also attaches the OTLP export layer. Call once
/// at startup; a disabled configuration is a no-op.
///
/// # Errors
///
/// Fails when the log directory can't be created, old logs can't be
/// removed, the filter doesn't parse, or a global subscriber is already
/// installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let current_working_dir =
        std::env::current_dir().context("can't get current working directory")?;
    let log_dir = current_working_dir.join(&settings.directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", &log_dir.display()))?;

    cleanup_run_logs(&log_dir, settings.max_files)?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(settings.max_files)
        .build(&log_dir)
        .context("can't initialize rolling log file appender")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    let filter = build_filter(settings)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_current_span(true);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    #[cfg(feature = "otel")]
    let subscriber = subscriber.with(telemetry::init_telemetry(settings, get_run_id())?);

    subscriber
        .try_init()
        .context("can't initialize tracing subscriber")?;

    eprintln!(
        "Pagedeck run started with ID: {} (version {})",
        get_run_id(),
        GIT_VERSION
    );

    Ok(())
}

/// Flushes buffered log data and shuts the logging system down.
///
/// Dropping the appender guard flushes the file buffer; the drop happens on
/// a helper thread with a timeout so a wedged writer can't hang process
/// exit. With the `otel` feature, also flushes the telemetry providers.
pub fn shutdown_logging() {
    if let Some(mutex) = LOG_GUARD.get() {
        if let Ok(mut guard_opt) = mutex.lock() {
            if let Some(guard) = guard_opt.take() {
                let (tx, rx) = mpsc::channel();

                thread::spawn(move || {
                    drop(guard);
                    let _ = tx.send(());
                });

                let _ = rx.recv_timeout(Duration::from_secs(5));
                eprintln!("Logging shutdown complete.");
            }
        }
    }

    #[cfg(feature = "otel")]
    telemetry::shutdown_telemetry();
}

/// Builds an `EnvFilter` from `RUST_LOG` or, failing that, the configured
/// level ("info" when empty).
fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = settings.level.trim();
    let level = if level.is_empty() { "info" } else { level };

    EnvFilter::builder()
        .parse(level)
        .context("invalid logging level")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_log_file(dir: &std::path::Path, index: usize) -> Result<(), Error> {
        let file_name = format!("{}{:04}.{}", LOG_FILE_PREFIX, index, LOG_FILE_SUFFIX);
        fs::write(dir.join(file_name), b"{}")?;
        Ok(())
    }

    fn collect_log_file_names(dir: &std::path::Path) -> Result<Vec<String>, Error> {
        let mut entries = collect_run_log_entries(dir)?;
        entries.sort_by_key(|entry| entry.file_name());
        Ok(entries
            .into_iter()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect())
    }

    #[test]
    fn cleanup_removes_oldest_entries() -> Result<(), Error> {
        let temp_dir = TempDir::new()?;
        for index in 1..=5 {
            create_log_file(temp_dir.path(), index)?;
        }

        cleanup_run_logs(temp_dir.path(), 3)?;

        let remaining = collect_log_file_names(temp_dir.path())?;
        assert_eq!(remaining.len(), 3);
        assert_eq!(
            remaining,
            vec![
                format!("{}0003.{}", LOG_FILE_PREFIX, LOG_FILE_SUFFIX),
                format!("{}0004.{}", LOG_FILE_PREFIX, LOG_FILE_SUFFIX),
                format!("{}0005.{}", LOG_FILE_PREFIX, LOG_FILE_SUFFIX),
            ]
        );

        Ok(())
    }

    #[test]
    fn cleanup_with_zero_retention_keeps_all() -> Result<(), Error> {
        let temp_dir = TempDir::new()?;
        for index in 1..=3 {
            create_log_file(temp_dir.path(), index)?;
        }

        cleanup_run_logs(temp_dir.path(), 0)?;

        let remaining = collect_log_file_names(temp_dir.path())?;
        assert_eq!(remaining.len(), 3);

        Ok(())
    }

    #[test]
    fn foreign_files_are_not_log_entries() -> Result<(), Error> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("notes.txt"), b"not a log")?;
        create_log_file(temp_dir.path(), 1)?;

        let entries = collect_log_file_names(temp_dir.path())?;
        assert_eq!(entries.len(), 1);

        Ok(())
    }
}
