//! Tracing initialization
//!
//! - Console: colored, compact format
//! - File (optional): daily rotation, no colors, thread ids and source lines

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::LoggingConfig;

/// Filter used when neither `RUST_LOG` nor the config provides one
const DEFAULT_FILTER: &str = "info,tapbridge_core=debug,tapbridge_host=debug";

/// Install the global subscriber.
///
/// Returns the file writer guard when file logging is on; keep it alive for
/// the lifetime of the program or buffered lines are lost. Calling this twice
/// leaves the first subscriber in place.
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| config.filter.as_deref().and_then(|f| EnvFilter::try_new(f).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let (file_layer, guard) = match config
        .resolved_log_dir()
        .and_then(|dir| file_writer(&dir, &config.file_prefix))
    {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already installed");
    }

    guard
}

fn file_writer(dir: &Path, prefix: &str) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
        return None;
    }

    // Creates files like: tapbridge.2026-10-15.log
    match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)
    {
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(e) => {
            eprintln!("Warning: Failed to create log file appender: {}", e);
            None
        }
    }
}
