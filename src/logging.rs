//! Tracing initialization for the command-line binary.

use std::path::Path;

use miette::{Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};


/// Set up the global tracing subscriber: a console layer, plus a
/// non-blocking log file layer when `log_file_output_directory` is given.
///
/// The returned guard must be kept alive until the program exits,
/// otherwise buffered log lines may be lost.
pub fn initialize_tracing(
    console_output_level_filter: EnvFilter,
    log_file_output_level_filter: EnvFilter,
    log_file_output_directory: Option<&Path>,
    log_file_name: &str,
) -> Result<Option<WorkerGuard>> {
    let (log_file_layer, worker_guard) = match log_file_output_directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::never(directory, log_file_name);
            let (non_blocking_writer, worker_guard) = tracing_appender::non_blocking(file_appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_writer)
                .with_filter(log_file_output_level_filter);

            (Some(layer), Some(worker_guard))
        }
        None => (None, None),
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_output_level_filter);

    tracing_subscriber::registry()
        .with(log_file_layer)
        .with(console_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to initialize the tracing subscriber.")?;

    Ok(worker_guard)
}
