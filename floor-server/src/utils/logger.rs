//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production
//! environments.

use std::path::Path;

/// Initialize the logger with stderr output only.
pub fn init_logger(log_level: &str) {
    init_logger_with_file(log_level, None);
}

/// Initialize the logger, writing to a daily-rolling file when `log_dir`
/// points at an existing directory.
pub fn init_logger_with_file(log_level: &str, log_dir: Option<&Path>) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.exists()
        && let Some(dir_str) = dir.to_str()
    {
        let file_appender = tracing_appender::rolling::daily(dir_str, "floor-server");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
