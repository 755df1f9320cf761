//! Logging Infrastructure
//!
//! Console logging in development; when `ENVIRONMENT=production` the
//! output switches to JSON lines so log shippers can ingest it. An
//! optional daily-rolling file target is added when a log directory
//! exists.

use std::path::Path;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level
        .unwrap_or("info")
        .parse()
        .unwrap_or(tracing::Level::INFO);
    let json_output = std::env::var("ENVIRONMENT")
        .map(|v| v == "production")
        .unwrap_or(false);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|p| p.exists())
        .and_then(|p| p.to_str())
        .map(|dir| tracing_appender::rolling::daily(dir, "ravenhill-server"));

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    match (json_output, file_appender) {
        (true, Some(appender)) => subscriber.json().with_writer(appender).init(),
        (true, None) => subscriber.json().init(),
        (false, Some(appender)) => subscriber.with_writer(appender).init(),
        (false, None) => subscriber.init(),
    }
}
