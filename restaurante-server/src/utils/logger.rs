//! Logging Infrastructure
//!
//! Console logging by default; a daily rolling file under `log_dir` when one
//! is configured. Production switches to JSON lines. `RUST_LOG` takes
//! precedence over the configured level.

use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Filter directives for a level such as `debug`
fn directives(level: &str) -> String {
    format!("restaurante_server={level},http_access={level},tower_http={level},sqlx=warn")
}

fn build_filter(log_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(log_level.unwrap_or("info"))))
}

/// Daily rolling file when the directory is usable, stdout otherwise.
/// The flag tells whether ANSI colors make sense for the writer.
fn make_writer(log_dir: Option<&str>) -> (BoxMakeWriter, bool) {
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "restaurante-server");
            return (BoxMakeWriter::new(file_appender), false);
        }
        eprintln!("Cannot create log directory {dir}, logging to stdout");
    }
    (BoxMakeWriter::new(std::io::stdout), true)
}

/// Initialize the logger with optional JSON format and file output
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let (writer, ansi) = make_writer(log_dir);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
