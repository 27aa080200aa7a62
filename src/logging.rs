// src/logging.rs
//! Request access log: one line per finished HTTP request, appended to
//! `<LOG_DIR>/server.log` next to the regular stdout logging.
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::Path,
};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{filter::Targets, fmt, registry::LookupSpan, Layer};

pub const ACCESS_LOG_FILE: &str = "server.log";

/// Creates the log directory if needed and opens the access log for appending.
pub fn open_access_log(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(ACCESS_LOG_FILE))
}

/// Only `tower_http` request spans and responses reach the file.
pub fn access_log_filter() -> Targets {
    Targets::new().with_target("tower_http", Level::INFO)
}

pub fn access_log_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .with_filter(access_log_filter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn log_directory_is_created_and_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("logs");

        writeln!(open_access_log(&nested).unwrap(), "first").unwrap();
        writeln!(open_access_log(&nested).unwrap(), "second").unwrap();

        let text = fs::read_to_string(nested.join(ACCESS_LOG_FILE)).unwrap();
        assert_eq!(text, "first\nsecond\n");
    }

    #[test]
    fn filter_keeps_request_events_only() {
        let filter = access_log_filter();
        assert!(filter.would_enable("tower_http::trace::on_response", &Level::INFO));
        assert!(!filter.would_enable("tower_http::trace::on_request", &Level::DEBUG));
        assert!(!filter.would_enable("mind_assessment::web", &Level::INFO));
        assert!(!filter.would_enable("sqlx::query", &Level::WARN));
    }

    #[test]
    fn requests_are_written_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let (writer, guard) = tracing_appender::non_blocking(open_access_log(dir.path()).unwrap());
        let subscriber = tracing_subscriber::registry().with(access_log_layer(writer));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(
                target: "tower_http::trace::on_response",
                status = 200,
                "finished processing request"
            );
            tracing::info!(target: "mind_assessment::web", "handler detail");
        });
        // Dropping the guard flushes the background writer.
        drop(guard);

        let text = fs::read_to_string(dir.path().join(ACCESS_LOG_FILE)).unwrap();
        assert!(text.contains("finished processing request"));
        assert!(text.contains("status=200"));
        assert!(!text.contains("handler detail"));
        assert!(!text.contains('\u{1b}'));
    }
}
