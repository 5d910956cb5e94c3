//! Logging bootstrap.
//!
//! - one-line JSON events in a daily rolling file
//! - colored `fmt` events on stdout in debug builds
//! - `log` records forwarded into `tracing`
//!
//! Every JSON line carries timestamp (ISO 8601 with offset, millisecond
//! precision), level, target, pid, tid, file, line, message, extra fields and
//! the application version.

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::config::LogLevel;

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "taskstreak.log";

/// Initialize the global subscriber. Calling it again is a no-op.
///
/// `RUST_LOG` overrides `level` when set.
pub fn init_logger(log_dir: PathBuf, level: LogLevel) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)?;
    let _ = LOG_DIR.set(log_dir.clone());

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .event_format(JsonFormatter::new())
        .with_filter(build_filter(level));

    let stdout_layer = if cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_ansi(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(build_filter(level)),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "taskstreak::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized successfully"
    );

    Ok(())
}

fn build_filter(level: LogLevel) -> EnvFilter {
    let default_directive = format!("{},taskstreak={}", level.as_str(), level.as_str());

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Directory the file layer writes to, once initialized.
pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

// ============================================================
// JSON file format
// ============================================================

use serde_json::{json, Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Writes each event as one JSON object per line.
struct JsonFormatter {
    pid: u32,
}

impl JsonFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let mut fields = EventFields::default();
        event.record(&mut fields);
        let message = fields.0.remove("message").unwrap_or(Value::Null);

        let mut line = json!({
            "timestamp": chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            "level": meta.level().to_string(),
            "target": meta.target(),
            "pid": self.pid,
            "tid": format!("{:?}", std::thread::current().id()),
            "file": meta.file(),
            "line": meta.line(),
            "message": message,
            "version": env!("CARGO_PKG_VERSION"),
        });
        if !fields.0.is_empty() {
            line["fields"] = Value::Object(fields.0);
        }

        writeln!(writer, "{}", line)
    }
}

/// Event fields keyed by name; numbers and booleans keep their JSON type.
#[derive(Default)]
struct EventFields(Map<String, Value>);

impl EventFields {
    fn put(&mut self, field: &Field, value: Value) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for EventFields {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, json!(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, json!(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, json!(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, json!(format!("{:?}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_filter_builds_for_every_level() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            let filter = build_filter(level);
            assert!(!filter.to_string().is_empty());
        }
    }

    #[test]
    fn test_json_line_carries_typed_fields() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = Registry::default().with(
            fmt::layer()
                .with_writer(move || writer.clone())
                .event_format(JsonFormatter::new()),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(task_id = "abc", completed = true, total = 3u64, "Task completed");
        });

        let bytes = captured.0.lock().unwrap().clone();
        let output = String::from_utf8(bytes).unwrap();
        assert_eq!(output.lines().count(), 1);

        let line: Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["message"], "Task completed");
        assert_eq!(line["pid"], std::process::id());
        assert_eq!(line["fields"]["task_id"], "abc");
        assert_eq!(line["fields"]["completed"], true);
        assert_eq!(line["fields"]["total"], 3);
        assert!(line["timestamp"].as_str().unwrap().contains('T'));
    }
}
