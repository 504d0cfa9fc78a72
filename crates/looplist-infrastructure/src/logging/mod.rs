//! Logging setup
//!
//! - one-line JSON records in a daily rolling file
//! - colored human-readable lines on stdout (debug builds only)
//! - `log` macros bridged into `tracing`
//!
//! Every JSON record carries timestamp (ISO 8601 with offset, millisecond
//! precision), level, target, pid, tid, file + line, message, structured
//! fields and the crate version.

use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

pub const LOG_FILE_PREFIX: &str = "looplist.log";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Calling it again is a no-op.
///
/// Debug builds log to stdout and to the JSON file, release builds only to
/// the file. `RUST_LOG` overrides the default filters.
pub fn init_logger(log_dir: PathBuf) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)?;
    let _ = LOG_DIR.set(log_dir.clone());

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .event_format(JsonFormatter::new())
        .with_filter(file_filter());

    let stdout_layer = if cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_ansi(true)
                .event_format(HumanReadableFormatter::new())
                .with_filter(stdout_filter()),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "looplist::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

fn file_filter() -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        "debug,looplist=trace"
    } else {
        "info"
    };

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn stdout_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("debug,looplist=trace"))
        .unwrap_or_else(|_| EnvFilter::new("debug"))
}

/// Directory passed to `init_logger`, once it has run
pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

/// Log files currently present in `log_dir`, oldest first
pub fn list_log_files(log_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        .collect();
    files.sort();
    Ok(files)
}

// ============================================================
// Formatters
// ============================================================

use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

type FieldMap = serde_json::Map<String, serde_json::Value>;

/// One file record
#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: &'a str,
    pid: u32,
    tid: String,
    thread_name: &'a str,
    target: &'a str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    fields: FieldMap,
}

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
        let metadata = event.metadata();
        let thread = std::thread::current();
        let mut fields = FieldCollector::collect(event);

        let record = JsonRecord {
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
                .to_string(),
            level: metadata.level().as_str(),
            pid: self.pid,
            tid: format!("{:?}", thread.id()),
            thread_name: thread.name().unwrap_or("unnamed"),
            target: metadata.target(),
            version: env!("CARGO_PKG_VERSION"),
            file: metadata.file(),
            line: metadata.line(),
            message: fields.remove("message"),
            fields,
        };

        let line = serde_json::to_string(&record).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

/// `2025-12-09 10:32:15.123 [INFO] (looplist::app) pid=1 tid=ThreadId(7) loop_id=42 - message (src/x.rs:12)`
struct HumanReadableFormatter {
    pid: u32,
}

impl HumanReadableFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
        }
    }
}

fn colored_level(level: &Level) -> String {
    let color = match *level {
        Level::ERROR => 31,
        Level::WARN => 33,
        Level::INFO => 32,
        Level::DEBUG => 36,
        Level::TRACE => 35,
    };
    format!("\x1b[{color}m{}\x1b[0m", level.as_str())
}

impl<S, N> FormatEvent<S, N> for HumanReadableFormatter
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
        let metadata = event.metadata();
        let mut fields = FieldCollector::collect(event);
        let message = match fields.remove("message") {
            Some(serde_json::Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        write!(
            writer,
            "{} [{}] ({}) pid={} tid={:?}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            colored_level(metadata.level()),
            metadata.target(),
            self.pid,
            std::thread::current().id(),
        )?;
        for (key, value) in &fields {
            write!(writer, " {key}={value}")?;
        }
        write!(writer, " - {message}")?;
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            write!(writer, " ({file}:{line})")?;
        }
        writeln!(writer)
    }
}

/// Event fields as JSON values, `message` included
#[derive(Default)]
struct FieldCollector(FieldMap);

impl FieldCollector {
    fn collect(event: &Event<'_>) -> FieldMap {
        let mut collector = Self::default();
        event.record(&mut collector);
        collector.0
    }

    fn put(&mut self, field: &Field, value: serde_json::Value) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldCollector {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{value:?}").into());
    }
}
