//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.
//! Key-value fields attached to log records (`info!(hostname:% = h; "...")`)
//! are rendered as JSON members or as trailing `key=value` pairs. Fields
//! captured with `:serde` keep their structure in JSON output.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use chrono::SecondsFormat;
use colored::*;
use log::kv::{Error as KvError, Key, Value, VisitSource};
use log::{LevelFilter, Record};
use serde_json::{Map, Value as JsonValue};

/// Collects a record's key-value fields as JSON values, in emission order.
///
/// Numbers and booleans stay numbers and booleans, `:serde` captures become
/// nested objects and arrays, and `:%` captures become strings.
#[derive(Default)]
struct FieldCollector(Vec<(String, JsonValue)>);

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), KvError> {
        let json = serde_json::to_value(&value).unwrap_or_else(|_| value.to_string().into());
        self.0.push((key.as_str().to_string(), json));
        Ok(())
    }
}

/// Text form of a field for plain output: strings unquoted, the rest as JSON.
fn plain_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn collect_fields(record: &Record<'_>) -> Vec<(String, JsonValue)> {
    let mut collector = FieldCollector::default();
    // A failing visitor only loses fields, never the message.
    let _ = record.key_values().visit(&mut collector);
    collector.0
}

/// Renders a record as a single JSON object (no trailing newline).
///
/// Reserved members (`time`, `level`, `target`, `msg`, `file`, `line`) win over
/// key-value fields with the same name.
pub(crate) fn render_json(record: &Record<'_>, add_source: bool) -> String {
    let mut obj = Map::new();
    obj.insert(
        "time".into(),
        chrono::Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .into(),
    );
    obj.insert("level".into(), record.level().to_string().into());
    obj.insert("target".into(), record.target().into());
    obj.insert("msg".into(), record.args().to_string().into());
    if add_source {
        if let Some(file) = record.file() {
            obj.insert("file".into(), file.into());
        }
        if let Some(line) = record.line() {
            obj.insert("line".into(), line.into());
        }
    }
    for (key, value) in collect_fields(record) {
        obj.entry(key).or_insert(value);
    }
    serde_json::to_string(&obj).unwrap_or_else(|_| "{}".into())
}

/// Renders a record as a human-readable line (no trailing newline).
pub(crate) fn render_plain(record: &Record<'_>, add_source: bool) -> String {
    let level = record.level();
    let colored_level = match level {
        log::Level::Error => level.to_string().red(),
        log::Level::Warn => level.to_string().yellow(),
        log::Level::Info => level.to_string().green(),
        log::Level::Debug => level.to_string().blue(),
        log::Level::Trace => level.to_string().purple(),
    };

    let emoji = match level {
        log::Level::Error => "❌",
        log::Level::Warn => "⚠️",
        log::Level::Info => "✔️",
        log::Level::Debug => "🔍",
        log::Level::Trace => "🔬",
    };

    let mut line = format!(
        "{} {} [{}] {}",
        emoji,
        record.target().cyan(),
        colored_level,
        record.args()
    );
    for (key, value) in collect_fields(record) {
        line.push_str(&format!(" {}={}", key.dimmed(), plain_value(&value)));
    }
    if add_source {
        if let (Some(file), Some(no)) = (record.file(), record.line()) {
            line.push_str(&format!(" ({file}:{no})"));
        }
    }
    line
}

/// Initializes the logger with the specified level and format.
///
/// The logger reads from the `RUST_LOG` environment variable first; the
/// provided `level` (from the configuration file or `--log-level`) overrides
/// it for this crate. Resolver and TLS library chatter is capped so a failing
/// upstream does not flood the output.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
/// * `add_source` - Append the source file and line to every line
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    add_source: bool,
) -> Result<(), InitializationError> {
    colored::control::set_override(matches!(format, LogFormat::Plain));

    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // hickory logs every malformed or truncated UDP response; the lookup error
    // that follows is what matters here.
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("cert_tracker", level);

    match format {
        LogFormat::Json => {
            builder.format(move |buf, record| writeln!(buf, "{}", render_json(record, add_source)));
        }
        LogFormat::Plain => {
            builder
                .format(move |buf, record| writeln!(buf, "{}", render_plain(record, add_source)));
        }
    }

    // try_init() so that a second initialization (tests) is an error, not a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
