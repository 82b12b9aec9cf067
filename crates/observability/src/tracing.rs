//! Tracing/logging initialization.
//!
//! Diagnostics are timestamped, leveled lines appended to a log file
//! (`inventory_log.txt` by default), shaped as
//! `2024-05-01 12:00:00,000 - WARNING - message`. The filter honours `RUST_LOG`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use stockpile_core::Severity;

/// Default diagnostics destination.
pub const DEFAULT_LOG_PATH: &str = "inventory_log.txt";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl core::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log file, opened in append mode. `None` logs to stderr.
    pub log_path: Option<PathBuf>,
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_path: Some(PathBuf::from(DEFAULT_LOG_PATH)),
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Text line format: `<local timestamp> - <LEVEL> - <fields>`.
///
/// Levels that correspond to a diagnostic [`Severity`] use its label
/// (`INFO`, `WARNING`, `ERROR`); `DEBUG`/`TRACE` keep tracing's own name.
#[derive(Debug, Copy, Clone, Default)]
pub struct LeveledLine;

fn level_label(level: Level) -> &'static str {
    let severity = if level == Level::ERROR {
        Severity::Error
    } else if level == Level::WARN {
        Severity::Warning
    } else if level == Level::INFO {
        Severity::Info
    } else {
        return level.as_str();
    };
    severity.as_str()
}

impl<S, N> FormatEvent<S, N> for LeveledLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> core::fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            level_label(*event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Fails only if the
/// log file cannot be opened.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let writer = match &config.log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Text => builder.event_format(LeveledLine).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_targets_log_file() {
        let config = LoggingConfig::default();
        assert_eq!(config.log_path, Some(PathBuf::from("inventory_log.txt")));
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.default_filter, "info");
    }

    #[test]
    fn parses_log_format() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" text ".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            log_path: Some(dir.path().join("missing").join("log.txt")),
            ..LoggingConfig::default()
        };
        assert!(init(&config).is_err());
    }

    #[test]
    fn init_appends_to_log_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory_log.txt");
        let config = LoggingConfig {
            log_path: Some(path.clone()),
            default_filter: "info".to_string(),
            ..LoggingConfig::default()
        };

        init(&config).unwrap();
        init(&config).unwrap();
        ::tracing::warn!("Attempted to remove non-existent item: orange");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("WARNING"));
        assert!(contents.contains(" - WARNING - Attempted to remove non-existent item: orange\n"));
    }

    #[test]
    fn leveled_line_uses_diagnostic_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lines.txt");
        let file = std::fs::File::create(&path).unwrap();

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .event_format(LeveledLine)
            .finish();

        ::tracing::subscriber::with_default(subscriber, || {
            ::tracing::info!("Added 10 of apple");
            ::tracing::warn!("Attempted to remove non-existent item: orange");
            ::tracing::error!("Failed to decode JSON from inventory.json");
            ::tracing::debug!("read inventory file");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents
            .lines()
            .map(|line| line.split_once(" - ").unwrap().1)
            .collect();
        assert_eq!(
            lines,
            vec![
                "INFO - Added 10 of apple",
                "WARNING - Attempted to remove non-existent item: orange",
                "ERROR - Failed to decode JSON from inventory.json",
                "DEBUG - read inventory file",
            ]
        );
    }

    #[test]
    fn level_labels_match_severities() {
        assert_eq!(level_label(Level::WARN), "WARNING");
        assert_eq!(level_label(Level::INFO), "INFO");
        assert_eq!(level_label(Level::ERROR), "ERROR");
        assert_eq!(level_label(Level::TRACE), "TRACE");
    }
}
