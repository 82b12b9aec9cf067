//! Process-wide diagnostics sink (tracing subscriber setup).

/// Tracing configuration (filters, format, destination).
pub mod tracing;

pub use self::tracing::{DEFAULT_LOG_PATH, LeveledLine, LogFormat, LoggingConfig, init};
