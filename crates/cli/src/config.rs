//! Application configuration from environment variables.
//!
//! | variable                        | default             |
//! |---------------------------------|---------------------|
//! | `STOCKPILE_DATA_PATH`           | `inventory.json`    |
//! | `STOCKPILE_LOG_PATH`            | `inventory_log.txt` |
//! | `STOCKPILE_LOG_FORMAT`          | `text`              |
//! | `STOCKPILE_LOW_STOCK_THRESHOLD` | `5`                 |

use std::path::PathBuf;

use stockpile_core::Diagnostic;
use stockpile_infra::DEFAULT_INVENTORY_PATH;
use stockpile_inventory::{DEFAULT_LOW_STOCK_THRESHOLD, Quantity};
use stockpile_observability::{LogFormat, LoggingConfig};

pub const DATA_PATH_VAR: &str = "STOCKPILE_DATA_PATH";
pub const LOG_PATH_VAR: &str = "STOCKPILE_LOG_PATH";
pub const LOG_FORMAT_VAR: &str = "STOCKPILE_LOG_FORMAT";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKPILE_LOW_STOCK_THRESHOLD";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub logging: LoggingConfig,
    pub low_stock_threshold: Quantity,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            logging: LoggingConfig::default(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Logging is not initialized yet at this point, so problems are returned
    /// as diagnostics for the caller to emit once it is.
    pub fn from_env() -> (Self, Vec<Diagnostic>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<Diagnostic>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(path) = lookup(DATA_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(LOG_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.logging.log_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            match raw.parse::<LogFormat>() {
                Ok(format) => config.logging.format = format,
                Err(err) => warnings.push(Diagnostic::warning(format!(
                    "{LOG_FORMAT_VAR}: {err}; using text"
                ))),
            }
        }

        if let Some(raw) = lookup(LOW_STOCK_THRESHOLD_VAR) {
            match raw.parse::<Quantity>() {
                Ok(threshold) => config.low_stock_threshold = threshold,
                Err(err) => warnings.push(Diagnostic::warning(format!(
                    "{LOW_STOCK_THRESHOLD_VAR}: {err}; using {DEFAULT_LOW_STOCK_THRESHOLD}"
                ))),
            }
        }

        (config, warnings)
    }
}
