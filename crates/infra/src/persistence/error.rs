use thiserror::Error;

use stockpile_core::{Diagnostic, Severity};

/// Failure to read or write the persisted inventory file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No file at the configured path (expected on first run).
    #[error("{path} not found")]
    NotFound { path: String },

    /// The file exists but is not a JSON object of item name -> number.
    #[error("failed to decode JSON from {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode inventory for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    pub fn severity(&self) -> Severity {
        match self {
            PersistenceError::NotFound { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Diagnostic for a load that fell back to an empty store.
    pub fn load_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: self.severity(),
            message: format!("{self}, starting with empty inventory"),
        }
    }
}
