//! Append-only operation log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StockChange;

/// One timestamped, human-readable record of a mutation or anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl core::fmt::Display for OperationLogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.at, self.message)
    }
}

/// In-memory operation log. Entries can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationLog {
    entries: Vec<OperationLogEntry>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, at: DateTime<Utc>, message: impl Into<String>) {
        self.entries.push(OperationLogEntry {
            at,
            message: message.into(),
        });
    }

    /// Record a stock change using its diagnostic message.
    pub fn record(&mut self, at: DateTime<Utc>, change: &StockChange) {
        self.append(at, change.diagnostic().message);
    }

    pub fn entries(&self) -> &[OperationLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
