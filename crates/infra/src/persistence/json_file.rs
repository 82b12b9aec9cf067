//! JSON file persistence for the inventory store.
//!
//! The file holds one flat object, item name -> number, pretty-printed with
//! four-space indentation. Any whitespace is accepted on load.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use stockpile_core::Diagnostic;
use stockpile_inventory::InventoryStore;

use super::error::PersistenceError;

/// Default location of the persisted inventory.
pub const DEFAULT_INVENTORY_PATH: &str = "inventory.json";

const INDENT: &[u8] = b"    ";

/// Inventory persisted as a JSON document at a fixed path.
///
/// Writes overwrite the file in place (no temp file + rename). There is no
/// locking against other writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_INVENTORY_PATH)
    }
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn try_load(&self) -> Result<InventoryStore, PersistenceError> {
        let path = self.display_path();
        let text = std::fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PersistenceError::NotFound { path: path.clone() },
            // not UTF-8: the bytes are there but cannot be JSON text
            io::ErrorKind::InvalidData => PersistenceError::Malformed {
                path: path.clone(),
                reason: source.to_string(),
            },
            _ => PersistenceError::Io {
                path: path.clone(),
                source,
            },
        })?;
        tracing::debug!(path = %path, bytes = text.len(), "read inventory file");

        let store: InventoryStore =
            serde_json::from_str(&text).map_err(|e| PersistenceError::Malformed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if store.iter().any(|(name, _)| name.trim().is_empty()) {
            return Err(PersistenceError::Malformed {
                path,
                reason: "empty item name".to_string(),
            });
        }

        Ok(store)
    }

    /// Load, falling back to an empty store; the diagnostic says which case happened.
    pub fn load_reported(&self) -> (InventoryStore, Diagnostic) {
        match self.try_load() {
            Ok(store) => {
                let diagnostic = Diagnostic::info(format!("Data loaded from {}", self.display_path()));
                (store, diagnostic)
            }
            Err(err) => (InventoryStore::new(), err.load_diagnostic()),
        }
    }

    /// Load and log the outcome. Never fails: missing or malformed data yields an empty store.
    pub fn load(&self) -> InventoryStore {
        let (store, diagnostic) = self.load_reported();
        diagnostic.emit();
        store
    }

    pub fn try_save(&self, store: &InventoryStore) -> Result<(), PersistenceError> {
        let path = self.display_path();
        let io_err = |source| PersistenceError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        store.serialize(&mut ser).map_err(|source| PersistenceError::Encode {
            path: path.clone(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn save_reported(&self, store: &InventoryStore) -> Diagnostic {
        match self.try_save(store) {
            Ok(()) => Diagnostic::info(format!("Data saved to {}", self.display_path())),
            Err(err) => Diagnostic::error(format!("Failed to save inventory: {err}")),
        }
    }

    /// Save and log the outcome. Write failures are logged at error level.
    pub fn save(&self, store: &InventoryStore) {
        self.save_reported(store).emit();
    }
}

/// Load the inventory at `path`, logging the outcome.
pub fn load_inventory(path: impl AsRef<Path>) -> InventoryStore {
    JsonFileStore::new(path.as_ref()).load()
}

/// Save `store` to `path`, logging the outcome.
pub fn save_inventory(store: &InventoryStore, path: impl AsRef<Path>) {
    JsonFileStore::new(path.as_ref()).save(store)
}
