//! Inventory persistence (flat JSON file).

pub mod error;
pub mod json_file;

pub use error::PersistenceError;
pub use json_file::{DEFAULT_INVENTORY_PATH, JsonFileStore, load_inventory, save_inventory};
