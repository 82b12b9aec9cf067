//! Infrastructure layer: file persistence for the inventory store.

pub mod persistence;

pub use persistence::{
    DEFAULT_INVENTORY_PATH, JsonFileStore, PersistenceError, load_inventory, save_inventory,
};
