//! Inventory domain module.
//!
//! This crate contains the stock-keeping rules (add/remove, depletion,
//! low-stock reporting) as plain in-memory logic. Persistence lives in
//! `stockpile-infra`.

pub mod inventory;
pub mod journal;
pub mod quantity;
pub mod report;
pub mod store;

pub use inventory::Inventory;
pub use journal::{OperationLog, OperationLogEntry};
pub use quantity::Quantity;
pub use report::{DEFAULT_LOW_STOCK_THRESHOLD, check_low_stock};
pub use store::{InventoryStore, StockChange};
