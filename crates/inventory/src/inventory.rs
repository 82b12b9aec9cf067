//! `Inventory`: the store plus its operation log, with log-and-continue mutations.

use chrono::Utc;
use serde_json::Value as JsonValue;

use crate::journal::OperationLog;
use crate::quantity::Quantity;
use crate::report;
use crate::store::{InventoryStore, StockChange};

/// Single-owner inventory session.
///
/// Every mutation emits its diagnostic through `tracing`, appends an entry to
/// the operation log, and returns `&mut Self` so calls can be chained.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    store: InventoryStore,
    log: OperationLog,
    last_change: Option<StockChange>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: InventoryStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn add_item(&mut self, item: &str, qty: impl Into<Quantity>) -> &mut Self {
        let change = self.store.add(item, qty.into());
        self.settle(change)
    }

    /// Loosely typed variant of [`Inventory::add_item`] for untrusted input.
    pub fn add_input(&mut self, item: &JsonValue, qty: &JsonValue) -> &mut Self {
        let change = self.store.add_input(item, qty);
        self.settle(change)
    }

    pub fn remove_item(&mut self, item: &str, qty: impl Into<Quantity>) -> &mut Self {
        let change = self.store.remove(item, qty.into());
        self.settle(change)
    }

    fn settle(&mut self, change: StockChange) -> &mut Self {
        change.diagnostic().emit();
        self.log.record(Utc::now(), &change);
        self.last_change = Some(change);
        self
    }

    pub fn quantity(&self, item: &str) -> Quantity {
        self.store.quantity(item)
    }

    pub fn low_stock(&self, threshold: impl Into<Quantity>) -> Vec<String> {
        report::check_low_stock(&self.store, threshold.into())
    }

    /// Outcome of the most recent mutation, if any.
    pub fn last_change(&self) -> Option<&StockChange> {
        self.last_change.as_ref()
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    pub fn into_store(self) -> InventoryStore {
        self.store
    }
}
