//! Read-only reporting over an [`InventoryStore`].

use std::io::{self, Write};

use crate::quantity::Quantity;
use crate::store::InventoryStore;

/// Items strictly below this quantity are considered low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: Quantity = Quantity::Int(5);

/// Names of items whose quantity is strictly below `threshold`, in key order.
pub fn check_low_stock(store: &InventoryStore, threshold: Quantity) -> Vec<String> {
    store
        .iter()
        .filter(|(_, qty)| *qty < threshold)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Write the header line followed by one `"<item> -> <qty>"` line per item.
pub fn write_all<W: Write>(store: &InventoryStore, out: &mut W) -> io::Result<()> {
    writeln!(out, "Items Report")?;
    for (item, qty) in store.iter() {
        writeln!(out, "{item} -> {qty}")?;
    }
    Ok(())
}

pub fn write_quantity<W: Write>(store: &InventoryStore, item: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} stock: {}", capitalize(item), store.quantity(item))
}

pub fn write_low_stock<W: Write>(
    store: &InventoryStore,
    threshold: Quantity,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Low items: {:?}", check_low_stock(store, threshold))
}

/// Print the full report to stdout. Output errors are logged, not returned.
pub fn print_all(store: &InventoryStore) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = write_all(store, &mut stdout) {
        tracing::error!("failed to print inventory report: {err}");
    }
}

pub fn print_quantity(store: &InventoryStore, item: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = write_quantity(store, item, &mut stdout) {
        tracing::error!("failed to print quantity for {item}: {err}");
    }
}

pub fn print_low_stock(store: &InventoryStore, threshold: Quantity) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = write_low_stock(store, threshold, &mut stdout) {
        tracing::error!("failed to print low stock items: {err}");
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
