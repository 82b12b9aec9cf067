//! Demonstration flow: mutate, report, persist, reload.

use std::io::Write;

use serde_json::json;

use stockpile_infra::JsonFileStore;
use stockpile_inventory::{Inventory, report};

use crate::config::AppConfig;

/// Run the demo against `config.data_path`, writing status lines and the
/// final report to `out`.
///
/// The session starts from an empty inventory; whatever is on disk is
/// overwritten by the save step.
pub fn run<W: Write>(config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    let file = JsonFileStore::new(&config.data_path);
    let mut inv = Inventory::new();

    inv.add_item("apple", 10)
        .add_item("banana", 5)
        // ill-typed request: rejected with a warning, store untouched
        .add_input(&json!(123), &json!("ten"))
        .remove_item("apple", 3)
        .remove_item("orange", 1);

    report::write_quantity(inv.store(), "apple", out)?;
    report::write_low_stock(inv.store(), config.low_stock_threshold, out)?;

    file.save(inv.store());
    let store = file.load();

    report::write_all(&store, out)?;
    tracing::debug!(entries = inv.log().len(), "demo finished");
    Ok(())
}
