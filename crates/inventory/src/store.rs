//! The inventory store: item name -> quantity, with mutation rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockpile_core::{Diagnostic, DomainError};

use crate::quantity::Quantity;

/// Mapping from item name to quantity.
///
/// Invariants:
/// - every key is a non-empty name
/// - `remove` never leaves an entry at zero or below
///
/// Iteration follows natural (lexicographic) key order. Serialized as a flat
/// JSON object, `{"apple": 7, "banana": 5}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryStore {
    items: BTreeMap<String, Quantity>,
}

/// Outcome of a single mutation.
///
/// Mutations never fail: a rejected request leaves the store untouched and is
/// described by [`StockChange::Rejected`].
#[derive(Debug, Clone, PartialEq)]
pub enum StockChange {
    Added {
        item: String,
        qty: Quantity,
        total: Quantity,
    },
    Removed {
        item: String,
        qty: Quantity,
        remaining: Quantity,
    },
    /// The removal drove the item to zero or below and its entry was deleted.
    Depleted { item: String, qty: Quantity },
    Rejected(DomainError),
}

impl StockChange {
    pub fn is_applied(&self) -> bool {
        !matches!(self, StockChange::Rejected(_))
    }

    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            StockChange::Added { item, qty, .. } => Diagnostic::info(format!("Added {qty} of {item}")),
            StockChange::Removed { item, qty, remaining } => Diagnostic::info(format!(
                "Removed {qty} of {item} ({remaining} left)"
            )),
            StockChange::Depleted { item, .. } => {
                Diagnostic::info(format!("Removed {item} completely from stock"))
            }
            StockChange::Rejected(err) => match err {
                DomainError::Validation(msg) => {
                    Diagnostic::warning(format!("Invalid input for add_item: {msg}"))
                }
                DomainError::NotFound(item) => {
                    Diagnostic::warning(format!("Attempted to remove non-existent item: {item}"))
                }
                DomainError::Overflow(_) => Diagnostic::error(format!("Stock update failed: {err}")),
            },
        }
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase `item` by `qty`, creating it at zero first if absent.
    ///
    /// Negative `qty` decrements; `add` never deletes an entry.
    pub fn add(&mut self, item: &str, qty: Quantity) -> StockChange {
        if item.trim().is_empty() || !qty.is_finite() {
            return StockChange::Rejected(DomainError::validation(format!(
                "item={item:?}, qty={qty}"
            )));
        }

        let current = self.quantity(item);
        let Some(total) = current.checked_add(qty) else {
            return StockChange::Rejected(DomainError::overflow(format!(
                "{current} + {qty} for {item}"
            )));
        };

        self.items.insert(item.to_string(), total);
        StockChange::Added {
            item: item.to_string(),
            qty,
            total,
        }
    }

    /// Loosely typed `add`: `item` must be a JSON string and `qty` a JSON
    /// number, otherwise the request is rejected and the store is untouched.
    pub fn add_input(&mut self, item: &JsonValue, qty: &JsonValue) -> StockChange {
        let reject = || {
            StockChange::Rejected(DomainError::validation(format!("item={item}, qty={qty}")))
        };

        let JsonValue::String(name) = item else {
            return reject();
        };
        match Quantity::from_json(qty) {
            Ok(q) => self.add(name, q),
            Err(_) => reject(),
        }
    }

    /// Decrease `item` by `qty`; deletes the entry once it reaches zero or below.
    ///
    /// Removing an unknown item is rejected and never creates an entry.
    pub fn remove(&mut self, item: &str, qty: Quantity) -> StockChange {
        let next = match self.items.get(item) {
            Some(current) => current.checked_sub(qty),
            None => return StockChange::Rejected(DomainError::not_found(item)),
        };

        let Some(remaining) = next else {
            return StockChange::Rejected(DomainError::overflow(format!(
                "{} - {qty} for {item}",
                self.quantity(item)
            )));
        };

        if remaining.is_depleted() {
            self.items.remove(item);
            return StockChange::Depleted {
                item: item.to_string(),
                qty,
            };
        }

        self.items.insert(item.to_string(), remaining);
        StockChange::Removed {
            item: item.to_string(),
            qty,
            remaining,
        }
    }

    /// Stored quantity, or zero when the item is absent.
    pub fn quantity(&self, item: &str) -> Quantity {
        self.items.get(item).copied().unwrap_or(Quantity::ZERO)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> + '_ {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn items(&self) -> &BTreeMap<String, Quantity> {
        &self.items
    }
}

impl FromIterator<(String, Quantity)> for InventoryStore {
    fn from_iter<T: IntoIterator<Item = (String, Quantity)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use stockpile_core::Severity;

    fn q(v: i64) -> Quantity {
        Quantity::Int(v)
    }

    fn stocked() -> InventoryStore {
        let mut store = InventoryStore::new();
        store.add("apple", q(10));
        store.add("banana", q(5));
        store
    }

    #[test]
    fn add_creates_then_accumulates() {
        let mut store = InventoryStore::new();
        let change = store.add("apple", q(10));
        assert_eq!(
            change,
            StockChange::Added {
                item: "apple".to_string(),
                qty: q(10),
                total: q(10),
            }
        );
        store.add("apple", q(2));
        assert_eq!(store.quantity("apple"), q(12));
        assert_eq!(change.diagnostic(), Diagnostic::info("Added 10 of apple"));
    }

    #[test]
    fn add_with_negative_quantity_decrements_without_deleting() {
        let mut store = stocked();
        store.add("banana", q(-5));
        assert!(store.contains("banana"));
        assert_eq!(store.quantity("banana"), q(0));
    }

    #[test]
    fn add_rejects_empty_names_and_non_finite_quantities() {
        let mut store = stocked();
        let before = store.clone();

        for change in [
            store.add("", q(1)),
            store.add("   ", q(1)),
            store.add("pear", Quantity::Float(f64::NAN)),
            store.add("pear", Quantity::Float(f64::INFINITY)),
        ] {
            assert!(matches!(change, StockChange::Rejected(DomainError::Validation(_))));
            assert_eq!(change.diagnostic().severity, Severity::Warning);
        }
        assert_eq!(store, before);
    }

    #[test]
    fn add_input_rejects_wrong_types() {
        let mut store = stocked();
        let before = store.clone();

        let change = store.add_input(&json!(123), &json!("ten"));
        assert_eq!(
            change.diagnostic(),
            Diagnostic::warning("Invalid input for add_item: item=123, qty=\"ten\"")
        );
        store.add_input(&json!("apple"), &json!("3"));
        store.add_input(&json!(null), &json!(3));
        store.add_input(&json!(["apple"]), &json!(3));

        assert_eq!(store, before);
    }

    #[test]
    fn add_input_accepts_well_typed_values() {
        let mut store = stocked();
        assert!(store.add_input(&json!("apple"), &json!(2)).is_applied());
        assert!(store.add_input(&json!("kiwi"), &json!(0.5)).is_applied());
        assert_eq!(store.quantity("apple"), q(12));
        assert_eq!(store.quantity("kiwi"), Quantity::Float(0.5));
    }

    #[test]
    fn add_overflow_is_an_error_and_leaves_store_unchanged() {
        let mut store = InventoryStore::new();
        store.add("bolts", q(i64::MAX));
        let before = store.clone();

        let change = store.add("bolts", q(1));
        assert!(matches!(change, StockChange::Rejected(DomainError::Overflow(_))));
        assert!(change.diagnostic().is_error());
        assert_eq!(store, before);
    }

    #[test]
    fn remove_decrements_present_item() {
        let mut store = stocked();
        let change = store.remove("apple", q(3));
        assert_eq!(
            change,
            StockChange::Removed {
                item: "apple".to_string(),
                qty: q(3),
                remaining: q(7),
            }
        );
        assert_eq!(store.quantity("apple"), q(7));
    }

    #[test]
    fn remove_to_zero_deletes_entry() {
        let mut store = stocked();
        let change = store.remove("apple", q(10));
        assert!(matches!(change, StockChange::Depleted { .. }));
        assert_eq!(
            change.diagnostic(),
            Diagnostic::info("Removed apple completely from stock")
        );
        assert!(!store.contains("apple"));
        assert_eq!(store.quantity("apple"), q(0));
    }

    #[test]
    fn remove_below_zero_deletes_entry() {
        let mut store = stocked();
        store.remove("banana", q(50));
        assert!(!store.contains("banana"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_missing_item_warns_and_creates_nothing() {
        let mut store = stocked();
        let before = store.clone();

        let change = store.remove("orange", q(1));
        assert_eq!(change, StockChange::Rejected(DomainError::not_found("orange")));
        assert_eq!(
            change.diagnostic(),
            Diagnostic::warning("Attempted to remove non-existent item: orange")
        );
        assert!(!store.contains("orange"));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_with_negative_quantity_increments() {
        let mut store = stocked();
        store.remove("banana", q(-2));
        assert_eq!(store.quantity("banana"), q(7));
    }

    #[test]
    fn remove_overflow_is_an_error_and_leaves_store_unchanged() {
        let mut store = InventoryStore::new();
        store.add("bolts", q(i64::MAX));
        let before = store.clone();

        let change = store.remove("bolts", q(-1));
        assert!(change.diagnostic().is_error());
        assert_eq!(store, before);
    }

    #[test]
    fn fractional_quantities_mix_with_integers() {
        let mut store = InventoryStore::new();
        store.add("flour", Quantity::Float(2.5));
        store.add("flour", q(1));
        store.remove("flour", Quantity::Float(3.0));
        assert_eq!(store.quantity("flour"), Quantity::Float(0.5));
        store.remove("flour", Quantity::Float(0.5));
        assert!(store.is_empty());
    }

    #[test]
    fn iterates_in_natural_order() {
        let mut store = InventoryStore::new();
        store.add("pear", q(1));
        store.add("apple", q(2));
        let names: Vec<_> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["apple", "pear"]);
    }

    #[test]
    fn serializes_as_flat_object() {
        let store = stocked();
        assert_eq!(
            serde_json::to_value(&store).unwrap(),
            json!({"apple": 10, "banana": 5})
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: add increases the stored quantity by exactly `qty`.
        #[test]
        fn add_increases_by_qty(
            start in prop::option::of(-1_000_000i64..1_000_000i64),
            qty in -1_000_000i64..1_000_000i64,
        ) {
            let mut store = InventoryStore::new();
            if let Some(start) = start {
                store.add("widget", q(start));
            }
            let before = store.quantity("widget");
            store.add("widget", q(qty));
            prop_assert_eq!(store.quantity("widget"), before.checked_add(q(qty)).unwrap());
        }

        /// Property: no removal ever leaves an entry at zero or below.
        #[test]
        fn removals_never_leave_depleted_entries(
            ops in prop::collection::vec((0usize..3, 1i64..20, any::<bool>()), 1..50)
        ) {
            let names = ["a", "b", "c"];
            let mut store = InventoryStore::new();
            for (idx, amount, is_add) in ops {
                if is_add {
                    store.add(names[idx], q(amount));
                } else {
                    store.remove(names[idx], q(amount));
                }
                for (_, qty) in store.iter() {
                    prop_assert!(!qty.is_depleted());
                }
            }
        }
    }
}
