//! Value object trait: equality by value, not identity.
//!
//! Item names and quantities have no identity of their own; two values with
//! the same contents are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one (e.g. `Quantity::checked_add` returns a fresh quantity).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
