//! Stock quantities: whole or fractional, compared numerically.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use stockpile_core::{DomainError, DomainResult, ValueObject};

/// Numeric count of an item currently in stock.
///
/// Integer arithmetic stays integral; as soon as one operand is fractional the
/// result is fractional. Floats are always finite: any operation that would
/// leave the finite range yields `None` from the `checked_*` helpers.
#[derive(Debug, Copy, Clone)]
pub enum Quantity {
    Int(i64),
    Float(f64),
}

impl ValueObject for Quantity {}

impl Quantity {
    pub const ZERO: Quantity = Quantity::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            Quantity::Int(v) => v as f64,
            Quantity::Float(v) => v,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Quantity::Int(_) => true,
            Quantity::Float(v) => v.is_finite(),
        }
    }

    /// Zero or below: an entry holding this quantity must not stay in the store.
    pub fn is_depleted(self) -> bool {
        self <= Quantity::ZERO
    }

    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        match (self, rhs) {
            (Quantity::Int(a), Quantity::Int(b)) => a.checked_add(b).map(Quantity::Int),
            (a, b) => finite(a.as_f64() + b.as_f64()),
        }
    }

    pub fn checked_sub(self, rhs: Quantity) -> Option<Quantity> {
        match (self, rhs) {
            (Quantity::Int(a), Quantity::Int(b)) => a.checked_sub(b).map(Quantity::Int),
            (a, b) => finite(a.as_f64() - b.as_f64()),
        }
    }

    /// Interpret a loosely typed JSON value as a quantity.
    ///
    /// Only JSON numbers are accepted; strings such as `"10"` are rejected the
    /// same way `"ten"` is.
    pub fn from_json(value: &JsonValue) -> DomainResult<Quantity> {
        let JsonValue::Number(n) = value else {
            return Err(DomainError::validation(format!(
                "quantity must be a number, got {value}"
            )));
        };
        if let Some(i) = n.as_i64() {
            return Ok(Quantity::Int(i));
        }
        if n.is_u64() {
            return Err(DomainError::validation(format!("quantity out of range: {n}")));
        }
        n.as_f64()
            .and_then(finite)
            .ok_or_else(|| DomainError::validation(format!("quantity out of range: {n}")))
    }
}

fn finite(v: f64) -> Option<Quantity> {
    v.is_finite().then_some(Quantity::Float(v))
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ZERO
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::Int(value)
    }
}

impl From<i32> for Quantity {
    fn from(value: i32) -> Self {
        Quantity::Int(value.into())
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Float(value)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Quantity::Int(a), Quantity::Int(b)) => Some(a.cmp(&b)),
            (Quantity::Int(a), Quantity::Float(b)) => cmp_int_float(a, b),
            (Quantity::Float(a), Quantity::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
            (Quantity::Float(a), Quantity::Float(b)) => a.partial_cmp(&b),
        }
    }
}

/// Exact comparison of an integer with a float, without rounding `i` to `f64`.
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63: every float in [-2^63, 2^63) truncates to a representable i64.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return None;
    }
    if f >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if f < -I64_BOUND {
        return Some(Ordering::Greater);
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(f - whole)),
        unequal => Some(unequal),
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Quantity::Int(v) => write!(f, "{v}"),
            // Debug keeps the fractional part for whole floats ("10.0").
            Quantity::Float(v) => write!(f, "{v:?}"),
        }
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Quantity::Int(i));
        }
        if s.parse::<i128>().is_ok() {
            return Err(DomainError::validation(format!("quantity out of range: {s}")));
        }
        s.parse::<f64>()
            .ok()
            .and_then(finite)
            .ok_or_else(|| DomainError::validation(format!("not a quantity: {s:?}")))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Quantity::Int(v) => serializer.serialize_i64(v),
            Quantity::Float(v) => serializer.serialize_f64(v),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QuantityVisitor;

        impl Visitor<'_> for QuantityVisitor {
            type Value = Quantity;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a finite number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
                Ok(Quantity::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
                i64::try_from(v)
                    .map(Quantity::Int)
                    .map_err(|_| E::custom(format!("quantity {v} exceeds the integer range")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
                finite(v).ok_or_else(|| E::custom("quantity must be finite"))
            }
        }

        deserializer.deserialize_any(QuantityVisitor)
    }
}
