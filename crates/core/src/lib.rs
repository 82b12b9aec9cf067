//! `stockpile-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no log sink).

pub mod diagnostic;
pub mod error;
pub mod value_object;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
