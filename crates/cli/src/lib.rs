//! `stockpile` binary support: environment configuration and the demo flow.

pub mod config;
pub mod demo;

pub use config::AppConfig;
