//! CSV-backed instrument configuration loading and querying.
//!
//! Delivers ordered field-value rows for a named command, keyed by
//! configuration category. Tables are fully materialized before any query
//! is answered.

pub mod csv;
pub mod error;
pub mod manager;

pub use csv::{split_fields, CsvTable};
pub use error::{ConfigError, Result};
pub use manager::{ConfigCategory, ConfigManager};
