//! Cleaning configuration and execution.

mod config;
mod runner;

pub use config::{CleanConfig, DEFAULT_MIN_COUNT, DEFAULT_YEAR_MAX, DEFAULT_YEAR_MIN};
pub use runner::{clean, CleanReport, ReportFormat, TableCleaner};
