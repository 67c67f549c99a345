//! Yearly Tag Aggregation Cleaning Library
//!
//! Cleans the tab-separated output of a yearly (year, tag) aggregation job:
//! rows are restricted to a year range, rows missing required fields are
//! dropped, numeric columns are coerced, and low-frequency (year, tag)
//! observations below a count threshold are filtered out.
//!
//! # Overview
//!
//! - **data**: Column schema, raw records, coercion, `YearlyTable`
//! - **filter**: Required-field, year-range and min-count filters
//! - **profile**: Year coverage of a cleaned table
//! - **pipeline**: `CleanConfig`, `TableCleaner` and `CleanReport`
//!
//! Malformed rows (wrong field count, non-numeric year or count) are
//! dropped, never reported as errors. Only I/O failures are errors.
//!
//! # Example
//!
//! ```no_run
//! use yearly_tag_clean::prelude::*;
//!
//! let report = TableCleaner::new(CleanConfig::default())
//!     .clean("yearly_agg.tsv", "yearly_clean.tsv")
//!     .unwrap();
//! println!("{}", report);
//! ```

pub mod data;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod profile;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{
        CoercedRecord, Column, ColumnKind, RawInput, RawRecord, YearlyTable, YearlyTagRow,
    };
    pub use crate::error::{CleanError, Result};
    pub use crate::filter::{
        drop_invalid_required, drop_missing_required, filter_min_count,
        filter_min_count_with_stats, filter_year_range, filter_year_range_with_stats, CleanStep,
        FilterResult,
    };
    pub use crate::pipeline::{clean, CleanConfig, CleanReport, ReportFormat, TableCleaner};
    pub use crate::profile::{profile_table, TableProfile};
}
