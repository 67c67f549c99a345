//! Data structures for the yearly (year, tag) aggregation table.

pub mod coerce;
mod record;
mod schema;
mod table;

pub use record::{CoercedRecord, RawInput, RawRecord, YearlyTagRow};
pub use schema::{header, Column, ColumnKind, N_COLUMNS};
pub use table::YearlyTable;
