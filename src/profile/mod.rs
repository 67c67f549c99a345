//! Summary profiling of a cleaned table.

mod years;

pub use years::{profile_table, TableProfile};
