//! Year-range filtering.

use crate::data::YearlyTable;
use crate::filter::{CleanStep, FilterResult};

/// Keep rows with `year_min <= year <= year_max`.
///
/// Bounds are not validated: with `year_min > year_max` no row can pass and
/// the result is empty.
pub fn filter_year_range(table: &YearlyTable, year_min: i64, year_max: i64) -> YearlyTable {
    let keep_indices: Vec<usize> = table
        .iter()
        .enumerate()
        .filter(|(_, row)| (year_min..=year_max).contains(&row.year))
        .map(|(i, _)| i)
        .collect();

    table.subset(&keep_indices)
}

/// Filter with statistics about what was filtered.
pub fn filter_year_range_with_stats(
    table: &YearlyTable,
    year_min: i64,
    year_max: i64,
) -> (YearlyTable, FilterResult) {
    let filtered = filter_year_range(table, year_min, year_max);
    let stats = FilterResult::new(CleanStep::YearRange, table.len(), filtered.len());
    (filtered, stats)
}
