//! Noise-tag filtering by per-row count.

use crate::data::YearlyTable;
use crate::filter::{CleanStep, FilterResult};

/// Keep rows with `count >= min_count`.
///
/// The threshold applies to each row on its own. Rows sharing a (year, tag)
/// key are neither merged nor deduplicated.
pub fn filter_min_count(table: &YearlyTable, min_count: i64) -> YearlyTable {
    let keep_indices: Vec<usize> = table
        .iter()
        .enumerate()
        .filter(|(_, row)| row.count >= min_count)
        .map(|(i, _)| i)
        .collect();

    table.subset(&keep_indices)
}

/// Filter with statistics about what was filtered.
pub fn filter_min_count_with_stats(
    table: &YearlyTable,
    min_count: i64,
) -> (YearlyTable, FilterResult) {
    let filtered = filter_min_count(table, min_count);
    let stats = FilterResult::new(CleanStep::MinCount, table.len(), filtered.len());
    (filtered, stats)
}
