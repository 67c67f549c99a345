//! Required-field filters: the raw presence check and the post-coercion check.

use crate::data::{CoercedRecord, Column, RawRecord, YearlyTable};
use crate::filter::{CleanStep, FilterResult};
use tracing::trace;

/// Drop records whose raw `year`, `tag` or `count` is missing.
///
/// A field is missing when it is blank or one of the NA markers in
/// [`crate::data::coerce::NA_MARKERS`].
pub fn drop_missing_required(records: Vec<RawRecord>) -> (Vec<RawRecord>, FilterResult) {
    let n_before = records.len();
    let kept: Vec<RawRecord> = records
        .into_iter()
        .filter(|rec| {
            let missing = Column::REQUIRED.iter().find(|&&c| rec.is_missing(c));
            if let Some(column) = missing {
                trace!(line = rec.line, %column, "dropping row with missing required field");
            }
            missing.is_none()
        })
        .collect();
    let stats = FilterResult::new(CleanStep::MissingRequired, n_before, kept.len());
    (kept, stats)
}

/// Drop records whose `year` or `count` failed coercion, promoting the rest
/// to typed rows.
pub fn drop_invalid_required(records: Vec<CoercedRecord>) -> (YearlyTable, FilterResult) {
    let n_before = records.len();
    let table: YearlyTable = records
        .into_iter()
        .filter_map(|rec| {
            let line = rec.line;
            let row = rec.into_row();
            if row.is_none() {
                trace!(line, "dropping row with non-numeric year or count");
            }
            row
        })
        .collect();
    let stats = FilterResult::new(CleanStep::InvalidRequired, n_before, table.len());
    (table, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: u64, fields: [&str; 9]) -> RawRecord {
        RawRecord::new(line, fields.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_drop_missing_required() {
        let records = vec![
            raw(1, ["2015", "java", "20", "1", "1", "1", "1", "1", "1"]),
            raw(2, ["2015", "", "20", "1", "1", "1", "1", "1", "1"]),
            raw(3, ["", "go", "20", "1", "1", "1", "1", "1", "1"]),
            raw(4, ["2015", "go", "NA", "1", "1", "1", "1", "1", "1"]),
            raw(5, ["2016", "go", "20", "", "", "", "", "", ""]),
        ];
        let (kept, stats) = drop_missing_required(records);
        let lines: Vec<u64> = kept.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 5]);
        assert_eq!(stats.n_before, 5);
        assert_eq!(stats.n_removed, 3);
        assert_eq!(stats.step, CleanStep::MissingRequired);
    }

    #[test]
    fn test_drop_invalid_required() {
        let records = vec![
            raw(1, ["2015", "java", "20", "1", "1", "1", "1", "1", "1"]).coerce(),
            raw(2, ["2015", "go", "many", "1", "1", "1", "1", "1", "1"]).coerce(),
            raw(3, ["MMXV", "go", "20", "1", "1", "1", "1", "1", "1"]).coerce(),
            raw(4, ["2016", "c", "15", "x", "1", "1", "1", "1", "1"]).coerce(),
        ];
        let (table, stats) = drop_invalid_required(records);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().tag, "java");
        assert_eq!(table.get(1).unwrap().tag, "c");
        assert_eq!(table.get(1).unwrap().total_views, None);
        assert_eq!(stats.n_removed, 2);
    }
}
