//! Raw and typed row representations, and the raw TSV reader.

use crate::data::coerce::{coerce_float, coerce_int, is_missing};
use crate::data::schema::{Column, N_COLUMNS};
use crate::error::Result;
use csv::{ByteRecord, ReaderBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;

/// One input line split into its nine text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the source file.
    pub line: u64,
    fields: Vec<String>,
}

impl RawRecord {
    /// Build a record from exactly nine fields. Any other arity yields `None`.
    pub fn new(line: u64, fields: Vec<String>) -> Option<Self> {
        if fields.len() == N_COLUMNS {
            Some(Self { line, fields })
        } else {
            None
        }
    }

    /// Build a record from a parsed TSV line.
    ///
    /// Returns `None` for a wrong field count or a field that is not UTF-8.
    pub fn from_byte_record(line: u64, record: &ByteRecord) -> Option<Self> {
        if record.len() != N_COLUMNS {
            return None;
        }
        let fields = record
            .iter()
            .map(|b| std::str::from_utf8(b).ok().map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        Self::new(line, fields)
    }

    /// Raw text of a column.
    #[inline]
    pub fn field(&self, column: Column) -> &str {
        &self.fields[column.index()]
    }

    /// Check whether a column is missing in the raw text.
    pub fn is_missing(&self, column: Column) -> bool {
        is_missing(self.field(column))
    }

    /// Coerce every numeric column. Never fails; see [`crate::data::coerce`].
    pub fn coerce(self) -> CoercedRecord {
        let int = |c: Column| coerce_int(&self.fields[c.index()]);
        let float = |c: Column| coerce_float(&self.fields[c.index()]);
        CoercedRecord {
            line: self.line,
            year: int(Column::Year),
            count: int(Column::Count),
            total_views: int(Column::TotalViews),
            total_score: int(Column::TotalScore),
            total_answers: int(Column::TotalAnswers),
            avg_views: float(Column::AvgViews),
            avg_score: float(Column::AvgScore),
            avg_answers: float(Column::AvgAnswers),
            tag: self.fields[Column::Tag.index()].clone(),
        }
    }
}

/// A record after numeric coercion; required numbers may still be null.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedRecord {
    pub line: u64,
    pub year: Option<i64>,
    pub tag: String,
    pub count: Option<i64>,
    pub total_views: Option<i64>,
    pub total_score: Option<i64>,
    pub total_answers: Option<i64>,
    pub avg_views: Option<f64>,
    pub avg_score: Option<f64>,
    pub avg_answers: Option<f64>,
}

impl CoercedRecord {
    /// Promote to a row if both `year` and `count` are present.
    pub fn into_row(self) -> Option<YearlyTagRow> {
        Some(YearlyTagRow {
            year: self.year?,
            count: self.count?,
            tag: self.tag,
            total_views: self.total_views,
            total_score: self.total_score,
            total_answers: self.total_answers,
            avg_views: self.avg_views,
            avg_score: self.avg_score,
            avg_answers: self.avg_answers,
        })
    }

    /// Whether an optional numeric column ended up null.
    pub fn is_null(&self, column: Column) -> bool {
        match column {
            Column::Year => self.year.is_none(),
            Column::Tag => false,
            Column::Count => self.count.is_none(),
            Column::TotalViews => self.total_views.is_none(),
            Column::TotalScore => self.total_score.is_none(),
            Column::TotalAnswers => self.total_answers.is_none(),
            Column::AvgViews => self.avg_views.is_none(),
            Column::AvgScore => self.avg_score.is_none(),
            Column::AvgAnswers => self.avg_answers.is_none(),
        }
    }
}

/// A (year, tag) observation with its aggregated metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTagRow {
    pub year: i64,
    pub tag: String,
    pub count: i64,
    pub total_views: Option<i64>,
    pub total_score: Option<i64>,
    pub total_answers: Option<i64>,
    pub avg_views: Option<f64>,
    pub avg_score: Option<f64>,
    pub avg_answers: Option<f64>,
}

impl YearlyTagRow {
    /// Row with only the required fields set.
    pub fn new(year: i64, tag: impl Into<String>, count: i64) -> Self {
        Self {
            year,
            tag: tag.into(),
            count,
            total_views: None,
            total_score: None,
            total_answers: None,
            avg_views: None,
            avg_score: None,
            avg_answers: None,
        }
    }
}

/// Everything read from a raw input file.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    /// Well-formed records in file order.
    pub records: Vec<RawRecord>,
    /// Non-blank lines seen.
    pub n_lines: usize,
    /// Lines dropped for wrong arity or invalid UTF-8.
    pub n_malformed: usize,
}

impl RawInput {
    /// Load a headerless nine-column TSV file.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse headerless nine-column TSV from any reader.
    ///
    /// Only I/O failures are errors; lines of the wrong shape are counted
    /// in `n_malformed` and skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut input = RawInput::default();
        let mut record = ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            input.n_lines += 1;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(input.n_lines as u64);
            match RawRecord::from_byte_record(line, &record) {
                Some(raw) => input.records.push(raw),
                None => {
                    trace!(line, n_fields = record.len(), "dropping malformed line");
                    input.n_malformed += 1;
                }
            }
        }
        Ok(input)
    }

    /// Number of well-formed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(fields: &[&str]) -> RawRecord {
        RawRecord::new(1, fields.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_arity_check() {
        assert!(RawRecord::new(1, vec!["a".to_string(); 8]).is_none());
        assert!(RawRecord::new(1, vec!["a".to_string(); 10]).is_none());
        assert!(RawRecord::new(1, vec!["a".to_string(); 9]).is_some());
    }

    #[test]
    fn test_coerce_record() {
        let rec = raw(&["2015", "rust", "12", "100", "bad", "5", "8.5", "", "0.4"]).coerce();
        assert_eq!(rec.year, Some(2015));
        assert_eq!(rec.tag, "rust");
        assert_eq!(rec.count, Some(12));
        assert_eq!(rec.total_views, Some(100));
        assert_eq!(rec.total_score, None);
        assert_eq!(rec.avg_views, Some(8.5));
        assert_eq!(rec.avg_score, None);
        assert!(rec.is_null(Column::TotalScore));

        let row = rec.into_row().unwrap();
        assert_eq!(row.year, 2015);
        assert_eq!(row.count, 12);
        assert_eq!(row.avg_answers, Some(0.4));
    }

    #[test]
    fn test_into_row_requires_year_and_count() {
        let rec = raw(&["2015", "go", "NaN", "1", "1", "1", "1", "1", "1"]).coerce();
        assert!(rec.into_row().is_none());
        let rec = raw(&["twenty", "go", "30", "1", "1", "1", "1", "1", "1"]).coerce();
        assert!(rec.into_row().is_none());
    }

    #[test]
    fn test_reader_counts_malformed() {
        let data = "2015\tjava\t30\t1\t2\t3\t1.0\t2.0\t3.0\n\
                    2016\tjava\t30\t1\t2\t3\t1.0\t2.0\n\
                    2017\tjava\t30\t1\t2\t3\t1.0\t2.0\t3.0\textra\n\
                    2018\tgo\t11\t1\t2\t3\t1.0\t2.0\t3.0\n";
        let input = RawInput::from_reader(data.as_bytes()).unwrap();
        assert_eq!(input.n_lines, 4);
        assert_eq!(input.n_malformed, 2);
        assert_eq!(input.len(), 2);
        assert_eq!(input.records[0].field(Column::Year), "2015");
        assert_eq!(input.records[1].field(Column::Tag), "go");
        assert_eq!(input.records[1].line, 4);
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let mut data = b"2015\t".to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        data.extend_from_slice(b"\t30\t1\t2\t3\t1.0\t2.0\t3.0\n");
        let input = RawInput::from_reader(data.as_slice()).unwrap();
        assert_eq!(input.n_malformed, 1);
        assert!(input.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RawInput::from_tsv("/nonexistent/dir/yearly_agg.tsv").unwrap_err();
        assert!(err.is_io());
    }
}
