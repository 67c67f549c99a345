//! Cleaned (year, tag) table with TSV output.

use crate::data::coerce::format_float;
use crate::data::record::{RawInput, YearlyTagRow};
use crate::data::schema::{header, Column};
use crate::error::Result;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// An ordered table of surviving rows.
///
/// A row's position in the table is its 0-based ordinal. Filters build new
/// tables through [`YearlyTable::subset`], so ordinals are always dense and
/// follow input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyTable {
    rows: Vec<YearlyTagRow>,
}

impl YearlyTable {
    pub fn new(rows: Vec<YearlyTagRow>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in ordinal order.
    #[inline]
    pub fn rows(&self) -> &[YearlyTagRow] {
        &self.rows
    }

    /// Row at a given ordinal.
    pub fn get(&self, ordinal: usize) -> Option<&YearlyTagRow> {
        self.rows.get(ordinal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearlyTagRow> + '_ {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<YearlyTagRow> {
        self.rows
    }

    /// Create a new table holding the rows at `indices`, in that order.
    ///
    /// Indices past the end are ignored.
    pub fn subset(&self, indices: &[usize]) -> YearlyTable {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        YearlyTable { rows }
    }

    /// Write the table as TSV with a header line.
    ///
    /// Null fields are written empty. The header is written even when the
    /// table has no rows.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_tsv(BufWriter::new(file))
    }

    /// Write the table as TSV to any writer.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        writer.write_record(header())?;
        for row in &self.rows {
            write_row(&mut writer, row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load a table previously written by [`YearlyTable::to_tsv`].
    ///
    /// The first line is taken as the header. Lines that do not satisfy the
    /// row shape are skipped, the same way the cleaner treats raw input.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mut input = RawInput::from_reader(BufReader::new(file))?;
        if input
            .records
            .first()
            .is_some_and(|r| r.field(Column::Year) == Column::Year.name())
        {
            input.records.remove(0);
        }
        let rows = input
            .records
            .into_iter()
            .filter_map(|r| r.coerce().into_row())
            .collect();
        Ok(Self { rows })
    }
}

impl FromIterator<YearlyTagRow> for YearlyTable {
    fn from_iter<I: IntoIterator<Item = YearlyTagRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

fn write_row<W: Write>(writer: &mut Writer<W>, row: &YearlyTagRow) -> Result<()> {
    let int = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
    let float = |v: Option<f64>| v.map(format_float).unwrap_or_default();
    writer.write_record([
        row.year.to_string(),
        row.tag.clone(),
        row.count.to_string(),
        int(row.total_views),
        int(row.total_score),
        int(row.total_answers),
        float(row.avg_views),
        float(row.avg_score),
        float(row.avg_answers),
    ])?;
    Ok(())
}
