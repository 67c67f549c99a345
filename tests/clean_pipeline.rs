//! Integration tests for cleaning raw yearly aggregation files end to end.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};
use yearly_tag_clean::prelude::*;

const HEADER: &str =
    "year\ttag\tcount\ttotal_views\ttotal_score\ttotal_answers\tavg_views\tavg_score\tavg_answers";

/// Raw aggregation output in the shape the upstream job produces.
fn create_raw_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn mixed_input() -> NamedTempFile {
    create_raw_file(&[
        "2015\tpython\t50\t5000\t200\t80\t100.000000\t4.000000\t1.600000",
        "2030\tpython\t50\t100\t20\t5\t2.000000\t0.400000\t0.100000",
        "2015\tjava\t3\t300\t9\t3\t100.000000\t3.000000\t1.000000",
        "2015\tjava\t15\t1500\t30\t15\t100.000000\t2.000000\t1.000000",
        "2015\t\t20\t1\t1\t1\t1.000000\t1.000000\t1.000000",
        "2015\tgo\tNaN\t1\t1\t1\t1.000000\t1.000000\t1.000000",
        "2007\tperl\t90\t900\t90\t90\t10.000000\t1.000000\t1.000000",
        "2024\trust\t10\t\tbad\t7\t\t0.250000\t0.700000",
        "2008\tc++\t11\t110\t-4\t11\t10.000000\t-0.363636\t1.000000",
        "2012\tbroken\t40",
        "2012\tphp\t400\t4000\t400\t400\t10.000000\t1.000000\t1.000000",
    ])
}

#[test]
fn test_default_bounds_end_to_end() {
    let input = mixed_input();
    let dir = tempdir().unwrap();
    let output = dir.path().join("yearly_clean.tsv");

    let report = clean(input.path(), &output, 2008, 2024, 10).unwrap();

    let lines = read_lines(&output);
    assert_eq!(lines[0], HEADER);
    assert_eq!(
        &lines[1..],
        &[
            "2015\tpython\t50\t5000\t200\t80\t100.0\t4.0\t1.6",
            "2015\tjava\t15\t1500\t30\t15\t100.0\t2.0\t1.0",
            "2024\trust\t10\t\t\t7\t\t0.25\t0.7",
            "2008\tc++\t11\t110\t-4\t11\t10.0\t-0.363636\t1.0",
            "2012\tphp\t400\t4000\t400\t400\t10.0\t1.0\t1.0",
        ]
    );

    assert_eq!(report.n_rows, 5);
    assert_eq!(report.n_lines, 11);
    assert_eq!(report.profile.year_sample(5), &[2008, 2012, 2015, 2024]);
}

#[test]
fn test_output_rows_satisfy_invariants() {
    let input = mixed_input();
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.tsv");

    clean(input.path(), &output, 2010, 2020, 12).unwrap();

    let table = YearlyTable::from_tsv(&output).unwrap();
    assert!(!table.is_empty());
    for row in table.iter() {
        assert!((2010..=2020).contains(&row.year));
        assert!(row.count >= 12);
        assert!(!row.tag.trim().is_empty());
    }
    for line in read_lines(&output) {
        assert_eq!(line.split('\t').count(), 9);
    }
}

#[test]
fn test_survivor_order_matches_input() {
    let input = create_raw_file(&[
        "2020\tzeta\t30\t1\t1\t1\t1.0\t1.0\t1.0",
        "2009\talpha\t30\t1\t1\t1\t1.0\t1.0\t1.0",
        "2050\tdropped\t30\t1\t1\t1\t1.0\t1.0\t1.0",
        "2015\tmid\t30\t1\t1\t1\t1.0\t1.0\t1.0",
        "2009\talpha\t30\t1\t1\t1\t1.0\t1.0\t1.0",
    ]);
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.tsv");

    clean(input.path(), &output, 2008, 2024, 10).unwrap();

    let table = YearlyTable::from_tsv(&output).unwrap();
    let tags: Vec<&str> = table.iter().map(|r| r.tag.as_str()).collect();
    assert_eq!(tags, vec!["zeta", "alpha", "mid", "alpha"]);
}

#[test]
fn test_cleaning_is_idempotent() {
    let input = mixed_input();
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.tsv");
    let second = dir.path().join("second.tsv");

    let config = CleanConfig::new(2008, 2024, 10);
    TableCleaner::new(config).clean(input.path(), &first).unwrap();
    let report = TableCleaner::new(config).clean(&first, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    // The header line is the only thing dropped on the second pass.
    assert_eq!(report.n_dropped(), 1);
}

#[test]
fn test_no_survivors_writes_header_only() {
    let input = create_raw_file(&[
        "2030\tpython\t50\t100\t20\t5\t2.0\t0.4\t0.1",
        "2015\tjava\t3\t1\t1\t1\t1.0\t1.0\t1.0",
    ]);
    let dir = tempdir().unwrap();
    let output = dir.path().join("empty.tsv");

    let report = clean(input.path(), &output, 2008, 2024, 10).unwrap();

    assert_eq!(report.n_rows, 0);
    assert_eq!(read_lines(&output), vec![HEADER.to_string()]);
}

#[test]
fn test_empty_input_file() {
    let input = create_raw_file(&[]);
    let dir = tempdir().unwrap();
    let output = dir.path().join("empty.tsv");

    let report = clean(input.path(), &output, 2008, 2024, 10).unwrap();

    assert_eq!(report.n_lines, 0);
    assert_eq!(read_lines(&output), vec![HEADER.to_string()]);
}

#[test]
fn test_inverted_year_bounds_are_not_an_error() {
    let input = mixed_input();
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.tsv");

    let report = clean(input.path(), &output, 2024, 2008, 10).unwrap();

    assert_eq!(report.n_rows, 0);
    assert_eq!(read_lines(&output).len(), 1);
}

#[test]
fn test_existing_output_is_overwritten() {
    let input = mixed_input();
    let mut output = NamedTempFile::new().unwrap();
    writeln!(output, "stale content that should disappear").unwrap();
    for _ in 0..100 {
        writeln!(output, "more stale content").unwrap();
    }
    output.flush().unwrap();

    clean(input.path(), output.path(), 2008, 2024, 10).unwrap();

    let lines = read_lines(output.path());
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.tsv");

    let err = clean(dir.path().join("nope.tsv"), &output, 2008, 2024, 10).unwrap_err();

    assert!(err.is_io());
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_io_error() {
    let input = mixed_input();
    let dir = tempdir().unwrap();
    let output = dir.path().join("no_such_dir").join("out.tsv");

    let err = clean(input.path(), &output, 2008, 2024, 10).unwrap_err();

    assert!(matches!(err, CleanError::Io(_)));
}
