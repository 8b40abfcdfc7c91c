/// Integration tests for loading the combined house temperature table
///
/// Each test writes synthetic gzip logs for the four locations into a
/// temporary data directory and loads them through the public API.
///
/// Run with: cargo test --test house_loading

use chrono::{NaiveDate, NaiveDateTime};
use flate2::write::GzEncoder;
use flate2::Compression;
use plot_exercises::config::Config;
use plot_exercises::ingest::templog::load_location_file;
use plot_exercises::locations::{all_location_names, log_file_path};
use plot_exercises::{load_house_temperatures, load_house_temperatures_with, LoadError};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn gzip_member(contents: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(contents.as_bytes()).expect("write log");
    encoder.finish().expect("finish gzip stream")
}

fn write_log(dir: &Path, location: &str, contents: &str) {
    write_log_bytes(dir, location, &gzip_member(contents));
}

fn write_log_bytes(dir: &Path, location: &str, bytes: &[u8]) {
    let mut file = File::create(log_file_path(dir, location)).expect("create log file");
    file.write_all(bytes).expect("write log file");
}

fn write_all_logs(dir: &Path, logs: [&str; 4]) {
    for (name, contents) in all_location_names().into_iter().zip(logs) {
        write_log(dir, name, contents);
    }
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn test_single_line_maps_timestamp_to_temperature() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_log(dir.path(), "lab", "2020 1 1 0 0 21.5\n");

    let table = load_location_file(&log_file_path(dir.path(), "lab")).expect("log should load");
    assert_eq!(table.len(), 1);
    assert_eq!(table[&ts(2020, 1, 1, 0, 0)], 21.5);
}

#[test]
fn test_index_is_sorted_union_of_overlapping_and_disjoint_logs() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_all_logs(
        dir.path(),
        [
            // basement: out of order within the file
            "2014 3 2 1 0 15.0\n2014 3 2 0 0 14.0\n",
            // lab: overlaps basement at 01:00
            "2014 3 2 1 0 21.0\n2014 3 2 0 30 20.5\n",
            // livingroom: disjoint, earlier day
            "2014 3 1 23 55 19.0\n",
            // outside: disjoint, later
            "2014 3 2 2 0 -1.5\n",
        ],
    );

    let table = load_house_temperatures(dir.path()).expect("house should load");

    assert_eq!(table.columns, vec!["basement", "lab", "livingroom", "outside"]);
    assert_eq!(
        table.index(),
        vec![
            ts(2014, 3, 1, 23, 55),
            ts(2014, 3, 2, 0, 0),
            ts(2014, 3, 2, 0, 30),
            ts(2014, 3, 2, 1, 0),
            ts(2014, 3, 2, 2, 0),
        ]
    );
    assert!(
        table.index().windows(2).all(|w| w[0] < w[1]),
        "rows must be strictly ascending by timestamp"
    );
    assert_eq!(table.get(ts(2014, 3, 2, 1, 0), "basement"), Some(15.0));
    assert_eq!(table.get(ts(2014, 3, 2, 1, 0), "lab"), Some(21.0));
}

#[test]
fn test_timestamp_only_in_lab_is_missing_elsewhere() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_all_logs(
        dir.path(),
        [
            "2020 6 1 12 0 17.0\n",
            "2020 6 1 12 0 22.0\n2020 6 1 12 10 22.4\n",
            "2020 6 1 12 0 21.0\n",
            "2020 6 1 12 0 25.0\n",
        ],
    );

    let table = load_house_temperatures(dir.path()).unwrap();
    let only_lab = ts(2020, 6, 1, 12, 10);
    let row = table
        .rows
        .iter()
        .find(|r| r.timestamp == only_lab)
        .expect("lab-only timestamp should have a row");

    assert_eq!(row.values, vec![None, Some(22.4), None, None]);
}

#[test]
fn test_duplicate_timestamp_keeps_last_value() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_all_logs(
        dir.path(),
        ["2020 1 1 0 0 10.0\n2020 1 1 0 0 11.0\n", "", "", ""],
    );

    let table = load_house_temperatures(dir.path()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(ts(2020, 1, 1, 0, 0), "basement"), Some(11.0));
}

#[test]
fn test_config_data_dir_is_used() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_all_logs(dir.path(), ["2020 1 1 0 0 1.0\n"; 4]);

    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let table = load_house_temperatures_with(&config).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0].values, vec![Some(1.0); 4]);
}

#[test]
fn test_combined_table_exports_json_rows() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_all_logs(dir.path(), ["2020 1 1 0 0 1.0\n", "", "", "2020 1 1 0 5 -2.0\n"]);

    let table = load_house_temperatures(dir.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
    let rows = parsed.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["timestamp"], "2020-01-01T00:05:00");
    assert_eq!(rows[1]["outside"], -2.0);
    assert!(rows[1]["basement"].is_null());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_missing_file_fails_with_io_error() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    // Only three of the four logs exist.
    write_log(dir.path(), "basement", "2020 1 1 0 0 1.0\n");
    write_log(dir.path(), "lab", "2020 1 1 0 0 1.0\n");
    write_log(dir.path(), "livingroom", "2020 1 1 0 0 1.0\n");

    let err = load_house_temperatures(dir.path()).unwrap_err();
    match err {
        LoadError::Io { path, source } => {
            assert_eq!(path, log_file_path(dir.path(), "outside"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_short_line_fails_instead_of_being_skipped() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_all_logs(
        dir.path(),
        [
            "2020 1 1 0 0 1.0\n",
            "2020 1 1 0 0 1.0\n2020 1 1 0 2.0\n",
            "2020 1 1 0 0 1.0\n",
            "2020 1 1 0 0 1.0\n",
        ],
    );

    let err = load_house_temperatures(dir.path()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    match err {
        LoadError::InFile { path, source } => {
            assert_eq!(path, log_file_path(dir.path(), "lab"));
            assert!(matches!(*source, LoadError::FieldCount { found: 5, .. }));
        }
        other => panic!("expected InFile error, got {:?}", other),
    }
}

#[test]
fn test_bad_temperature_token_fails() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_log(dir.path(), "outside", "2020 1 1 0 0 n/a\n");

    let err = load_location_file(&log_file_path(dir.path(), "outside")).unwrap_err();
    assert!(err.to_string().contains("invalid temperature 'n/a'"), "got: {}", err);
}

#[test]
fn test_uncompressed_file_fails_with_io_error() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    let path = log_file_path(dir.path(), "basement");
    std::fs::write(&path, "2020 1 1 0 0 1.0\n").unwrap();

    let err = load_location_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {:?}", err);
}

// ---------------------------------------------------------------------------
// Gzip container
// ---------------------------------------------------------------------------

#[test]
fn test_appended_gzip_members_are_all_read() {
    // Equivalent to `gzip >> lab.gz` run twice.
    let dir = TempDir::new().expect("TempDir should create test directory");
    let mut bytes = gzip_member("2020 1 1 0 0 21.5\n");
    bytes.extend(gzip_member("2020 1 1 0 5 22.0\n"));
    write_log_bytes(dir.path(), "lab", &bytes);

    let table = load_location_file(&log_file_path(dir.path(), "lab")).expect("two-member log should load");
    assert_eq!(table.len(), 2, "readings from the second member must not be dropped");
    assert_eq!(table[&ts(2020, 1, 1, 0, 0)], 21.5);
    assert_eq!(table[&ts(2020, 1, 1, 0, 5)], 22.0);
}

#[test]
fn test_appended_members_feed_the_combined_table() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    write_all_logs(dir.path(), ["2020 1 1 0 0 1.0\n"; 4]);
    let mut bytes = gzip_member("2020 1 1 0 0 1.0\n");
    bytes.extend(gzip_member("2020 1 1 0 10 3.0\n"));
    write_log_bytes(dir.path(), "outside", &bytes);

    let table = load_house_temperatures(dir.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(ts(2020, 1, 1, 0, 10), "outside"), Some(3.0));
}

#[test]
fn test_trailing_non_gzip_bytes_fail_with_io_error() {
    let dir = TempDir::new().expect("TempDir should create test directory");
    let mut bytes = gzip_member("2020 1 1 0 0 21.5\n");
    bytes.extend_from_slice(b"2020 1 1 0 5 not-gzip\n");
    let path = log_file_path(dir.path(), "lab");
    write_log_bytes(dir.path(), "lab", &bytes);

    let err = load_location_file(&path).unwrap_err();
    match err {
        LoadError::Io { path: err_path, .. } => assert_eq!(err_path, path),
        other => panic!("expected Io error for trailing junk, got {:?}", other),
    }
}
