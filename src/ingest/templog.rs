/// Temperature log reader
///
/// Reads the gzip-compressed per-location logs. Each line holds six
/// whitespace-separated fields:
///
/// ```text
/// YYYY M D H M temperature
/// 2020 1 1 0 0 21.5
/// ```
///
/// There is no header row. Any malformed line aborts the load; nothing is
/// skipped.

use crate::logging::{self, Source};
use crate::model::{LoadError, LocationTable, Reading};
use chrono::{NaiveDate, NaiveDateTime};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of whitespace-separated fields on every log line.
pub const FIELDS_PER_LINE: usize = 6;

/// Years a log timestamp may carry.
pub const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1..=9999;

// ============================================================================
// Line parsing
// ============================================================================

/// Parse one log line into a reading.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_line(line: &str, line_number: usize) -> Result<Reading, LoadError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELDS_PER_LINE {
        return Err(LoadError::FieldCount {
            line: line_number,
            found: fields.len(),
        });
    }

    let parse_int = |s: &str| -> Result<i64, LoadError> {
        s.parse().map_err(|source| LoadError::InvalidInteger {
            line: line_number,
            token: s.to_string(),
            source,
        })
    };

    let year = parse_int(fields[0])?;
    let month = parse_int(fields[1])?;
    let day = parse_int(fields[2])?;
    let hour = parse_int(fields[3])?;
    let minute = parse_int(fields[4])?;

    let temperature: f64 = fields[5]
        .parse()
        .map_err(|source| LoadError::InvalidTemperature {
            line: line_number,
            token: fields[5].to_string(),
            source,
        })?;

    let timestamp = build_timestamp(year, month, day, hour, minute)
        .ok_or(LoadError::InvalidTimestamp { line: line_number })?;

    Ok(Reading { timestamp, temperature })
}

/// Returns `None` when the fields are out of range for a calendar date/time.
fn build_timestamp(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Option<NaiveDateTime> {
    if !YEAR_RANGE.contains(&year) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    date.and_hms_opt(u32::try_from(hour).ok()?, u32::try_from(minute).ok()?, 0)
}

// ============================================================================
// Table building
// ============================================================================

/// Fold every line of `reader` into a location table.
///
/// A later reading with the same timestamp overwrites the earlier one.
pub fn read_location_table<R: BufRead>(reader: R) -> Result<LocationTable, LoadError> {
    let mut readings = LocationTable::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Read { line: i + 1, source })?;
        let reading = parse_line(&line, i + 1)?;
        readings.insert(reading.timestamp, reading.temperature);
    }

    Ok(readings)
}

/// Open, decompress and parse one gzip log file.
///
/// Every gzip member in the file is read, so logs extended by appending
/// compressed chunks load in full. Bytes after a member that are not
/// another gzip member fail the load. The file handle is dropped before
/// returning, on success and on error.
pub fn load_location_file(path: &Path) -> Result<LocationTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = BufReader::new(MultiGzDecoder::new(file));
    let table = read_location_table(reader).map_err(|e| match e {
        LoadError::Read { source, .. } => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other.in_file(path),
    })?;

    logging::debug(
        Source::Loader,
        None,
        &format!("Read {} readings from {}", table.len(), path.display()),
    );

    Ok(table)
}

// ============================================================================
// Tests
// ============================================================================
