/// Core data types for the temperature-log loader.
///
/// This module defines the shared domain model imported by the ingest,
/// analysis and export code. It contains no I/O, only types and the
/// error enum every loader operation returns.

use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// A single timestamped temperature measurement.
///
/// Timestamps carry whole-minute resolution; the seconds field is always 0.
/// The temperature unit is whatever the log files use (assumed Celsius).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
}

/// All readings for one location, keyed by timestamp.
///
/// Inserting a duplicate timestamp replaces the earlier value.
pub type LocationTable = BTreeMap<NaiveDateTime, f64>;

// ---------------------------------------------------------------------------
// Combined table
// ---------------------------------------------------------------------------

/// One row of the combined table: a timestamp plus one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub timestamp: NaiveDateTime,
    /// `None` where the column's location had no reading at this timestamp.
    pub values: Vec<Option<f64>>,
}

/// Outer join of several location tables on timestamp.
///
/// Rows are strictly ascending by timestamp and every row has exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl CombinedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row index, in row order.
    pub fn index(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|r| r.timestamp).collect()
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Every cell of one column, in row order. `None` for an unknown column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let pos = self.column_position(name)?;
        Some(self.rows.iter().map(|r| r.values[pos]).collect())
    }

    /// The cell at (`timestamp`, `name`), or `None` if the row or column
    /// does not exist or the cell is missing.
    pub fn get(&self, timestamp: NaiveDateTime, name: &str) -> Option<f64> {
        let pos = self.column_position(name)?;
        let row = self
            .rows
            .binary_search_by(|r| r.timestamp.cmp(&timestamp))
            .ok()?;
        self.rows[row].values[pos]
    }

    /// Serializes the table as a JSON array of row objects for plotting.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let rows: Vec<RowRecord<'_>> = self
            .rows
            .iter()
            .map(|row| RowRecord { columns: &self.columns, row })
            .collect();
        serde_json::to_string(&rows)
    }
}

/// A row paired with the column names, serialized as
/// `{"timestamp": ..., "<column>": value|null, ...}`.
struct RowRecord<'a> {
    columns: &'a [String],
    row: &'a TableRow,
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 1))?;
        map.serialize_entry("timestamp", &self.row.timestamp)?;
        for (name, value) in self.columns.iter().zip(&self.row.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while loading a temperature log.
///
/// Each variant wraps the underlying failure unchanged; nothing is retried
/// or skipped.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened, decompressed or read.
    Io { path: PathBuf, source: std::io::Error },
    /// Reading a line from an already-open stream failed (bad UTF-8, a
    /// corrupt compressed stream). `load_location_file` turns this into `Io`.
    Read { line: usize, source: std::io::Error },
    /// A line did not split into exactly six whitespace-separated tokens.
    FieldCount { line: usize, found: usize },
    /// One of the five date/time tokens is not an integer.
    InvalidInteger { line: usize, token: String, source: ParseIntError },
    /// The temperature token is not a float.
    InvalidTemperature { line: usize, token: String, source: ParseFloatError },
    /// The integer fields do not form a real calendar date and time.
    InvalidTimestamp { line: usize },
    /// A parse error attributed to the file it came from.
    InFile { path: PathBuf, source: Box<LoadError> },
}

impl LoadError {
    /// Attaches the file path to a line-level parse error. I/O errors
    /// already carry their path and are returned unchanged.
    pub fn in_file(self, path: impl Into<PathBuf>) -> LoadError {
        match self {
            LoadError::Io { .. } | LoadError::InFile { .. } => self,
            other => LoadError::InFile { path: path.into(), source: Box::new(other) },
        }
    }

    /// The 1-based line number for parse errors, looking through `InFile`.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::Read { line, .. }
            | LoadError::FieldCount { line, .. }
            | LoadError::InvalidInteger { line, .. }
            | LoadError::InvalidTemperature { line, .. }
            | LoadError::InvalidTimestamp { line } => Some(*line),
            LoadError::InFile { source, .. } => source.line(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            LoadError::Read { line, source } => {
                write!(f, "Line {}: read error: {}", line, source)
            }
            LoadError::FieldCount { line, found } => {
                write!(f, "Line {}: expected 6 fields, found {}", line, found)
            }
            LoadError::InvalidInteger { line, token, source } => {
                write!(f, "Line {}: invalid integer '{}': {}", line, token, source)
            }
            LoadError::InvalidTemperature { line, token, source } => {
                write!(f, "Line {}: invalid temperature '{}': {}", line, token, source)
            }
            LoadError::InvalidTimestamp { line } => {
                write!(f, "Line {}: fields do not form a valid date and time", line)
            }
            LoadError::InFile { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Read { source, .. } => Some(source),
            LoadError::InvalidInteger { source, .. } => Some(source),
            LoadError::InvalidTemperature { source, .. } => Some(source),
            LoadError::InFile { source, .. } => Some(source.as_ref()),
            LoadError::FieldCount { .. } | LoadError::InvalidTimestamp { .. } => None,
        }
    }
}
