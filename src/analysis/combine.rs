//! Outer join of per-location tables on timestamp.
//!
//! The combined table has one column per input table, in input order, and
//! one row for every timestamp seen in at least one table. Rows come out in
//! ascending timestamp order because the row index is collected into a
//! `BTreeSet`.

use crate::model::{CombinedTable, LocationTable, TableRow};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// Merge named location tables into one combined table.
///
/// Cells for timestamps a location did not report are `None`.
pub fn combine_tables<S: AsRef<str>>(tables: &[(S, LocationTable)]) -> CombinedTable {
    let index: BTreeSet<NaiveDateTime> = tables
        .iter()
        .flat_map(|(_, table)| table.keys().copied())
        .collect();

    let rows = index
        .into_iter()
        .map(|timestamp| TableRow {
            timestamp,
            values: tables
                .iter()
                .map(|(_, table)| table.get(&timestamp).copied())
                .collect(),
        })
        .collect();

    CombinedTable {
        columns: tables.iter().map(|(name, _)| name.as_ref().to_string()).collect(),
        rows,
    }
}
