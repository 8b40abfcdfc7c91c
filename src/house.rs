//! Assembles the combined house temperature table.
//!
//! Loads every location in `LOCATION_REGISTRY` from its gzip log and outer
//! joins the results. The first failing file aborts the whole load.

use crate::analysis::combine::combine_tables;
use crate::config::Config;
use crate::ingest::templog::load_location_file;
use crate::locations::{log_file_path, LOCATION_REGISTRY};
use crate::logging;
use crate::model::{CombinedTable, LoadError, LocationTable};
use std::path::Path;

/// Load all four location logs from `data_dir` into one table.
///
/// Columns are `basement`, `lab`, `livingroom`, `outside`; rows are the
/// sorted union of every timestamp seen.
pub fn load_house_temperatures(data_dir: &Path) -> Result<CombinedTable, LoadError> {
    let mut tables: Vec<(&str, LocationTable)> = Vec::with_capacity(LOCATION_REGISTRY.len());

    for location in LOCATION_REGISTRY {
        let path = log_file_path(data_dir, location.name);
        let table = load_location_file(&path).inspect_err(|e| {
            logging::log_load_failure(location.name, "Loading temperature log", e)
        })?;
        tables.push((location.name, table));
    }

    let combined = combine_tables(&tables);

    let counts: Vec<(&str, usize)> = tables.iter().map(|(name, t)| (*name, t.len())).collect();
    logging::log_load_summary(&counts, combined.len());

    Ok(combined)
}

/// `load_house_temperatures` using the configured data directory.
pub fn load_house_temperatures_with(config: &Config) -> Result<CombinedTable, LoadError> {
    load_house_temperatures(&config.data_dir)
}
