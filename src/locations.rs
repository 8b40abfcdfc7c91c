/// Location registry for the house temperature logs.
///
/// Defines the canonical list of sensor placements and the rule mapping a
/// location to its compressed log file. All other modules should reference
/// locations from here rather than hardcoding names or paths.

use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Location metadata
// ---------------------------------------------------------------------------

/// Default directory holding the `<location>.gz` log files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// File extension of every log file.
pub const LOG_FILE_EXTENSION: &str = "gz";

/// Metadata for a single sensor placement.
pub struct Location {
    /// Column name in the combined table and stem of the log file name.
    pub name: &'static str,
    /// Human-readable description of where the sensor sits.
    pub description: &'static str,
}

/// All monitored locations, in combined-table column order.
pub static LOCATION_REGISTRY: &[Location] = &[
    Location {
        name: "basement",
        description: "Sensor in the basement, below grade.",
    },
    Location {
        name: "lab",
        description: "Sensor in the lab room.",
    },
    Location {
        name: "livingroom",
        description: "Sensor in the living room.",
    },
    Location {
        name: "outside",
        description: "Outdoor sensor.",
    },
];

/// Returns the names of all locations in registry order.
pub fn all_location_names() -> Vec<&'static str> {
    LOCATION_REGISTRY.iter().map(|l| l.name).collect()
}

/// Looks up a location by name. Returns `None` if not found.
pub fn find_location(name: &str) -> Option<&'static Location> {
    LOCATION_REGISTRY.iter().find(|l| l.name == name)
}

/// Path of the compressed log for `name`: `<data_dir>/<name>.gz`.
pub fn log_file_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.{}", name, LOG_FILE_EXTENSION))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
