//! House temperature logs and the flux-qubit potential surface.
//!
//! Two independent pieces of plotting groundwork:
//! - `house::load_house_temperatures` reads the four gzip location logs and
//!   returns one time-indexed `CombinedTable`.
//! - `potential::potential_surface` samples the flux-qubit potential on a
//!   200×200 angle grid.

pub mod analysis;
pub mod config;
pub mod house;
pub mod ingest;
pub mod locations;
pub mod logging;
pub mod model;
pub mod potential;

pub use house::{load_house_temperatures, load_house_temperatures_with};
pub use model::{CombinedTable, LoadError, LocationTable, Reading, TableRow};
pub use potential::{flux_qubit_potential, potential_surface, PotentialSurface};
