/// Data organization utilities for the temperature logs.
///
/// This module assembles per-location tables into the combined,
/// time-indexed table handed to plotting code.
///
/// Submodules:
/// - `combine` — outer-joins location tables on timestamp.

pub mod combine;
