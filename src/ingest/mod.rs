/// Readers for the raw input files.
///
/// Submodules:
/// - `templog` — parses the gzip-compressed per-location temperature logs.

pub mod templog;
