/// Structured logging for the loaders and the surface builder
///
/// Provides level-filtered messages tagged with their source and, where
/// relevant, the location they concern. Supports console output and
/// appending to a log file. Until `init_logger` is called every log
/// function is a no-op.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Loader,
    Potential,
    Config,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Loader => write!(f, "LOAD"),
            Source::Potential => write!(f, "POT"),
            Source::Config => write!(f, "CFG"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    fn log(&self, level: LogLevel, source: &Source, location: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let entry = format_entry(level, source, location, message);

        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", entry),
            }
        } else {
            let location_part = location.map(|l| format!(" [{}]", l)).unwrap_or_default();
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, location_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, location_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// `<utc timestamp> <LEVEL> <SOURCE>[ [location]]: <message>`
fn format_entry(level: LogLevel, source: &Source, location: Option<&str>, message: &str) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let location_part = location.map(|l| format!(" [{}]", l)).unwrap_or_default();
    format!("{} {} {}{}: {}", timestamp, level, source, location_part, message)
}

fn dispatch(level: LogLevel, source: Source, location: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, &source, location, message);
        }
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize (or replace) the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    let logger = Logger {
        min_level,
        log_file: log_file.map(String::from),
        console_timestamps,
    };
    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }
}

/// Initialize the global logger from the crate configuration.
pub fn init_from_config(config: &crate::config::Config) -> Result<(), String> {
    let level = config.log_level()?;
    init_logger(level, config.log_file.as_deref(), true);
    Ok(())
}

pub fn info(source: Source, location: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, source, location, message);
}

pub fn warn(source: Source, location: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, source, location, message);
}

pub fn error(source: Source, location: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, source, location, message);
}

pub fn debug(source: Source, location: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, source, location, message);
}

// ---------------------------------------------------------------------------
// Loader helpers
// ---------------------------------------------------------------------------

/// Log a failed load of one location's file.
pub fn log_load_failure(location: &str, operation: &str, err: &dyn std::error::Error) {
    let message = format!("{} failed: {}", operation, err);
    error(Source::Loader, Some(location), &message);
}

/// Log the outcome of assembling the combined table.
///
/// Warns when some location contributed no readings at all.
pub fn log_load_summary(counts: &[(&str, usize)], total_rows: usize) {
    let parts: Vec<String> = counts
        .iter()
        .map(|(name, n)| format!("{}={}", name, n))
        .collect();
    let message = format!(
        "Loaded {} locations into {} rows ({})",
        counts.len(),
        total_rows,
        parts.join(", ")
    );

    if counts.iter().any(|(_, n)| *n == 0) {
        warn(Source::Loader, None, &message);
    } else {
        info(Source::Loader, None, &message);
    }
}
