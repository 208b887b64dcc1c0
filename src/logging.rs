//! A minimal `log` backend writing to stderr.
//!
//! The library only talks to the `log` facade. Binaries call [`init`] once to
//! see those records.

use std::sync::OnceLock;

use anstream::eprintln;
use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;
use owo_colors::OwoColorize;

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

#[derive(Debug)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let tag = format!("{level:<5}");
        let tag = match level {
            Level::Error => tag.red().bold().to_string(),
            Level::Warn => tag.yellow().bold().to_string(),
            Level::Info => tag.green().to_string(),
            Level::Debug => tag.blue().to_string(),
            Level::Trace => tag.dimmed().to_string(),
        };
        eprintln!("[{tag} {}] {}", record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Installs the stderr logger. Only the first call has any effect.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let logger = LOGGER.get_or_init(|| StderrLogger::new(level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
