// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Console logging glue for the `log` facade.
//!
//! Library code logs through `log::` macros only; binaries install this
//! console logger once at startup. Level selection comes from the
//! `STRIDER_LOG` environment variable (`off`, `error`, `warn`, `info`,
//! `debug`, `trace`; default `info`).

use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Stderr logger with `[LEVEL] message` lines.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the console logger at `filter`.
///
/// # Errors
/// A logger was already installed.
pub fn init(filter: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(filter);
    Ok(())
}

/// Install the console logger at the level `STRIDER_LOG` selects.
///
/// # Errors
/// A logger was already installed.
pub fn init_from_env() -> Result<(), SetLoggerError> {
    init(level_from_env())
}

fn level_from_env() -> LevelFilter {
    parse_level(std::env::var("STRIDER_LOG").ok().as_deref())
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    match value {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("off")), LevelFilter::Off);
        // Unknown values fall back to the default.
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
    }
}
