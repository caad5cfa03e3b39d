/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Logging setup for the pokedex binaries.
//!
//! A full-screen TUI owns the terminal, so by default logs go to a
//! file. `POKEDEX_LOG_SINK` picks the sink and `RUST_LOG` the filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

// Environment variable to select the log sink
pub const LOG_SINK_ENV: &str = "POKEDEX_LOG_SINK";

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "pokedex_tui.log";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    File,
    Stderr,
    None,
}

impl LogSink {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_SINK_ENV).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("stderr") => LogSink::Stderr,
            Some("none") => LogSink::None,
            Some("file") | Some("") | None => LogSink::File,
            Some(other) => {
                // No subscriber yet; this can only go to stderr.
                eprintln!("unknown {}={:?}, logging to file", LOG_SINK_ENV, other);
                LogSink::File
            }
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber for the sink named by
/// `POKEDEX_LOG_SINK`. Calling this again is a no-op.
pub fn init_logging(log_file: &Path) -> anyhow::Result<LogSink> {
    let sink = LogSink::from_env();
    init_with_sink(sink, log_file)?;
    Ok(sink)
}

/// Install the global subscriber for `sink`.
pub fn init_with_sink(sink: LogSink, log_file: &Path) -> anyhow::Result<()> {
    match sink {
        LogSink::File => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("failed to open log file {}", log_file.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        LogSink::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogSink::None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::sink)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_parsing() {
        assert_eq!(LogSink::parse(None), LogSink::File);
        assert_eq!(LogSink::parse(Some("")), LogSink::File);
        assert_eq!(LogSink::parse(Some("file")), LogSink::File);
        assert_eq!(LogSink::parse(Some("stderr")), LogSink::Stderr);
        assert_eq!(LogSink::parse(Some(" none ")), LogSink::None);
        assert_eq!(LogSink::parse(Some("syslog")), LogSink::File);
    }

    #[test]
    fn test_init_is_idempotent() {
        let path = std::env::temp_dir().join(format!(
            "pokedex_telemetry_test_{}.log",
            std::process::id()
        ));
        init_with_sink(LogSink::File, &path).unwrap();
        init_with_sink(LogSink::None, &path).unwrap();
        tracing::info!("hello");
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let path = std::env::temp_dir()
            .join("pokedex_telemetry_missing_dir")
            .join("nested")
            .join("x.log");
        assert!(init_with_sink(LogSink::File, &path).is_err());
    }
}
