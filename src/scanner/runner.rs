//! Scan run orchestration
//!
//! A run is a linear pipeline: load the configuration, open the run log,
//! walk and filter the configured directories, write the report. Every run
//! ends with a completion line stating whether it succeeded.

use super::error::{ScanError, ScanResult};
use super::filter::{cutoff_from, ModificationFilter};
use super::report::{report_path, write_report};
use super::walker::{DirectoryWalker, FileWalker};
use crate::config::{load_config, ScanConfig, DEFAULT_CONFIG_PATH};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{LogSink, RunLog};
use crate::core::time::{Clock, SystemClock};
use chrono::{DateTime, Local};
use log::Level;
use std::path::{Path, PathBuf};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Matched files in traversal order
    pub matched: Vec<PathBuf>,
    /// Report written for this run, if anything matched
    pub report: Option<PathBuf>,
}

impl RunSummary {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// Runs the scan pipeline with an injectable walker and clock
pub struct ScanRunner<W = DirectoryWalker, C = SystemClock> {
    config_path: PathBuf,
    walker: W,
    clock: C,
}

impl ScanRunner {
    /// Runner reading the fixed configuration path against the real
    /// filesystem and system clock
    pub fn new() -> Self {
        Self::with_parts(DEFAULT_CONFIG_PATH, DirectoryWalker, SystemClock)
    }
}

impl Default for ScanRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: FileWalker, C: Clock> ScanRunner<W, C> {
    pub fn with_parts(config_path: impl Into<PathBuf>, walker: W, clock: C) -> Self {
        Self {
            config_path: config_path.into(),
            walker,
            clock,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Execute a complete run
    ///
    /// `bootstrap` receives events until the run log is open: configuration
    /// and log initialisation failures end up there. Everything afterwards
    /// goes to the run log file.
    ///
    /// The completion line is always written: to the run log when it could
    /// be opened, otherwise to `bootstrap`.
    pub fn run(&self, bootstrap: &dyn LogSink) -> ScanResult<RunSummary> {
        let started = self.clock.now();

        let (config, run_log) = match self.prepare(bootstrap, &started) {
            Ok(prepared) => prepared,
            Err(e) => return finish(bootstrap, Err(e)),
        };

        self.run_with_config(&config, &run_log, started)
    }

    /// Load the configuration and open the run log, logging failures on
    /// `bootstrap`
    fn prepare(
        &self,
        bootstrap: &dyn LogSink,
        started: &DateTime<Local>,
    ) -> ScanResult<(ScanConfig, RunLog)> {
        let config = load_config(&self.config_path, bootstrap)?;

        let run_log = open_run_log(&config.log_path, started)
            .inspect_err(|e| log_error_with_context(bootstrap, e, "Opening run log"))?;

        Ok((config, run_log))
    }

    /// Scan and report with an already loaded configuration, logging to
    /// `sink`, then log the completion line
    pub fn run_with_config(
        &self,
        config: &ScanConfig,
        sink: &dyn LogSink,
        started: DateTime<Local>,
    ) -> ScanResult<RunSummary> {
        finish(sink, self.scan_and_report(config, sink, started))
    }

    fn scan_and_report(
        &self,
        config: &ScanConfig,
        sink: &dyn LogSink,
        started: DateTime<Local>,
    ) -> ScanResult<RunSummary> {
        if config.directories_to_scan.is_empty() {
            sink.warn(
                "No directories configured to scan (directories_to_scan is empty or missing).",
            );
        }

        let filter = ModificationFilter::new(cutoff_from(started));
        let matched = filter.select(self.walker.walk(&config.directories_to_scan));

        if matched.is_empty() {
            sink.info("No modified files found.");
            return Ok(RunSummary {
                matched,
                report: None,
            });
        }

        let report = report_path(&config.modified_files_path, &self.clock.now());
        prepare_report_directory(&config.modified_files_path)
            .and_then(|_| write_report(&matched, &report))
            .inspect_err(|e| log_error_with_context(sink, e, "Writing report"))?;

        sink.info(&format!("Found and logged {} modified files.", matched.len()));

        Ok(RunSummary {
            matched,
            report: Some(report),
        })
    }
}

/// Level and text of the final line of a run
pub fn completion_line(result: &ScanResult<RunSummary>) -> (Level, String) {
    match result {
        Ok(summary) => (
            Level::Info,
            format!(
                "Execution completed: {} modified files found.",
                summary.matched_count()
            ),
        ),
        Err(e) => (Level::Error, format!("Execution completed with errors: {}", e)),
    }
}

fn finish(sink: &dyn LogSink, result: ScanResult<RunSummary>) -> ScanResult<RunSummary> {
    let (level, message) = completion_line(&result);
    sink.log(level, &message);
    result
}

fn open_run_log(log_path: &Path, started: &DateTime<Local>) -> ScanResult<RunLog> {
    let log_init_error = |message: String| ScanError::LogInit {
        path: log_path.to_path_buf(),
        message,
    };

    std::fs::create_dir_all(log_path).map_err(|e| log_init_error(e.to_string()))?;
    RunLog::open(log_path, started).map_err(|e| log_init_error(e.to_string()))
}

fn prepare_report_directory(directory: &Path) -> ScanResult<()> {
    std::fs::create_dir_all(directory).map_err(|source| ScanError::Write {
        path: directory.to_path_buf(),
        source,
    })
}
