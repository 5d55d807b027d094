//! Common test utilities and helpers
//!
//! Fixtures for building scan trees with controlled modification times and
//! configuration files pointing into a temporary directory.

use chrono::{DateTime, Local, TimeZone};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

/// Fixed "now" used by runs driven by a `FixedClock`
pub fn run_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 11, 5, 16, 45, 30).unwrap()
}

/// Create (or truncate) `path`, creating parents, with the given mtime
pub fn touch(path: &Path, modified: SystemTime) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "#!/bin/sh\n").unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}

/// Temporary workspace holding a config file and the output directories
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.path("LOG")
    }

    pub fn report_dir(&self) -> PathBuf {
        self.path("MODIFIED_FILE_LIST")
    }

    /// Write a config whose `[Paths]` section holds `extra` plus log and
    /// report directories inside the workspace
    pub fn write_config(&self, extra: &str) -> PathBuf {
        let config_path = self.path("config.ini");
        let contents = format!(
            "[Paths]\n{}\nlog_path = {}\nmodified_files_path = {}\n",
            extra,
            self.log_dir().display(),
            self.report_dir().display()
        );
        fs::write(&config_path, contents).unwrap();
        config_path
    }

    /// Write arbitrary config text
    pub fn write_raw_config(&self, contents: &str) -> PathBuf {
        let config_path = self.path("config.ini");
        fs::write(&config_path, contents).unwrap();
        config_path
    }

    /// Contents of the run log for `date`, or empty if it was never written
    pub fn log_contents(&self, date: &DateTime<Local>) -> String {
        let name = format!("file_changes_log_{}.log", date.format("%Y_%m_%d"));
        fs::read_to_string(self.log_dir().join(name)).unwrap_or_default()
    }

    /// Report files written so far
    pub fn reports(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.report_dir()) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}
