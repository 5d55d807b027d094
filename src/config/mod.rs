//! Configuration file loading
//!
//! The configuration is an INI file at a fixed location with a single
//! `[Paths]` section:
//!
//! ```ini
//! [Paths]
//! directories_to_scan = /path/one,/path/two
//! log_path = LOG
//! modified_files_path = MODIFIED_FILE_LIST
//! ```

pub mod ini;

use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::LogSink;
use ini::{IniDocument, IniError};
use std::path::{Path, PathBuf};

/// Location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/CONFIG/config.ini";

/// Section holding every setting
pub const PATHS_SECTION: &str = "Paths";

pub const DIRECTORIES_TO_SCAN_KEY: &str = "directories_to_scan";
pub const LOG_PATH_KEY: &str = "log_path";
pub const MODIFIED_FILES_PATH_KEY: &str = "modified_files_path";

pub const DEFAULT_LOG_PATH: &str = "LOG";
pub const DEFAULT_MODIFIED_FILES_PATH: &str = "MODIFIED_FILE_LIST";

/// Configuration errors. All of them abort the run before any scanning.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found or unreadable: {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing expected section [{section}] in config file {}", .path.display())]
    SectionMissing { path: PathBuf, section: String },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: IniError,
    },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for one scan run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Roots to traverse, in configured order. May be empty.
    pub directories_to_scan: Vec<PathBuf>,
    /// Directory receiving the date-partitioned run logs
    pub log_path: PathBuf,
    /// Directory receiving the per-run report files
    pub modified_files_path: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directories_to_scan: Vec::new(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            modified_files_path: PathBuf::from(DEFAULT_MODIFIED_FILES_PATH),
        }
    }
}

impl ScanConfig {
    /// Build the configuration from a parsed document
    ///
    /// A missing `directories_to_scan` key is an empty target list, not an
    /// error; the runner warns about it.
    pub fn from_document(path: &Path, document: &IniDocument) -> ConfigResult<Self> {
        if !document.has_section(PATHS_SECTION) {
            return Err(ConfigError::SectionMissing {
                path: path.to_path_buf(),
                section: PATHS_SECTION.to_string(),
            });
        }

        let directories_to_scan = document
            .get(PATHS_SECTION, DIRECTORIES_TO_SCAN_KEY)
            .map(parse_directory_list)
            .unwrap_or_default();
        let log_path = document
            .get(PATHS_SECTION, LOG_PATH_KEY)
            .unwrap_or(DEFAULT_LOG_PATH);
        let modified_files_path = document
            .get(PATHS_SECTION, MODIFIED_FILES_PATH_KEY)
            .unwrap_or(DEFAULT_MODIFIED_FILES_PATH);

        Ok(Self {
            directories_to_scan,
            log_path: PathBuf::from(log_path),
            modified_files_path: PathBuf::from(modified_files_path),
        })
    }
}

/// Split a comma-separated directory list, trimming each entry and
/// dropping empty ones
pub fn parse_directory_list(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Read and parse the configuration file without logging
pub fn read_config(path: &Path) -> ConfigResult<ScanConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "configuration file is empty",
            ),
        });
    }

    let document = IniDocument::parse(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    ScanConfig::from_document(path, &document)
}

/// Load the configuration, logging any failure on `sink` before returning it
pub fn load_config(path: &Path, sink: &dyn LogSink) -> ConfigResult<ScanConfig> {
    read_config(path).inspect_err(|e| log_error_with_context(sink, e, "Loading configuration"))
}
