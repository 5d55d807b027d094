//! Scanner Error Types

use crate::config::ConfigError;
use crate::core::error_handling::ContextualError;
use std::path::PathBuf;

/// Fatal errors of a scan run
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The run log file could not be opened
    #[error("Failed to open run log in {}: {message}", .path.display())]
    LogInit { path: PathBuf, message: String },

    /// The report file could not be created or written
    #[error("Failed to write modified files list to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::Config(e) => e.is_user_actionable(), // User can fix config issues
            ScanError::LogInit { .. } => false,
            ScanError::Write { .. } => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            ScanError::Config(e) => e.user_message(),
            _ => None,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
