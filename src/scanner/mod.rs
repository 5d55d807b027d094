//! Scanner: directory walking, modification filtering, report writing and
//! the run orchestrator tying them together

pub mod error;
pub mod filter;
pub mod report;
pub mod runner;
pub mod walker;

pub use error::{ScanError, ScanResult};
pub use runner::{RunSummary, ScanRunner};
