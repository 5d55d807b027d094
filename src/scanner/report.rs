//! Report file naming and writing

use super::error::{ScanError, ScanResult};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Timestamp format of report file names
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// `<YYYY_MM_DD_HH_MM_SS>.txt` for the given instant
pub fn report_file_name(at: &DateTime<Local>) -> String {
    format!("{}.txt", at.format(REPORT_TIMESTAMP_FORMAT))
}

/// Full report path inside `directory`
pub fn report_path(directory: &Path, at: &DateTime<Local>) -> PathBuf {
    directory.join(report_file_name(at))
}

/// Write one path per line to `output`, replacing any existing file
///
/// The parent directory must already exist.
pub fn write_report(entries: &[PathBuf], output: &Path) -> ScanResult<()> {
    let write_error = |source: std::io::Error| ScanError::Write {
        path: output.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(output).map_err(write_error)?);
    for entry in entries {
        writer.write_all(&path_bytes(entry)).map_err(write_error)?;
        writer.write_all(b"\n").map_err(write_error)?;
    }
    writer.flush().map_err(write_error)
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
