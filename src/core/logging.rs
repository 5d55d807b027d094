//! Logging for a scan run
//!
//! Logging is initialised in two phases. The console logger (flexi_logger on
//! stderr) starts before anything else so that configuration failures are
//! visible. Once the configuration is known, a [`RunLog`] is opened on the
//! date-partitioned log file and handed to every component as a
//! [`LogSink`].

use flexi_logger::writers::{FileLogWriter, LogWriter};
use flexi_logger::{DeferredNow, FileSpec, FlexiLoggerError, Logger, LoggerHandle};
use log::{Level, Record};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local};

/// Basename prefix of the run log files
pub const LOG_FILE_PREFIX: &str = "file_changes_log";

/// Date format used in run log file names
pub const LOG_FILE_DATE_FORMAT: &str = "%Y_%m_%d";

/// Timestamp format used on each run log line
pub const LOG_LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RUN_LOG_TARGET: &str = "changescan::run";

// Global static logger handle for flexi_logger
static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();

/// Destination for the events of a single run
///
/// Components receive a sink explicitly rather than writing to ambient
/// logger state.
pub trait LogSink {
    fn log(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

/// Start the stderr console logger
///
/// Only warnings and errors reach the console; the full record of a run
/// goes to its [`RunLog`].
pub fn init_console_logging() -> Result<(), FlexiLoggerError> {
    let mut logger = Logger::try_with_str("warn")?.log_to_stderr();

    if std::io::stderr().is_terminal() {
        logger = logger.format(simple_color_format);
    } else {
        logger = logger.format(simple_format);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

/// Sink forwarding to the `log` facade, used before the run log exists
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: RUN_LOG_TARGET, level, "{}", message);
    }
}

/// Append-only, date-partitioned log file for one run
///
/// Every event is also mirrored to the `log` facade so the console logger
/// shows warnings and errors.
pub struct RunLog {
    writer: FileLogWriter,
    path: PathBuf,
    min_level: Level,
}

impl RunLog {
    /// Open (or create) `<directory>/file_changes_log_<YYYY_MM_DD>.log`
    pub fn open(directory: &Path, date: &DateTime<Local>) -> Result<Self, FlexiLoggerError> {
        let basename = log_file_basename(date);
        let path = directory.join(format!("{basename}.log"));

        let writer = FileLogWriter::builder(
            FileSpec::default()
                .directory(directory)
                .basename(basename)
                .suppress_timestamp()
                .suffix("log"),
        )
        .append()
        .format(run_log_format)
        .try_build()?;

        Ok(Self {
            writer,
            path,
            min_level: Level::Info,
        })
    }

    /// Path of the log file being appended to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for RunLog {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: RUN_LOG_TARGET, level, "{}", message);

        if level > self.min_level {
            return;
        }

        let written = self.writer.write(
            &mut DeferredNow::new(),
            &Record::builder()
                .level(level)
                .target(RUN_LOG_TARGET)
                .args(format_args!("{message}"))
                .build(),
        );
        if let Err(e) = written.and_then(|_| self.writer.flush()) {
            log::warn!("Could not write to run log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
        self.writer.shutdown();
    }
}

/// In-memory sink that keeps every event, for tests and embedders that want
/// to inspect what a run reported
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events in order
    pub fn events(&self) -> Vec<(Level, String)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages recorded at exactly `level`
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((level, message.to_string()));
        }
    }
}

/// `file_changes_log_<YYYY_MM_DD>` for the given date
pub fn log_file_basename(date: &DateTime<Local>) -> String {
    format!("{}_{}", LOG_FILE_PREFIX, date.format(LOG_FILE_DATE_FORMAT))
}

/// Level names as they appear in the run log
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

// Run log format: "YYYY-MM-DD HH:MM:SS - LEVEL - message"
fn run_log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} - {} - {}",
        now.format(LOG_LINE_TIMESTAMP_FORMAT),
        level_name(record.level()),
        record.args()
    )
}

// Console format: "YYYY-MM-DD HH:mm:ss.fff WRN message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level_abbr = match record.level() {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "TRC",
    };

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr,
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    use colored::*;

    let level_colored = match record.level() {
        Level::Error => "ERR".red().bold(),
        Level::Warn => "WRN".yellow(),
        Level::Info => "INF".green(),
        Level::Debug => "DBG".blue(),
        Level::Trace => "TRC".magenta(),
    };

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored,
        record.args()
    )
}
