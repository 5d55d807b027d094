use crate::core::logging::{init_console_logging, ConsoleSink, LogSink};
use crate::core::time::Clock;
use crate::core::version;
use crate::scanner::walker::FileWalker;
use crate::scanner::ScanRunner;

/// Run one scan and exit with its status
///
/// Exit code 0 on success, including runs that matched nothing; 1 on any
/// fatal error. The error itself has already been logged by the runner.
pub fn startup() {
    if let Err(e) = init_console_logging() {
        eprintln!("Error initialising console logging: {}", e);
    }

    log::debug!(
        "changescan {} starting (built {}, {})",
        version::version(),
        version::build_time(),
        version::git_hash()
    );

    let runner = ScanRunner::new();
    log::debug!("Using configuration file {}", runner.config_path().display());

    let code = run_scan(&runner, &ConsoleSink);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Drive one run and map its outcome to a process exit code
pub fn run_scan<W: FileWalker, C: Clock>(
    runner: &ScanRunner<W, C>,
    bootstrap: &dyn LogSink,
) -> i32 {
    match runner.run(bootstrap) {
        Ok(summary) => {
            log::debug!(
                "Run finished with {} matched files",
                summary.matched_count()
            );
            0
        }
        Err(e) => {
            log::debug!("Run failed: {}", e);
            1
        }
    }
}
