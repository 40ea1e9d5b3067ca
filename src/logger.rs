use std::fs::File;
use std::io::Write;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

/// Stdout carries generated code, so log records go to stderr or a log file.
struct BashiLogger {
    file: Option<Mutex<File>>,
    filter: LevelFilter,
    start: Instant,
}

impl Log for BashiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.start.elapsed().as_secs_f64();
        let line = format!(
            "[{elapsed:.3}s] [{}] {} - {}",
            record.level(),
            record.target(),
            record.args()
        );
        match self.file {
            Some(ref file) => {
                let _ = writeln!(file.lock(), "{line}");
            }
            None => eprintln!("{line}"),
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Level from `RUST_LOG`, warnings only when unset or unparsable.
#[must_use]
pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var("RUST_LOG").ok().as_deref())
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the global logger.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger was already installed.
pub fn init(log_file: Option<File>) -> Result<(), SetLoggerError> {
    let filter = level_from_env();
    let logger = BashiLogger {
        file: log_file.map(Mutex::new),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}
