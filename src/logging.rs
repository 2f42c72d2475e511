use std::env;
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Writes records to stderr so reports printed on stdout stay parseable.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        // Module path only below info; benchmark progress reads better bare.
        let _ = if record.level() > log::Level::Info {
            writeln!(err, "{:<5} [{}] {}", record.level(), record.target(), record.args())
        } else {
            writeln!(err, "{:<5} {}", record.level(), record.args())
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Environment variable consulted when no level is passed explicitly.
pub const LOG_ENV: &str = "BSHIP_LOG";

/// Install the stderr logger. An explicit `level` wins; otherwise it comes
/// from `BSHIP_LOG`, defaulting to `info` when unset or invalid. Calling
/// this twice keeps the first logger.
pub fn init_logging(level: Option<LevelFilter>) {
    let level = level.unwrap_or_else(|| {
        env::var(LOG_ENV)
            .ok()
            .and_then(|lvl| lvl.parse().ok())
            .unwrap_or(LevelFilter::Info)
    });
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
