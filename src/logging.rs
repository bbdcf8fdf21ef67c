//! Stderr backend for the `log` facade used by the CLI.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!(
        "[{} {}] {}",
        record.level(),
        record.target(),
        record.args()
    )
}

/// Install the stderr logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn record_shows_level_and_target() {
        assert_eq!(
            format_record(
                &Record::builder()
                    .level(Level::Debug)
                    .target("lingo::dsl::lexer")
                    .args(format_args!("line {} ready", 3))
                    .build()
            ),
            "[DEBUG lingo::dsl::lexer] line 3 ready"
        );
    }
}
