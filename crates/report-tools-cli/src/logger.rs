use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

/// Stderr logger with local timestamps
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(verbose: bool) -> Self {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

fn format_entry(record: &Record) -> String {
    let tag = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!(
        "{} {} [{}] {}",
        Local::now().format("%H:%M:%S%.3f"),
        tag,
        record.target(),
        record.args()
    )
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_entry(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_verbose_enables_debug() {
        let quiet = CliLogger::new(false);
        let verbose = CliLogger::new(true);
        let debug = Metadata::builder().level(Level::Debug).build();

        assert!(!quiet.enabled(&debug));
        assert!(verbose.enabled(&debug));
    }

    #[test]
    fn test_entry_format() {
        let entry = format_entry(
            &Record::builder()
                .args(format_args!("Composing cover"))
                .level(Level::Info)
                .target("report_compose")
                .build(),
        );
        assert!(entry.ends_with("INFO  [report_compose] Composing cover"));
    }
}
