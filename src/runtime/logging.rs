use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::LoggingSettings;

/// Log to a file; the terminal belongs to the TUI. Failure only costs the log.
pub fn init_logging(settings: &LoggingSettings) {
    let file = match File::create(&settings.file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "yinyang: cannot open log file {}: {e}",
                settings.file.display()
            );
            return;
        }
    };

    let level: LevelFilter = settings.level.into();
    if let Err(e) = WriteLogger::init(level, Config::default(), file) {
        eprintln!("yinyang: logging disabled: {e}");
    }
}
