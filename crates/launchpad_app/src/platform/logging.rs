//! Platform logging initialization for launchpad.
//!
//! The terminal belongs to the UI while it runs, so logs go to a file.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Initialize the file logger at `path`, truncating any previous log.
///
/// Startup continues without logging if the file cannot be created.
pub fn initialize(path: &Path, level: LevelFilter) {
    let Some(file_logger) = create_file_logger(path, level, build_config()) else {
        return;
    };
    let loggers: Vec<Box<dyn SharedLogger>> = vec![file_logger];
    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
