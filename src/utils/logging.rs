//! File logging. The terminal is in raw mode during play, so log lines go to
//! ~/.wallrun/wallrun.log instead of stderr.

use super::persistence::data_path;
use crate::core::constants::LOG_FILE;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Open (append) the log file at `path`.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. Level comes from `RUST_LOG`, default `info`.
///
/// Returns an error only if the log file cannot be opened; a logger that was
/// already installed (tests) is left in place.
pub fn init_file_logger() -> io::Result<()> {
    let file = open_log_file(&data_path(LOG_FILE)?)?;
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialized");
    }
    Ok(())
}
