//! Locating and loading the game config.

use super::persistence::{data_path, load_json_or_default, save_json};
use crate::core::config::GameConfig;
use crate::core::constants::CONFIG_FILE;
use std::io;
use std::path::{Path, PathBuf};

/// `--config PATH` if given, otherwise ~/.wallrun/config.json.
pub fn config_path(explicit: Option<&Path>) -> io::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => data_path(CONFIG_FILE),
    }
}

/// Load and validate a config. A missing file yields the defaults.
pub fn load_config(path: &Path) -> io::Result<GameConfig> {
    let config: GameConfig = load_json_or_default(path)?;
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(config)
}

/// Load the config, falling back to defaults (with a warning) on any problem.
pub fn load_config_or_default(path: &Path) -> GameConfig {
    match load_config(path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("using default config, {} is unusable: {}", path.display(), e);
            GameConfig::default()
        }
    }
}

/// Write the defaults to `path` so players have a file to edit.
pub fn write_default_config(path: &Path) -> io::Result<()> {
    save_json(path, &GameConfig::default())
}
