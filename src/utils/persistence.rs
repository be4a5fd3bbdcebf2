//! JSON helpers for files under ~/.wallrun/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.wallrun/ directory path, creating it if needed.
pub fn wallrun_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".wallrun");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.wallrun/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(wallrun_dir()?.join(filename))
}

/// Read and parse a JSON file. Parse failures surface as `InvalidData`.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Load a JSON file, returning `T::default()` if it is missing.
///
/// A file that exists but does not parse is still an error, so a typo in a
/// hand-edited config is reported instead of silently ignored.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    match load_json(path) {
        Ok(value) => Ok(value),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e),
    }
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
