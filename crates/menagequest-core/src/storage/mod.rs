mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Location of the data directory, without touching the filesystem.
///
/// `MENAGEQUEST_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/menagequest[-dev]/`, where `MENAGEQUEST_ENV=dev` selects the
/// development directory.
pub fn data_dir_path() -> PathBuf {
    match std::env::var_os("MENAGEQUEST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("MENAGEQUEST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("menagequest-dev")
            } else {
                base_dir.join("menagequest")
            }
        }
    }
}

/// Returns the data directory, creating it if needed.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
