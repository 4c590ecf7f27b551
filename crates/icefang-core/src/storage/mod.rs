mod config;
pub mod database;
mod store;

pub use config::{CalendarConfig, Config, DashboardConfig, LoggingConfig, UserConfig};
pub use database::Database;
pub use store::{DateRange, EventStore, TaskStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `ICEFANG_DATA_DIR` wins when set. Otherwise `~/.config/icefang`, or
/// `~/.config/icefang-dev` when `ICEFANG_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("ICEFANG_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ICEFANG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("icefang-dev")
            } else {
                base_dir.join("icefang")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
