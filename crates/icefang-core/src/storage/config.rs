//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Calendar layout settings (cell capacity, ordering, packing, geometry)
//! - The local owner id every store call is scoped by
//! - Log level
//! - Dashboard list sizes
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::{
    CapOrder, LayoutOptions, PackingMode, WeekStart, DEFAULT_MAX_VISIBLE,
    DEFAULT_MIN_BLOCK_HEIGHT, DEFAULT_PIXELS_PER_HOUR,
};
use crate::error::ConfigError;

/// Calendar layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_max_visible")]
    pub max_visible_per_day: usize,
    #[serde(default)]
    pub cap_order: CapOrder,
    #[serde(default)]
    pub packing: PackingMode,
    #[serde(default = "default_pixels_per_hour")]
    pub pixels_per_hour: f64,
    #[serde(default = "default_min_block_height")]
    pub min_block_height: f64,
    #[serde(default)]
    pub week_start: WeekStart,
}

/// Identity used when no `--owner` is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `icefang_core=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

// Default functions
fn default_max_visible() -> usize {
    DEFAULT_MAX_VISIBLE
}
fn default_pixels_per_hour() -> f64 {
    DEFAULT_PIXELS_PER_HOUR
}
fn default_min_block_height() -> f64 {
    DEFAULT_MIN_BLOCK_HEIGHT
}
fn default_owner_id() -> String {
    "local".into()
}
fn default_log_level() -> String {
    "warn".into()
}
fn default_upcoming_limit() -> usize {
    5
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            max_visible_per_day: default_max_visible(),
            cap_order: CapOrder::default(),
            packing: PackingMode::default(),
            pixels_per_hour: default_pixels_per_hour(),
            min_block_height: default_min_block_height(),
            week_start: WeekStart::default(),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            owner_id: default_owner_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

impl CalendarConfig {
    /// Reject geometry that would draw blocks at zero or negative size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("calendar.pixels_per_hour", self.pixels_per_hour),
            ("calendar.min_block_height", self.min_block_height),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be a positive number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl From<&CalendarConfig> for LayoutOptions {
    fn from(c: &CalendarConfig) -> Self {
        LayoutOptions {
            max_visible: c.max_visible_per_day,
            cap_order: c.cap_order,
            packing: c.packing,
            pixels_per_hour: c.pixels_per_hour,
            min_block_height: c.min_block_height,
            week_start: c.week_start,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let unknown = || ConfigError::UnknownKey(key.to_string());

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the default file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.calendar.validate()?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        next.calendar.validate()?;
        *self = next;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Overwrite the config file with defaults and return them.
    pub fn reset() -> Result<Self, ConfigError> {
        let cfg = Self::default();
        cfg.save()?;
        Ok(cfg)
    }

    /// Layout engine options from the `[calendar]` section.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::from(&self.calendar)
    }
}
