//! TOML-based user preferences.
//!
//! Stores display preferences only:
//! - Room listing defaults
//! - Statistics windows
//! - Log verbosity
//!
//! Scheduling and scoring rules are fixed (see [`crate::rules`]).
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, data_dir_path};
use crate::error::{ConfigError, Result};
use crate::rules::MAX_CALENDAR_DAYS;

/// Room listing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomsConfig {
    /// List inactive rooms without `--all`.
    #[serde(default)]
    pub show_inactive: bool,
}

/// Statistics preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_calendar_days")]
    pub calendar_days: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

/// Logging preferences. `RUST_LOG` takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rooms: RoomsConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_calendar_days() -> u32 {
    30
}
fn default_history_limit() -> usize {
    20
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            show_inactive: false,
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            calendar_days: default_calendar_days(),
            history_limit: default_history_limit(),
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

impl Config {
    fn lookup<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.').try_fold(root, |current, part| current.get(part))
    }

    fn assign(root: &mut serde_json::Value, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Self::lookup_mut(root, parent).ok_or_else(unknown)?, leaf),
            None => (root, key),
        };
        let section = parent.as_object_mut().ok_or_else(unknown)?;
        let existing = section.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("expected a non-negative integer, got '{value}'")))?
                    .into(),
            ),
            serde_json::Value::String(_) => serde_json::Value::String(value.to_string()),
            _ => return Err(unknown()),
        };

        section.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn lookup_mut<'a>(root: &'a mut serde_json::Value, key: &str) -> Option<&'a mut serde_json::Value> {
        key.split('.')
            .try_fold(root, |current, part| current.get_mut(part))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content).map_err(ConfigError::from)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Read the existing config file without creating anything on disk.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn read_or_default() -> Self {
        Self::read_from(&data_dir_path().join("config.toml"))
    }

    pub fn read_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read configuration, using defaults");
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot parse configuration, using defaults");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::lookup(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not match
    /// the field's type, or the value is out of range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::assign(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let days = self.stats.calendar_days;
        if !(1..=MAX_CALENDAR_DAYS).contains(&days) {
            return Err(ConfigError::InvalidValue {
                key: "stats.calendar_days".to_string(),
                message: format!("expected 1 to {MAX_CALENDAR_DAYS}, got {days}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert!(!cfg.rooms.show_inactive);
        assert_eq!(cfg.stats.calendar_days, 30);
        assert_eq!(cfg.stats.history_limit, 20);
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[stats]\ncalendar_days = 7\n").unwrap();
        assert_eq!(cfg.stats.calendar_days, 7);
        assert_eq!(cfg.stats.history_limit, 20);
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("rooms.show_inactive").as_deref(), Some("false"));
        assert_eq!(cfg.get("stats.calendar_days").as_deref(), Some("30"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("warn"));
        assert!(cfg.get("stats.missing_key").is_none());
        assert!(cfg.get("stats").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_each_type() {
        let mut cfg = Config::default();
        cfg.set("rooms.show_inactive", "true").unwrap();
        cfg.set("stats.history_limit", "5").unwrap();
        cfg.set("logging.level", "debug").unwrap();
        assert!(cfg.rooms.show_inactive);
        assert_eq!(cfg.stats.history_limit, 5);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.set("stats.nonexistent_key", "1").is_err());
        assert!(cfg.set("nope.level", "1").is_err());
        assert!(cfg.set("stats", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("rooms.show_inactive", "not_a_bool").is_err());
        assert!(cfg.set("stats.calendar_days", "-3").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("stats.calendar_days", "14").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().stats.calendar_days, 14);
    }

    #[test]
    fn read_from_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::read_from(&path), Config::default());
        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());

        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(Config::read_from(&path).logging.level, "debug");
    }

    #[test]
    fn set_rejects_out_of_range_calendar_window() {
        let mut cfg = Config::default();
        for value in ["0", "367", "4294967295", "4294967296"] {
            let err = cfg.set("stats.calendar_days", value).unwrap_err();
            assert!(matches!(
                err,
                CoreError::Config(ConfigError::InvalidValue { .. })
            ));
        }
        assert_eq!(cfg.stats.calendar_days, 30);

        cfg.set("stats.calendar_days", "366").unwrap();
        assert_eq!(cfg.stats.calendar_days, 366);
    }
}
