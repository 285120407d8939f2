//! Persistent user preferences for the billing engine.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    billing::{DEFAULT_PROJECTION_MONTHS, MAX_PROJECTION_MONTHS},
    utils::{paths, persistence::write_atomic},
};

const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// User-configurable engine preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Horizon used when projecting the subscription calendar.
    #[serde(default = "Config::default_projection_months")]
    pub projection_months: u32,
    #[serde(default = "Config::default_upcoming_window_days")]
    pub upcoming_window_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to `~/.billing_core`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            projection_months: Self::default_projection_months(),
            upcoming_window_days: Self::default_upcoming_window_days(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_projection_months() -> u32 {
        DEFAULT_PROJECTION_MONTHS
    }

    pub fn default_upcoming_window_days() -> u32 {
        DEFAULT_UPCOMING_WINDOW_DAYS
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::app_data_dir)
    }

    /// Rejects projection horizons the engine will not walk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projection_months > MAX_PROJECTION_MONTHS {
            return Err(ConfigError::Invalid(format!(
                "projection_months must be at most {MAX_PROJECTION_MONTHS}, got {}",
                self.projection_months
            )));
        }
        Ok(())
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(paths::config_file_in(&base)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            let config: Config =
                serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        tracing::info!(path = %self.config_path.display(), "saved configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.projection_months, 12);
    }

    #[test]
    fn older_files_fill_new_fields_with_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("config.json"));
        fs::write(manager.config_path(), r#"{"locale": "de-DE", "currency": "EUR"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.upcoming_window_days, 30);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn malformed_file_is_a_serde_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("config.json"));
        fs::write(manager.config_path(), "{ not json").unwrap();
        assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    }

    #[test]
    fn missing_locale_and_currency_use_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("config.json"));
        fs::write(manager.config_path(), r#"{"projection_months": 6}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.currency, "USD");
        assert_eq!(config.projection_months, 6);
    }

    #[test]
    fn oversized_projection_horizon_is_rejected() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("config.json"));
        fs::write(manager.config_path(), r#"{"projection_months": 3200000}"#).unwrap();
        assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));

        let config = Config {
            projection_months: MAX_PROJECTION_MONTHS + 1,
            ..Config::default()
        };
        assert!(matches!(manager.save(&config), Err(ConfigError::Invalid(_))));
        let on_disk = fs::read_to_string(manager.config_path()).unwrap();
        assert_eq!(on_disk, r#"{"projection_months": 3200000}"#);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/billing")),
            ..Config::default()
        };
        assert_eq!(config.resolve_data_dir(), PathBuf::from("/srv/billing"));
    }
}
