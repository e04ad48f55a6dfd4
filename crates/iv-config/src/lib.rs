//! # iv-config
//!
//! Layered configuration loading for Intervue using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`INTERVUE_*` prefix, `__` as separator)
//! 2. Project-level `.intervue/config.toml`
//! 3. User-level `~/.config/intervue/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `INTERVUE_API__BASE_URL` -> `api.base_url`,
//! `INTERVUE_UPLOAD__MAX_ATTEMPTS` -> `upload.max_attempts`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use iv_config::IntervueConfig;
//!
//! let config = IntervueConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.normalized_base_url());
//! ```

mod api;
mod capture;
mod error;
mod runner;
mod storage;
mod upload;

pub use api::ApiConfig;
pub use capture::CaptureConfig;
pub use error::ConfigError;
pub use runner::RunnerConfig;
pub use storage::StorageConfig;
pub use upload::UploadConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntervueConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl IntervueConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory (if any), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".intervue/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("INTERVUE_").split("__"))
    }

    /// Cross-section checks that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.upload.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.runner.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "runner.tick_interval_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("intervue").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = IntervueConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.capture.is_configured());
        assert_eq!(config.upload.max_attempts, 3);
    }

    #[test]
    fn zero_attempts_rejected() {
        let mut config = IntervueConfig::default();
        config.upload.max_attempts = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("upload.max_attempts"));
    }
}
