//! # pv-config
//!
//! Layered configuration loading for Pravartak using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PRAVARTAK_*` prefix, `__` as separator)
//! 2. Plain deployment variables: `DATABASE_URL`, `DATABASE_AUTH_TOKEN`,
//!    `RISK_MODEL_PATH`, `PORT`
//! 3. An explicit TOML file passed with `--config`
//! 4. Project-level `./pravartak.toml`
//! 5. User-level `~/.config/pravartak/config.toml`
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PRAVARTAK_SERVER__PORT` -> `server.port`,
//! `PRAVARTAK_MODEL__PATH` -> `model.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pv_config::PvConfig;
//!
//! let config = PvConfig::load_with_dotenv(None).expect("config");
//! println!("database: {}", config.database.url);
//! ```

mod database;
mod error;
mod model;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use model::ModelConfig;
pub use server::{BootstrapConfig, ServerConfig};

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Unprefixed variables honoured for drop-in deployment, and the config key
/// each one fills.
const PLAIN_ENV_KEYS: [(&str, &str); 4] = [
    ("DATABASE_URL", "database.url"),
    ("DATABASE_AUTH_TOKEN", "database.auth_token"),
    ("RISK_MODEL_PATH", "model.path"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PvConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl PvConfig {
    /// Load configuration from all sources, with an optional extra TOML file.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(extra_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra_file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(extra_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("pravartak.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra_file {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Self::plain_env())
            .merge(Env::prefixed("PRAVARTAK_").split("__"))
    }

    /// Reject values that would only fail later at startup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".into(),
                reason: "must be between 1 and 65535".into(),
            });
        }
        Ok(())
    }

    fn plain_env() -> Env {
        Env::raw()
            .only(&PLAIN_ENV_KEYS.map(|(var, _)| var))
            .map(|key| {
                PLAIN_ENV_KEYS
                    .iter()
                    .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                    .map_or_else(|| key.as_str().into(), |(_, path)| (*path).into())
            })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pravartak").join("config.toml"))
    }
}
