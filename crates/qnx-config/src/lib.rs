//! # qnx-config
//!
//! Layered configuration loading for Quannex using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUANNEX_*` prefix, `__` as separator)
//! 2. Project-level `.quannex/config.toml`
//! 3. User-level `~/.config/quannex/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QUANNEX_SCORING__FLOW_EPSILON` -> `scoring.flow_epsilon`,
//! `QUANNEX_DATA__DIR` -> `data.dir`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use qnx_config::QnxConfig;
//!
//! let config = QnxConfig::load_with_dotenv().expect("config");
//! println!("flow epsilon: {}", config.scoring.flow_epsilon);
//! ```

mod data;
mod error;
mod scoring;

pub use data::DataConfig;
pub use error::ConfigError;
pub use scoring::{
    DEFAULT_BREATH_BALANCED_MAX, DEFAULT_BREATH_BALANCED_MIN, DEFAULT_FACE_WEIGHT,
    DEFAULT_FLOW_EPSILON, DEFAULT_HEALTH_CUT_POINTS, DEFAULT_LEVERAGE_COHERENCE_MIN,
    DEFAULT_LEVERAGE_VARIANCE_MAX, DEFAULT_VERTEX_WEIGHT, ScoringConfig,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct QnxConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl QnxConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found in any section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.data.validate()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can inspect the figment or layer additional
    /// providers on top.
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
        let local_path = PathBuf::from(".quannex/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("QUANNEX_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quannex").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, falling back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
