//! Data source configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default upper bound on a full dataset load.
const fn default_load_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataConfig {
    /// Directory holding `kpis.json` and `topology.json`. Unset means the
    /// embedded demo dataset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: None,
            load_timeout_secs: default_load_timeout_secs(),
        }
    }
}

impl DataConfig {
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "data.load_timeout_secs",
                "timeout must be at least one second",
            ));
        }
        Ok(())
    }
}
