//! Engine configuration

use crate::error::EngineError;
use crate::fork::Fork;
use cadence_crypto::bn254::NativeMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`EngineConfig::native_bn254`]
pub const ENV_NATIVE_BN254: &str = "CADENCE_NATIVE_BN254";

/// Environment variable overriding [`EngineConfig::fork`]
pub const ENV_FORK: &str = "CADENCE_FORK";

/// Settings resolved once when an [`Evm`](crate::Evm) is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Active fork
    #[serde(default)]
    pub fork: Fork,
    /// Native alt_bn128 backend selection
    #[serde(default)]
    pub native_bn254: NativeMode,
    /// Distinct bytecodes kept in the code cache
    #[serde(default = "default_code_cache_capacity")]
    pub code_cache_capacity: usize,
}

fn default_code_cache_capacity() -> usize {
    1024
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fork: Fork::default(),
            native_bn254: NativeMode::default(),
            code_cache_capacity: default_code_cache_capacity(),
        }
    }
}

impl EngineConfig {
    /// Defaults for `fork`
    pub fn for_fork(fork: Fork) -> Self {
        Self {
            fork,
            ..Default::default()
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply `CADENCE_NATIVE_BN254` and `CADENCE_FORK` from the process
    /// environment
    pub fn apply_env(self) -> Result<Self, EngineError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, EngineError> {
        if let Some(value) = lookup(ENV_NATIVE_BN254) {
            self.native_bn254 = value.parse()?;
        }
        if let Some(value) = lookup(ENV_FORK) {
            self.fork = value.parse()?;
        }
        Ok(self)
    }

    /// Serialize as TOML
    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }
}
