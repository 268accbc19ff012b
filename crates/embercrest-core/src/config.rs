//! Engine configuration.
//!
//! Balance values that used to be global constants live here so they can
//! vary per test or per balance change.

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding [`EngineConfig::inventory_capacity`].
pub const INVENTORY_CAPACITY_ENV: &str = "EMBERCREST_INVENTORY_CAPACITY";

/// Environment variable overriding [`EngineConfig::max_upgrade_level`].
pub const MAX_UPGRADE_LEVEL_ENV: &str = "EMBERCREST_MAX_UPGRADE_LEVEL";

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment override could not be parsed.
    #[error("{name} must be a valid {expected}: {value:?}")]
    InvalidValue {
        /// The variable name.
        name: &'static str,
        /// The expected type.
        expected: &'static str,
        /// The raw value found.
        value: String,
    },

    /// A value parsed but is outside the allowed range.
    #[error("{name} is out of range: {reason}")]
    OutOfRange {
        /// The variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Tunable limits for the build-resolution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of items a character can carry in inventory.
    pub inventory_capacity: usize,
    /// Highest upgrade level an item instance can reach.
    pub max_upgrade_level: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: 40,
            max_upgrade_level: 10,
        }
    }
}

impl EngineConfig {
    /// Reads configuration from the process environment, falling back to the
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(INVENTORY_CAPACITY_ENV) {
            config.inventory_capacity = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: INVENTORY_CAPACITY_ENV,
                expected: "usize",
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(MAX_UPGRADE_LEVEL_ENV) {
            config.max_upgrade_level = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: MAX_UPGRADE_LEVEL_ENV,
                expected: "u8",
                value: raw.clone(),
            })?;
        }

        if config.inventory_capacity == 0 {
            return Err(ConfigError::OutOfRange {
                name: INVENTORY_CAPACITY_ENV,
                reason: "capacity must be at least 1",
            });
        }

        Ok(config)
    }
}
