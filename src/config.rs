//! Engine configuration
//!
//! Loaded from a JSON file; every field has a default so `{}` is a valid
//! configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::index::{BucketHasher, DEFAULT_LOAD_FACTOR, MAX_LOAD_FACTOR};

pub use crate::index::HashStrategy;

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Buckets allocated per expected distinct value (default: 1.3, at most 16)
    #[serde(default = "default_load_factor")]
    pub load_factor: f64,

    /// Bucket hash (default: "seahash")
    #[serde(default)]
    pub hash_strategy: HashStrategy,

    /// Emit a TRACE log line per filter, sort and range operation
    #[serde(default)]
    pub trace_operations: bool,
}

fn default_load_factor() -> f64 {
    DEFAULT_LOAD_FACTOR
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            load_factor: default_load_factor(),
            hash_strategy: HashStrategy::default(),
            trace_operations: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::invalid(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)
            .map_err(|e| ConfigError::invalid(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if !(1.0..=MAX_LOAD_FACTOR).contains(&self.load_factor) {
            return Err(ConfigError::invalid(format!(
                "load_factor must be between 1.0 and {}, got {}",
                MAX_LOAD_FACTOR, self.load_factor
            )));
        }
        Ok(())
    }

    /// Hasher for the configured strategy
    pub fn hasher(&self) -> BucketHasher {
        BucketHasher::new(self.hash_strategy)
    }
}

/// Configuration error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    /// Config file unreadable, malformed, or out of range
    TtConfigInvalid,
}

impl ConfigErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigErrorCode::TtConfigInvalid => "TT_CONFIG_INVALID",
        }
    }
}

impl fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    code: ConfigErrorCode,
    message: String,
}

impl ConfigError {
    /// Invalid configuration
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            code: ConfigErrorCode::TtConfigInvalid,
            message: message.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ConfigErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
