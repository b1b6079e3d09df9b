//! Engine configuration supplied by the embedding application.

use crate::logging::{default_log_level, normalize_level};
use crate::validator::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-owned engine settings. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `trace|debug|info|warn|error`; build-mode default when absent.
    pub log_level: Option<String>,
    /// Absolute directory for rolling logs; logging stays off when absent.
    pub log_dir: Option<String>,
    pub validation: ValidationPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    InvalidLogLevel(String),
    Logging(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid engine config: {err}"),
            Self::InvalidLogLevel(message) => write!(f, "invalid engine config: {message}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidLogLevel(_) | Self::Logging(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.effective_log_level()?;
        Ok(config)
    }

    /// Configured level, normalized, or the build-mode default.
    pub fn effective_log_level(&self) -> Result<&'static str, ConfigError> {
        match self.log_level.as_deref() {
            Some(level) => normalize_level(level).map_err(ConfigError::InvalidLogLevel),
            None => Ok(default_log_level()),
        }
    }

    /// Starts logging when a directory is configured. Returns whether it did.
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        let level = self.effective_log_level()?;
        match self.log_dir.as_deref() {
            Some(dir) => crate::logging::init_logging(level, dir)
                .map(|()| true)
                .map_err(ConfigError::Logging),
            None => Ok(false),
        }
    }
}
