//! Service configuration loaded from TOML.
//!
//! ```toml
//! [service]
//! host = "127.0.0.1"
//! port = 8080
//! interval_secs = 3
//! base_offset_ms = 2000
//! failure_ratio = 0.2
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above, except
//! `interval_secs`, which defaults to zero.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::task::services::{
    DEFAULT_BASE_OFFSET, DEFAULT_FAILURE_RATIO, TransitionSchedule, WeightedOutcome,
};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The TOML could not be decoded.
    #[error("failed to decode config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Lifecycle service settings.
    pub service: ServiceSection,
}

/// `[service]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    /// Host the gateway binds to.
    pub host: String,
    /// Port the gateway binds to.
    pub port: u16,
    /// Configured interval added to the base offset, in seconds.
    pub interval_secs: u64,
    /// Fixed base offset, in milliseconds.
    pub base_offset_ms: u64,
    /// Probability that a transition fails.
    pub failure_ratio: f64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            interval_secs: 0,
            base_offset_ms: u64::try_from(DEFAULT_BASE_OFFSET.as_millis()).unwrap_or(u64::MAX),
            failure_ratio: DEFAULT_FAILURE_RATIO,
        }
    }
}

impl ServiceConfig {
    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] for malformed TOML, and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let contents = std::fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero port or a failure ratio
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_owned()));
        }
        if !(0.0..=1.0).contains(&self.service.failure_ratio) {
            return Err(ConfigError::Invalid(format!(
                "failure_ratio must be within 0-1, got {}",
                self.service.failure_ratio
            )));
        }
        Ok(())
    }

    /// Returns the bind address as `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }

    /// Builds the transition schedule.
    #[must_use]
    pub const fn schedule(&self) -> TransitionSchedule {
        TransitionSchedule::new(Duration::from_secs(self.service.interval_secs))
            .with_base_offset(Duration::from_millis(self.service.base_offset_ms))
    }

    /// Builds the outcome sampler.
    #[must_use]
    pub fn sampler(&self) -> WeightedOutcome {
        WeightedOutcome::new(self.service.failure_ratio)
    }
}
