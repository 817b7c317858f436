//! Service configuration
//!
//! A [`ServiceConfig`] can be read from the environment (after loading a
//! `.env` file if one exists) or from a TOML document:
//!
//! ```toml
//! log_level = "info"
//! log_format = "json"
//! encryption_key = "base64 of 32 random bytes"
//! ```

use crate::crypto::AesGcmEncryptor;
use crate::error::ConfigError;
use paywarden_log::{Format, Level, LogConfig, StderrLogger};
use paywarden_validation::OneOf;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Environment variable holding the minimum log level
pub const ENV_LOG_LEVEL: &str = "PAYWARDEN_LOG_LEVEL";
/// Environment variable holding the log output format
pub const ENV_LOG_FORMAT: &str = "PAYWARDEN_LOG_FORMAT";
/// Environment variable holding the base64 encryption key
pub const ENV_ENCRYPTION_KEY: &str = "PAYWARDEN_ENCRYPTION_KEY";

const LOG_LEVELS: &[&str] = &["debug", "info", "warn", "error"];

/// Payment service configuration
pub struct ServiceConfig {
    /// Minimum level the service logs at
    pub log_level: Level,
    /// Output format of the service logger
    pub log_format: Format,
    /// Base64-encoded 32-byte AES key
    pub encryption_key: Option<SecretString>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: Level::Info,
            log_format: Format::Json,
            encryption_key: None,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    log_level: Option<String>,
    log_format: Option<String>,
    encryption_key: Option<String>,
}

impl ServiceConfig {
    /// Set the log level
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set the log format
    pub fn with_log_format(mut self, format: Format) -> Self {
        self.log_format = format;
        self
    }

    /// Set the encryption key (base64 of 32 bytes)
    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_key = Some(SecretString::from(key.into()));
        self
    }

    /// Load from `PAYWARDEN_*` environment variables, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve environment variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_raw(RawConfig {
            log_level: lookup(ENV_LOG_LEVEL),
            log_format: lookup(ENV_LOG_FORMAT),
            encryption_key: lookup(ENV_ENCRYPTION_KEY),
        })
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
        Self::from_raw(raw)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_level = match raw.log_level {
            Some(value) => parse_log_level(&value)?,
            None => defaults.log_level,
        };
        let log_format = match raw.log_format {
            Some(value) => parse_log_format(&value)?,
            None => defaults.log_format,
        };
        let encryption_key = raw
            .encryption_key
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from);

        Ok(Self {
            log_level,
            log_format,
            encryption_key,
        })
    }

    /// Build the AES-256-GCM encryptor from the configured key
    pub fn encryptor(&self) -> Result<AesGcmEncryptor, ConfigError> {
        let key = self
            .encryption_key
            .as_ref()
            .ok_or_else(|| ConfigError::Missing("encryption_key".to_string()))?;
        Ok(AesGcmEncryptor::from_base64(key.expose_secret())?)
    }

    /// Build a stderr logger at the configured level and format
    pub fn logger(&self) -> StderrLogger {
        StderrLogger::with_config(
            LogConfig::from_env()
                .with_level(self.log_level)
                .with_format(self.log_format),
        )
    }
}

/// Parse the service log level; only `debug`, `info`, `warn` and `error` are accepted
pub fn parse_log_level(value: &str) -> Result<Level, ConfigError> {
    let normalized = value.trim().to_lowercase();
    OneOf(LOG_LEVELS)
        .validate(&normalized, "log_level")
        .map_err(|e| ConfigError::InvalidValue {
            key: e.field,
            message: e.message,
        })?;

    Level::parse(&normalized).ok_or_else(|| ConfigError::InvalidValue {
        key: "log_level".to_string(),
        message: format!("unknown level {}", value),
    })
}

fn parse_log_format(value: &str) -> Result<Format, ConfigError> {
    Format::parse(value).ok_or_else(|| ConfigError::InvalidValue {
        key: "log_format".to_string(),
        message: format!("expected pretty, compact or json, got {}", value),
    })
}
