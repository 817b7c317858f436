//! Paywarden Logging
//!
//! Structured, leveled logging for the Paywarden payment facade, controlled
//! through `PAYWARDEN_*` environment variables.
//!
//! # Features
//!
//! - **Environment-controlled**: `PAYWARDEN_DEBUG=1` enables debug logging
//! - **Structured logging**: every entry can carry a [`Fields`] map
//! - **Injectable sinks**: services log through the [`Logger`] trait so tests
//!   can swap in a [`MemoryLogger`]
//! - **Multiple backends**: plain stderr output and, with the `tracing`
//!   feature, forwarding into a `tracing` subscriber
//!
//! # Usage
//!
//! ```rust
//! use paywarden_log::{Fields, Format, Level, LogConfig, Logger, StderrLogger};
//!
//! let logger = StderrLogger::with_config(
//!     LogConfig::default().with_level(Level::Warn).with_format(Format::Compact),
//! );
//! logger.info("filtered out", &Fields::new());
//! logger.warn("provider slow", &Fields::new().with("provider", "sandbox"));
//! ```
//!
//! # Environment Variables
//!
//! - `PAYWARDEN_DEBUG=1` - Enable debug logging
//! - `PAYWARDEN_LOG_LEVEL=debug|info|warn|error` - Set log level
//! - `PAYWARDEN_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `PAYWARDEN_LOG_COLOR=1|0` - Enable/disable colors

mod fields;
mod logger;

pub use fields::Fields;
pub use logger::{LogRecord, Logger, MemoryLogger, StderrLogger};

use std::env;
use std::fmt::Write as _;
use std::str::FromStr;

// ============================================================================
// Log Levels
// ============================================================================

/// Log level for Paywarden logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Trace level (most verbose)
    Trace = 0,
    /// Debug level
    Debug = 1,
    /// Info level
    Info = 2,
    /// Warning level
    Warn = 3,
    /// Error level (least verbose)
    Error = 4,
    /// Off (no logging)
    Off = 5,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// Get colored level name (if color feature enabled).
    #[cfg(feature = "color")]
    pub fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl std::fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown log level: {}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable, one entry per line
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl Format {
    /// Parse a format name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled
    pub color: bool,
    /// Whether to include timestamps
    pub timestamps: bool,
    /// Whether to include the target
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let debug = env_flag("PAYWARDEN_DEBUG").unwrap_or(false);

        let level = env::var("PAYWARDEN_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = env::var("PAYWARDEN_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Json);

        let color = env_flag("PAYWARDEN_LOG_COLOR").unwrap_or_else(stderr_supports_color);
        let timestamps = env_flag("PAYWARDEN_LOG_TIMESTAMPS").unwrap_or(true);
        let module_path = env_flag("PAYWARDEN_LOG_MODULE").unwrap_or(true);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
            module_path,
        }
    }

    /// Override the minimum level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Override the output format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn stderr_supports_color() -> bool {
    env::var("NO_COLOR").is_err() && env::var("TERM").is_ok()
}

// ============================================================================
// Log Output
// ============================================================================

/// Render a single log entry according to `config.format`.
pub fn format_entry(
    config: &LogConfig,
    level: Level,
    target: &str,
    message: &str,
    fields: &Fields,
) -> String {
    match config.format {
        Format::Pretty => format_pretty(level, target, message, fields, config),
        Format::Compact => format_compact(level, target, message, fields, config),
        Format::Json => format_json(level, target, message, fields),
    }
}

fn format_pretty(
    level: Level,
    target: &str,
    message: &str,
    fields: &Fields,
    config: &LogConfig,
) -> String {
    let mut out = String::new();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(out, "{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
    }

    #[cfg(feature = "color")]
    if config.color {
        let _ = write!(out, "{:5} ", level.colored());
    } else {
        let _ = write!(out, "{:5} ", level.as_str());
    }

    #[cfg(not(feature = "color"))]
    let _ = write!(out, "{:5} ", level.as_str());

    if config.module_path && !target.is_empty() {
        let _ = write!(out, "[{}] ", target);
    }

    out.push_str(message);
    fields.write_pairs(&mut out);
    out
}

fn format_compact(
    level: Level,
    target: &str,
    message: &str,
    fields: &Fields,
    config: &LogConfig,
) -> String {
    let mut out = String::new();

    if config.timestamps {
        let now = chrono::Local::now();
        let _ = write!(out, "{} ", now.format("%H:%M:%S"));
    }

    let _ = write!(out, "{} ", level.as_str().chars().next().unwrap_or('?'));

    if config.module_path && !target.is_empty() {
        let _ = write!(out, "{}: ", target);
    }

    out.push_str(message);
    fields.write_pairs(&mut out);
    out
}

fn format_json(level: Level, target: &str, message: &str, fields: &Fields) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct LogEntry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
        #[serde(skip_serializing_if = "Fields::is_empty")]
        fields: &'a Fields,
    }

    let entry = LogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
        fields,
    };

    serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Forwards [`Logger`] entries into `tracing`.
    //!
    //! Fields are attached as a single JSON-encoded `fields` value so they
    //! survive any subscriber format.

    use super::*;

    /// [`Logger`] that emits `tracing` events under the `paywarden` target.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TracingLogger;

    impl Logger for TracingLogger {
        fn log(&self, level: Level, message: &str, fields: &Fields) {
            let fields = serde_json::to_string(fields).unwrap_or_default();
            match level {
                Level::Trace => {
                    tracing::trace!(target: "paywarden", fields = %fields, "{}", message)
                }
                Level::Debug => {
                    tracing::debug!(target: "paywarden", fields = %fields, "{}", message)
                }
                Level::Info => {
                    tracing::info!(target: "paywarden", fields = %fields, "{}", message)
                }
                Level::Warn => {
                    tracing::warn!(target: "paywarden", fields = %fields, "{}", message)
                }
                Level::Error => {
                    tracing::error!(target: "paywarden", fields = %fields, "{}", message)
                }
                Level::Off => {}
            }
        }
    }

    /// Subscriber filtered at `config.level` unless `RUST_LOG` says otherwise.
    pub fn subscriber(config: &LogConfig) -> impl tracing::Subscriber + Send + Sync + use<> {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_lowercase()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_tracing_logger_under_subscriber() {
            let config = LogConfig::default().with_level(Level::Debug);
            tracing::subscriber::with_default(subscriber(&config), || {
                let fields = Fields::new().with("transactionId", "tx_1");
                TracingLogger.info("payment processed", &fields);
                TracingLogger.log(Level::Off, "never emitted", &Fields::new());
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_config(format: Format) -> LogConfig {
        LogConfig {
            format,
            timestamps: false,
            color: false,
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("debug"), Some(Level::Debug));
        assert_eq!(Level::parse("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse("invalid"), None);
        assert_eq!("error".parse::<Level>(), Ok(Level::Error));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("pretty"), Some(Format::Pretty));
        assert_eq!(Format::parse("compact"), Some(Format::Compact));
        assert_eq!(Format::parse("json"), Some(Format::Json));
        assert_eq!(Format::parse("invalid"), None);
    }

    #[test]
    fn test_config_builders() {
        let config = LogConfig::default()
            .with_level(Level::Error)
            .with_format(Format::Pretty);
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.format, Format::Pretty);
        assert!(config.timestamps);
    }

    #[test]
    fn test_json_entry_carries_fields() {
        let fields = Fields::new().with("methodId", "m1").with("count", 3);
        let line = format_entry(
            &plain_config(Format::Json),
            Level::Error,
            "paywarden::service",
            "remove failed",
            &fields,
        );

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["message"], "remove failed");
        assert_eq!(value["fields"]["methodId"], "m1");
        assert_eq!(value["fields"]["count"], 3);
    }

    #[test]
    fn test_json_entry_omits_empty_fields() {
        let line = format_entry(
            &plain_config(Format::Json),
            Level::Info,
            "t",
            "hello",
            &Fields::new(),
        );
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_pretty_entry() {
        let fields = Fields::new().with("customerId", "cus_1");
        let line = format_entry(
            &plain_config(Format::Pretty),
            Level::Info,
            "svc",
            "fetched",
            &fields,
        );
        assert_eq!(line, "INFO  [svc] fetched customerId=cus_1");
    }

    #[test]
    fn test_compact_entry() {
        let line = format_entry(
            &plain_config(Format::Compact),
            Level::Warn,
            "svc",
            "slow",
            &Fields::new(),
        );
        assert_eq!(line, "W svc: slow");
    }
}
