//! Runtime tunables shared by every debug command.
//!
//! A [`Config`] can be built in code or loaded from a small JSON document,
//! for example one stored next to the firmware's other settings:
//!
//! ```rust
//! use dbgshell::config::Config;
//!
//! let config = Config::from_json(r#"{"default_interval_ms":250}"#).unwrap();
//! assert_eq!(config.default_interval_ms, 250);
//! assert_eq!(config.float_precision, 4);
//! ```

use serde::Deserialize;

/// Interval used by `monitor <time_ms>` when no interval is given.
pub const DEFAULT_INTERVAL_MS: u32 = 1000;

/// Number of decimals printed for `f32` fields.
pub const DEFAULT_FLOAT_PRECISION: u8 = 4;

/// Settings applied by the dispatcher and the field printers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sleep between `monitor` iterations when the command line omits it.
    pub default_interval_ms: u32,
    /// Decimals printed for floating-point fields.
    pub float_precision: u8,
}

/// Error returned when a configuration document cannot be used.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    /// The document is not valid JSON for [`Config`].
    ParseError,
    /// `default_interval_ms` was zero.
    ZeroInterval,
}

impl Config {
    /// The built-in configuration: 1000 ms interval, 4 decimals.
    pub const fn new() -> Self {
        Self {
            default_interval_ms: DEFAULT_INTERVAL_MS,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    /// Parse a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let (config, _) = serde_json_core::from_str::<Config>(json)
            .map_err(|_| ConfigError::ParseError)?;
        if config.default_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ParseError => f.write_str("invalid configuration document"),
            ConfigError::ZeroInterval => f.write_str("default_interval_ms must be > 0"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::ParseError => defmt::write!(f, "ParseError"),
            ConfigError::ZeroInterval => defmt::write!(f, "ZeroInterval"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_keeps_defaults() {
        assert_eq!(Config::from_json("{}"), Ok(Config::default()));
    }

    #[test]
    fn partial_document_overrides_one_key() {
        let config = Config::from_json(r#"{"float_precision":2}"#).unwrap();
        assert_eq!(config.float_precision, 2);
        assert_eq!(config.default_interval_ms, DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert_eq!(
            Config::from_json(r#"{"default_interval_ms":0}"#),
            Err(ConfigError::ZeroInterval)
        );
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert_eq!(Config::from_json("interval=5"), Err(ConfigError::ParseError));
    }
}
