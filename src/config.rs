//! Configuration handling with JSON file support.
//!
//! Durations are written as human-readable strings ("500ms", "2s", "1m");
//! a bare number is taken as milliseconds.

use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StagerError};

/// Application configuration.
///
/// ```json
/// {
///   "default_delay": "2s",
///   "obfuscate_by_default": true,
///   "verbose": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How long to wait before replaying a staged entry, so the user can
    /// refocus the target window.
    #[serde(default = "default_delay", with = "duration_string")]
    pub default_delay: Duration,

    /// Whether new text history entries start masked.
    #[serde(default = "default_obfuscate")]
    pub obfuscate_by_default: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_obfuscate() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_delay: default_delay(),
            obfuscate_by_default: default_obfuscate(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StagerError::config_load(path, e.to_string()))?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| StagerError::config_load(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| StagerError::config_save(path, e.to_string()))?;
        fs::write(path, contents).map_err(|e| StagerError::config_save(path, e.to_string()))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.default_delay > Duration::from_secs(60) {
            return Err(StagerError::config_validation(
                "default_delay cannot exceed 60s",
            ));
        }
        Ok(())
    }
}

/// Parse a duration string like "500ms", "2s", or "1m". A bare number is
/// interpreted as milliseconds.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.is_empty() {
        return Err(StagerError::invalid_delay(value, "empty duration"));
    }

    let (number, multiplier_ms) = if let Some(number) = trimmed.strip_suffix("ms") {
        (number, 1)
    } else if let Some(number) = trimmed.strip_suffix('s') {
        (number, 1000)
    } else if let Some(number) = trimmed.strip_suffix('m') {
        (number, 60_000)
    } else {
        (trimmed.as_str(), 1)
    };

    let amount: u64 = number
        .trim()
        .parse()
        .map_err(|_| StagerError::invalid_delay(value, "expected a non-negative number"))?;

    Ok(Duration::from_millis(amount * multiplier_ms))
}

/// Format a duration back into the string form used in config files.
pub fn format_duration(duration: &Duration) -> String {
    let millis = duration.as_millis();
    if millis % 1000 == 0 {
        format!("{}s", millis / 1000)
    } else {
        format!("{millis}ms")
    }
}

mod duration_string {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_duration(duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_duration(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("1m").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_duration("1500").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_duration_normalizes_input() {
        assert_eq!(parse_duration("5S").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration(" 2m ").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("1000x").is_err());
        assert!(parse_duration("-1000ms").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::from_secs(2)), "2s");
        assert_eq!(format_duration(&Duration::from_millis(1500)), "1500ms");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_delay, Duration::from_secs(2));
        assert!(config.obfuscate_by_default);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_excessive_delay() {
        let config = Config {
            default_delay: Duration::from_secs(61),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
