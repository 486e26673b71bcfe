//! Custom error types for key-stager.
//!
//! This module provides structured error types using `thiserror` for better
//! error handling and more informative error messages.

use std::io;
use thiserror::Error;

/// Main error type for key-stager operations.
#[derive(Error, Debug)]
pub enum StagerError {
    /// A history index was outside the current bounds of the store.
    #[error("history index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Visibility toggling was requested for a hotkey entry.
    #[error("history entry {index} is a hotkey and is always visible")]
    HotkeyAlwaysVisible { index: usize },

    /// The user submitted empty text for sending.
    #[error("nothing to send: text is empty")]
    EmptyText,

    /// Error parsing a delay value.
    #[error("invalid delay '{value}': {reason}")]
    InvalidDelay { value: String, reason: String },

    /// The specified key is invalid or unsupported.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Error from the input-injection backend.
    #[error("injection failed: {0}")]
    Injection(String),

    /// Configuration validation error.
    #[error("configuration error: {0}")]
    ConfigValidation(String),

    /// Error reading or parsing configuration file.
    #[error("failed to load config from '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    /// Error writing configuration file.
    #[error("failed to save config to '{path}': {reason}")]
    ConfigSave { path: String, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for key-stager operations.
pub type Result<T> = std::result::Result<T, StagerError>;

impl StagerError {
    /// Create a new IndexOutOfRange error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a new HotkeyAlwaysVisible error.
    pub fn hotkey_always_visible(index: usize) -> Self {
        Self::HotkeyAlwaysVisible { index }
    }

    /// Create a new InvalidDelay error.
    pub fn invalid_delay(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDelay {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new InvalidKey error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Injection error.
    pub fn injection(message: impl Into<String>) -> Self {
        Self::Injection(message.into())
    }

    /// Create a new ConfigValidation error.
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation(message.into())
    }

    /// Create a new ConfigLoad error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new ConfigSave error.
    pub fn config_save(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigSave {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StagerError::index_out_of_range(7, 3);
        assert_eq!(err.to_string(), "history index 7 is out of range (0..3)");

        let err = StagerError::hotkey_always_visible(2);
        assert_eq!(
            err.to_string(),
            "history entry 2 is a hotkey and is always visible"
        );

        let err = StagerError::invalid_delay("abc", "not a number");
        assert_eq!(err.to_string(), "invalid delay 'abc': not a number");

        let err = StagerError::config_validation("default_delay cannot exceed 60s");
        assert_eq!(
            err.to_string(),
            "configuration error: default_delay cannot exceed 60s"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: StagerError = io_err.into();
        assert!(matches!(err, StagerError::Io(_)));
    }
}
