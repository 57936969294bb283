//! Configuration error types
//!
//! Gameplay itself never fails: operations that need a current ball or a
//! running game simply no-op. The only fallible input is the optional JSON
//! configuration handed in by the page.

use std::fmt;

/// Error produced while loading or validating a [`crate::GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration text was not valid JSON for `GameConfig`.
    Parse(serde_json::Error),

    /// A field is outside the range the game rules can work with.
    OutOfRange {
        /// Name of the offending field (for logging).
        field: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid game config: {}", err),
            ConfigError::OutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "config field '{}' = {} is outside accepted range {}",
                field, value, expected
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Returns an error unless `value` is strictly positive.
pub fn require_positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "(0, ∞)",
        })
    }
}
