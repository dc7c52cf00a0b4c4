//! Error types for stepviz.
//!
//! Stepping itself never fails; the only errors come from building an engine
//! out of a malformed configuration.

use thiserror::Error;

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric setting could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// Distribution name not one of random, reverse, sorted, nearly.
    #[error("unknown distribution: {0:?}")]
    UnknownDistribution(String),

    /// Auto-play interval must be at least one millisecond.
    #[error("step interval must be greater than zero")]
    ZeroInterval,

    /// A size setting exceeds what the engines accept.
    #[error("{what} = {value} exceeds the maximum of {max}")]
    TooLarge {
        what: &'static str,
        value: usize,
        max: usize,
    },
}

/// Result type for configuration handling
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid-number error
    pub fn invalid_number(key: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            key,
            value: value.into(),
        }
    }
}
