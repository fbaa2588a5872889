#![forbid(unsafe_code)]

//! Error model.
//!
//! A swipe row has no I/O on its hot path, so errors are limited to invalid
//! configuration, detected when a row is built or a config file is loaded.
//! Nothing on the gesture or animation path returns an error.

use thiserror::Error;

/// Errors raised when building a [`SwipeRow`](crate::row::SwipeRow).
#[derive(Debug, Error)]
pub enum SwipeError {
    /// The required visible-content render slot was not supplied.
    #[error("visible content render slot is required")]
    MissingVisibleContent,
    /// Configuration failed validation.
    #[error("invalid swipe configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}

/// Errors raised while loading a [`SwipeConfig`](crate::config::SwipeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config-file")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config-file")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

pub type Result<T> = std::result::Result<T, SwipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            SwipeError::MissingVisibleContent.to_string(),
            "visible content render slot is required"
        );
        let err = SwipeError::InvalidConfig(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid swipe configuration: a; b");
    }
}
