//! Unified error handling for the trail-profile library.
//!
//! The error taxonomy here is deliberately small: the profile pipeline is
//! pure computation over in-memory data, so empty inputs degrade gracefully
//! (zeroed stats, `None` lookups) instead of failing. Errors are reserved for
//! genuinely invalid configuration.

use std::fmt;

/// Unified error type for trail-profile operations.
#[derive(Debug, Clone)]
pub enum ProfileError {
    /// Configuration error (invalid smoothing window, threshold, sample rate)
    ConfigError { message: String },
    /// Generic internal error
    Internal { message: String },
}

impl ProfileError {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ProfileError::ConfigError {
            message: message.into(),
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            ProfileError::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Result type alias for trail-profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
