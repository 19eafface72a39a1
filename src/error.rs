//! Error types for the Safepay API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use safepay_api::{SecretKey, ConfigError};
//!
//! let result = SecretKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptySecretKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Secret key cannot be empty.
    #[error("Secret key cannot be empty. Please provide a valid Safepay secret key.")]
    EmptySecretKey,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected a non-empty label without whitespace (e.g., 'v1').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Environment name is not recognized.
    #[error("Invalid environment '{value}'. Expected one of 'sandbox', 'production' or 'development'.")]
    InvalidEnvironment {
        /// The unrecognized environment name.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://sandbox.api.getsafepay.com').")]
    InvalidApiBase {
        /// The invalid URL that was provided.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_key_error_message() {
        let error = ConfigError::EmptySecretKey;
        let message = error.to_string();
        assert!(message.contains("Secret key cannot be empty"));
        assert!(message.contains("valid Safepay secret key"));
    }

    #[test]
    fn test_invalid_environment_error_message() {
        let error = ConfigError::InvalidEnvironment {
            value: "staging".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("staging"));
        assert!(message.contains("sandbox"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "secret_key",
        };
        let message = error.to_string();
        assert!(message.contains("secret_key"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptySecretKey;
        let _: &dyn std::error::Error = &error;
    }
}
