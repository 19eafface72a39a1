//! Configuration types for the Safepay API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Safepay.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`SafepayConfig`]: The main configuration struct holding all SDK settings
//! - [`SafepayConfigBuilder`]: A builder for constructing [`SafepayConfig`] instances
//! - [`SecretKey`]: A validated secret key newtype with masked debug output
//! - [`ApiBase`]: A validated API base URL
//! - [`ApiVersion`]: A validated API version label
//! - [`Environment`]: The Safepay deployment to talk to
//!
//! # Example
//!
//! ```rust
//! use safepay_api::{SafepayConfig, SecretKey, Environment};
//!
//! let config = SafepayConfig::builder()
//!     .secret_key(SecretKey::new("sec_sandbox_123").unwrap())
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base(), "https://sandbox.api.getsafepay.com");
//! ```

mod environment;
mod newtypes;

pub use environment::Environment;
pub use newtypes::{ApiBase, ApiVersion, SecretKey};

use crate::error::ConfigError;

/// Configuration for the Safepay API SDK.
///
/// This struct holds the credential and endpoint settings every request
/// inherits unless overridden through per-request options.
///
/// # Thread Safety
///
/// `SafepayConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use safepay_api::{SafepayConfig, SecretKey, ApiBase};
///
/// let config = SafepayConfig::builder()
///     .secret_key(SecretKey::new("sec_sandbox_123").unwrap())
///     .api_base(ApiBase::new("http://localhost:4010").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_base(), "http://localhost:4010");
/// ```
#[derive(Clone, Debug)]
pub struct SafepayConfig {
    secret_key: SecretKey,
    environment: Environment,
    api_base: Option<ApiBase>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
}

impl SafepayConfig {
    /// Creates a new builder for constructing a `SafepayConfig`.
    #[must_use]
    pub fn builder() -> SafepayConfigBuilder {
        SafepayConfigBuilder::new()
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the effective API base URL.
    ///
    /// An explicit [`ApiBase`] wins over the environment default.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_ref()
            .map_or_else(|| self.environment.base_url(), |base| base.as_ref())
    }

    /// Returns the API version, if configured.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify SafepayConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SafepayConfig>();
};

/// Builder for constructing [`SafepayConfig`] instances.
///
/// The only required field is `secret_key`.
///
/// # Defaults
///
/// - `environment`: [`Environment::Sandbox`]
/// - `api_base`: `None` (use the environment's base URL)
/// - `api_version`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct SafepayConfigBuilder {
    secret_key: Option<SecretKey>,
    environment: Option<Environment>,
    api_base: Option<ApiBase>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
}

impl SafepayConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the secret key (required).
    #[must_use]
    pub fn secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Sets the environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Overrides the API base URL of the environment.
    #[must_use]
    pub fn api_base(mut self, base: ApiBase) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Sets the API version sent with every request.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`SafepayConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `secret_key` is not set.
    pub fn build(self) -> Result<SafepayConfig, ConfigError> {
        let secret_key = self.secret_key.ok_or(ConfigError::MissingRequiredField {
            field: "secret_key",
        })?;

        Ok(SafepayConfig {
            secret_key,
            environment: self.environment.unwrap_or_default(),
            api_base: self.api_base,
            api_version: self.api_version,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
