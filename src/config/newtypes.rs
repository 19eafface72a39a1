//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Safepay secret key.
///
/// This newtype ensures the key is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `SecretKey(*****)` instead of the actual key.
///
/// # Example
///
/// ```rust
/// use safepay_api::SecretKey;
///
/// let secret = SecretKey::new("sec_live_123").unwrap();
/// assert_eq!(secret.as_ref(), "sec_live_123");
/// assert_eq!(format!("{:?}", secret), "SecretKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Creates a new validated secret key.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ConfigError::EmptySecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for SecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(*****)")
    }
}

/// A validated API version label.
///
/// Sent with every request in the `X-SFPY-API-VERSION` header.
///
/// # Example
///
/// ```rust
/// use safepay_api::ApiVersion;
///
/// let version = ApiVersion::new("v1").unwrap();
/// assert_eq!(version.to_string(), "v1");
/// assert!(ApiVersion::new("v 1").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Creates a new validated API version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if the version is empty
    /// or contains whitespace.
    pub fn new(version: impl Into<String>) -> Result<Self, ConfigError> {
        let version = version.into();
        if version.is_empty() || version.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidApiVersion { version });
        }
        Ok(Self(version))
    }
}

impl AsRef<str> for ApiVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ApiVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated base URL for the Safepay API.
///
/// The URL must carry a scheme and a host. A trailing slash is removed so
/// that request paths can be joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use safepay_api::ApiBase;
///
/// let base = ApiBase::new("http://localhost:8080/").unwrap();
/// assert_eq!(base.as_ref(), "http://localhost:8080");
/// assert_eq!(base.scheme(), "http");
/// assert_eq!(base.host_name(), Some("localhost"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBase {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiBase {
    /// Creates a new validated API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBase`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidApiBase { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidApiBase { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidApiBase { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_start == host_end {
            return Err(ConfigError::InvalidApiBase { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for ApiBase {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_rejects_empty_string() {
        assert!(matches!(SecretKey::new(""), Err(ConfigError::EmptySecretKey)));
        assert!(matches!(
            SecretKey::new("   "),
            Err(ConfigError::EmptySecretKey)
        ));
    }

    #[test]
    fn test_secret_key_masks_value_in_debug() {
        let secret = SecretKey::new("super-secret-key").unwrap();
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "SecretKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_api_version_rejects_blank_and_whitespace() {
        assert!(ApiVersion::new("").is_err());
        assert!(ApiVersion::new("v 2").is_err());
        assert_eq!(ApiVersion::new("v2").unwrap().as_ref(), "v2");
    }

    #[test]
    fn test_api_version_deserialize_validates() {
        let version: ApiVersion = serde_json::from_str(r#""v1""#).unwrap();
        assert_eq!(version.as_ref(), "v1");
        assert!(serde_json::from_str::<ApiVersion>(r#""""#).is_err());
    }

    #[test]
    fn test_api_base_validates_format() {
        let base = ApiBase::new("https://api.getsafepay.com").unwrap();
        assert_eq!(base.scheme(), "https");
        assert_eq!(base.host_name(), Some("api.getsafepay.com"));

        let base = ApiBase::new("http://127.0.0.1:4010/").unwrap();
        assert_eq!(base.as_ref(), "http://127.0.0.1:4010");
        assert_eq!(base.host_name(), Some("127.0.0.1"));
    }

    #[test]
    fn test_api_base_rejects_invalid() {
        assert!(ApiBase::new("api.getsafepay.com").is_err());
        assert!(ApiBase::new("https://").is_err());
        assert!(ApiBase::new("://example.com").is_err());
        assert!(ApiBase::new("https://:8080").is_err());
    }
}
