//! Safepay environment definitions.
//!
//! This module provides the [`Environment`] enum selecting which Safepay
//! deployment the SDK talks to.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Safepay deployment.
///
/// Each environment resolves to a default API base URL. The base can still be
/// overridden per client via
/// [`SafepayConfigBuilder::api_base`](crate::SafepayConfigBuilder::api_base)
/// or per request via [`RequestSettings`](crate::rest::RequestSettings).
///
/// # Example
///
/// ```rust
/// use safepay_api::Environment;
///
/// let env: Environment = "production".parse().unwrap();
/// assert_eq!(env, Environment::Production);
/// assert_eq!(env.base_url(), "https://api.getsafepay.com");
/// assert_eq!(Environment::default(), Environment::Sandbox);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// The sandbox environment used for integration testing.
    #[default]
    Sandbox,
    /// The live production environment.
    Production,
    /// The development environment.
    Development,
}

impl Environment {
    /// Returns the default API base URL for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.api.getsafepay.com",
            Self::Production => "https://api.getsafepay.com",
            Self::Development => "https://dev.api.getsafepay.com",
        }
    }

    /// Returns `true` if requests in this environment move real money.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => write!(f, "sandbox"),
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" | "live" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_known_environments_case_insensitively() {
        assert_eq!("Sandbox".parse::<Environment>(), Ok(Environment::Sandbox));
        assert_eq!("LIVE".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" dev ".parse::<Environment>(), Ok(Environment::Development));
    }

    #[test]
    fn test_rejects_unknown_environment() {
        let result = "staging".parse::<Environment>();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvironment { value }) if value == "staging"
        ));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for env in [
            Environment::Sandbox,
            Environment::Production,
            Environment::Development,
        ] {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }

    #[test]
    fn test_only_production_is_live() {
        assert!(Environment::Production.is_live());
        assert!(!Environment::Sandbox.is_live());
        assert!(!Environment::Development.is_live());
    }
}
