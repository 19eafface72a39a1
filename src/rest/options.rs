//! Per-request options.
//!
//! Options come in two legal shapes: a bare credential, or a settings map
//! carrying any of credential, API version, API base and extra headers.
//! [`ResolvedOptions::parse`] flattens either shape into one struct that the
//! transport applies on top of its configured defaults.

use std::collections::HashMap;

use crate::clients::insert_header;
use crate::config::{ApiBase, ApiVersion, SecretKey};

/// Options for a single request.
///
/// # Example
///
/// ```rust
/// use safepay_api::rest::{RequestOptions, RequestSettings};
/// use safepay_api::{ApiVersion, SecretKey};
///
/// // Bare credential
/// let options = RequestOptions::from(SecretKey::new("sec_other_merchant").unwrap());
///
/// // Settings map
/// let options = RequestOptions::from(
///     RequestSettings::new()
///         .api_version(ApiVersion::new("v2").unwrap())
///         .header("X-Trace-Id", "trace-1"),
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestOptions {
    /// Use this secret key instead of the client's.
    ApiKey(SecretKey),
    /// A map of request settings.
    Settings(RequestSettings),
}

impl From<SecretKey> for RequestOptions {
    fn from(key: SecretKey) -> Self {
        Self::ApiKey(key)
    }
}

impl From<RequestSettings> for RequestOptions {
    fn from(settings: RequestSettings) -> Self {
        Self::Settings(settings)
    }
}

/// The settings-map form of [`RequestOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestSettings {
    api_key: Option<SecretKey>,
    api_version: Option<ApiVersion>,
    api_base: Option<ApiBase>,
    headers: HashMap<String, String>,
}

impl RequestSettings {
    /// Creates empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the secret key.
    #[must_use]
    pub fn api_key(mut self, key: SecretKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Overrides the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn api_base(mut self, base: ApiBase) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Adds an extra header, replacing one whose name differs only in case.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(&mut self.headers, name.into(), value.into());
        self
    }
}

/// Options flattened from either [`RequestOptions`] shape.
///
/// Every field is optional; `None` means "use the client's default".
/// Returned from dispatch alongside the response and kept on the
/// hydrated [`ApiResponse`](crate::rest::ApiResponse).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Secret key override.
    pub api_key: Option<SecretKey>,
    /// API version override.
    pub api_version: Option<ApiVersion>,
    /// API base override.
    pub api_base: Option<ApiBase>,
    /// Extra headers.
    pub headers: HashMap<String, String>,
}

impl ResolvedOptions {
    /// Flattens optional request options.
    ///
    /// # Example
    ///
    /// ```rust
    /// use safepay_api::rest::{RequestOptions, ResolvedOptions};
    /// use safepay_api::SecretKey;
    ///
    /// let key = SecretKey::new("sec_other").unwrap();
    /// let resolved = ResolvedOptions::parse(Some(&RequestOptions::ApiKey(key.clone())));
    /// assert_eq!(resolved.api_key, Some(key));
    ///
    /// assert_eq!(ResolvedOptions::parse(None), ResolvedOptions::default());
    /// ```
    #[must_use]
    pub fn parse(options: Option<&RequestOptions>) -> Self {
        match options {
            None => Self::default(),
            Some(RequestOptions::ApiKey(key)) => Self {
                api_key: Some(key.clone()),
                ..Self::default()
            },
            Some(RequestOptions::Settings(settings)) => Self {
                api_key: settings.api_key.clone(),
                api_version: settings.api_version.clone(),
                api_base: settings.api_base.clone(),
                headers: settings.headers.clone(),
            },
        }
    }

    /// Converts back into request options for a follow-up call.
    #[must_use]
    pub fn to_request_options(&self) -> RequestOptions {
        RequestOptions::Settings(RequestSettings {
            api_key: self.api_key.clone(),
            api_version: self.api_version.clone(),
            api_base: self.api_base.clone(),
            headers: self.headers.clone(),
        })
    }
}
