//! HTTP client for Safepay API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Safepay API. Every request is attempted exactly once.

use std::collections::HashMap;

use crate::clients::errors::ApiError;
use crate::clients::http_request::{insert_header, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::SafepayConfig;

/// Header carrying the merchant secret key.
pub const SECRET_KEY_HEADER: &str = "X-SFPY-MERCHANT-SECRET";

/// Header carrying the requested API version.
pub const API_VERSION_HEADER: &str = "X-SFPY-API-VERSION";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Safepay API.
///
/// The client handles:
/// - Base URI selection from the configured environment or `api_base`
/// - Default headers including User-Agent and the merchant secret
/// - JSON body decoding and error classification
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use safepay_api::{HttpClient, HttpRequest, HttpMethod, SafepayConfig, SecretKey};
///
/// let config = SafepayConfig::builder()
///     .secret_key(SecretKey::new("sec_sandbox_123")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "customers/cus_1/cards").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://sandbox.api.getsafepay.com`).
    base_uri: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the SDK configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &SafepayConfig) -> Result<Self, ApiError> {
        let base_uri = config.api_base().trim_end_matches('/').to_string();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Safepay API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            SECRET_KEY_HEADER.to_string(),
            config.secret_key().as_ref().to_string(),
        );
        if let Some(version) = config.api_version() {
            default_headers.insert(API_VERSION_HEADER.to_string(), version.to_string());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the absolute URL a request will be sent to.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let base = request
            .api_base
            .as_deref()
            .unwrap_or(self.base_uri.as_str())
            .trim_end_matches('/');
        format!("{base}/{}", request.path.trim_start_matches('/'))
    }

    /// Sends an HTTP request to the Safepay API.
    ///
    /// The request is sent once. A 2xx response must carry a JSON body (an
    /// empty body is read as `{}`); anything else is classified through
    /// [`ApiError::from_response`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - Request validation fails (`InvalidHttpRequest`)
    /// - A network error occurs (`Network`)
    /// - A non-2xx response is received (`Authentication`, `NotFound`,
    ///   `InvalidRequest`, `Response`)
    /// - A 2xx body is not valid JSON (`MalformedResponse`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        request.verify()?;

        let url = self.url_for(&request);

        let headers = self.merged_headers(&request);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, %url, "Sending request to Safepay API");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let parsed = if body_text.trim().is_empty() {
            Ok(serde_json::json!({}))
        } else {
            serde_json::from_str::<serde_json::Value>(&body_text)
        };

        let body = match parsed {
            Ok(body) => body,
            Err(e) if (200..=299).contains(&code) => {
                let request_id = res_headers
                    .get("x-request-id")
                    .and_then(|values| values.first())
                    .cloned();
                return Err(ApiError::MalformedResponse {
                    code,
                    message: format!("Response body is not valid JSON: {e}"),
                    request_id,
                });
            }
            // Keep the raw text of non-JSON error pages for the error message
            Err(_) => serde_json::json!({ "raw_body": body_text }),
        };

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::warn!(
            status = code,
            request_id = response.request_id().unwrap_or("-"),
            "Safepay API request to {} failed",
            request.path
        );

        Err(ApiError::from_response(&response))
    }

    /// Layers a request's headers over the client defaults.
    ///
    /// A request header replaces any default whose name matches
    /// case-insensitively, so each header is sent once.
    fn merged_headers(&self, request: &HttpRequest) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            insert_header(
                &mut headers,
                "Content-Type".to_string(),
                "application/json".to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                insert_header(&mut headers, key.clone(), value.clone());
            }
        }
        headers
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
