//! Transport error types for the Safepay API SDK.
//!
//! This module contains the error types produced while talking to the
//! Safepay API: response errors, request construction failures, network
//! failures and undecodable response bodies.
//!
//! # Error Handling
//!
//! Non-2xx responses are classified by status code:
//!
//! - **401/403**: [`ApiError::Authentication`]
//! - **404**: [`ApiError::NotFound`]
//! - **400/422**: [`ApiError::InvalidRequest`] with field errors parsed from the body
//! - **Other 4xx/5xx**: [`ApiError::Response`]
//!
//! # Example
//!
//! ```rust,ignore
//! use safepay_api::clients::ApiError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(ApiError::NotFound(e)) => println!("Missing: {}", e.message),
//!     Err(ApiError::InvalidRequest { errors, .. }) => {
//!         for (field, messages) in errors {
//!             println!("{field}: {messages:?}");
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::clients::HttpResponse;

/// Error returned when the API answers with a non-successful status.
///
/// The `message` field is a compact JSON document holding whichever of
/// `errors`, `error`, `message` and `error_reference` the response carried.
///
/// # Example
///
/// ```rust
/// use safepay_api::clients::ApiResponseError;
///
/// let error = ApiResponseError {
///     code: 500,
///     message: r#"{"error":"boom"}"#.to_string(),
///     request_id: Some("req-1".to_string()),
/// };
///
/// assert_eq!(error.to_string(), r#"{"error":"boom"}"#);
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Request ID for error reporting (from the X-Request-Id header).
    pub request_id: Option<String>,
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,
}

/// Unified error type for everything that can go wrong once a request is
/// handed to the transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credential was missing, invalid or lacked permission (HTTP 401/403).
    #[error("Authentication failed with status {}: {}", .0.code, .0.message)]
    Authentication(ApiResponseError),

    /// The addressed resource does not exist (HTTP 404).
    #[error("Resource not found: {}", .0.message)]
    NotFound(ApiResponseError),

    /// The API rejected the request parameters (HTTP 400/422).
    #[error("Invalid request (status {code}): {errors:?}")]
    InvalidRequest {
        /// The HTTP status code.
        code: u16,
        /// A map of field names to error messages. Errors not tied to a
        /// field are collected under `"base"`.
        errors: HashMap<String, Vec<String>>,
        /// The request ID for debugging.
        request_id: Option<String>,
    },

    /// Any other non-2xx response.
    #[error(transparent)]
    Response(#[from] ApiResponseError),

    /// A 2xx response whose body could not be decoded into the expected shape.
    #[error("Malformed response (status {code}): {message}")]
    MalformedResponse {
        /// The HTTP status code.
        code: u16,
        /// What went wrong while decoding.
        message: String,
        /// The request ID for debugging.
        request_id: Option<String>,
    },

    /// Request construction failed.
    #[error(transparent)]
    InvalidHttpRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Classifies a non-successful response into an `ApiError`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use safepay_api::clients::{ApiError, HttpResponse};
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// let response = HttpResponse::new(404, HashMap::new(), json!({"error": "no such card"}));
    /// assert!(matches!(ApiError::from_response(&response), ApiError::NotFound(_)));
    /// ```
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let request_id = response.request_id().map(ToString::to_string);
        let code = response.code;

        match code {
            400 | 422 => Self::InvalidRequest {
                code,
                errors: parse_field_errors(&response.body),
                request_id,
            },
            _ => {
                let error = ApiResponseError {
                    code,
                    message: serialize_error(response),
                    request_id,
                };
                match code {
                    401 | 403 => Self::Authentication(error),
                    404 => Self::NotFound(error),
                    _ => Self::Response(error),
                }
            }
        }
    }

    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Authentication(e) | Self::NotFound(e) | Self::Response(e) => Some(e.code),
            Self::InvalidRequest { code, .. } | Self::MalformedResponse { code, .. } => Some(*code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidHttpRequest(_) => None,
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Authentication(e) | Self::NotFound(e) | Self::Response(e) => {
                e.request_id.as_deref()
            }
            Self::InvalidRequest { request_id, .. } | Self::MalformedResponse { request_id, .. } => {
                request_id.as_deref()
            }
            Self::InvalidHttpRequest(_) | Self::Network(_) => None,
        }
    }
}

/// Locates the error list in a response body.
///
/// Safepay nests errors under `status.errors`; plain `errors` at the top
/// level is accepted as well.
fn error_list(body: &Value) -> Option<&Value> {
    body.get("errors")
        .or_else(|| body.get("status").and_then(|status| status.get("errors")))
}

/// Locates the summary message in a response body: top-level `message`,
/// then Safepay's `status.message`.
fn error_message(body: &Value) -> Option<&Value> {
    body.get("message")
        .or_else(|| body.get("status").and_then(|status| status.get("message")))
}

/// Serializes the interesting parts of an error body to compact JSON.
fn serialize_error(response: &HttpResponse) -> String {
    let mut error_body = serde_json::Map::new();

    if let Some(errors) = error_list(&response.body) {
        error_body.insert("errors".to_string(), errors.clone());
    }
    if let Some(error) = response.body.get("error") {
        error_body.insert("error".to_string(), error.clone());
    }
    if let Some(message) = error_message(&response.body) {
        error_body.insert("message".to_string(), message.clone());
    }
    if let Some(raw) = response.body.get("raw_body") {
        error_body.insert("raw_body".to_string(), raw.clone());
    }

    if let Some(request_id) = response.request_id() {
        error_body.insert(
            "error_reference".to_string(),
            serde_json::json!(format!(
                "If you report this error, please include this id: {request_id}."
            )),
        );
    }

    serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
}

/// Parses field errors from an error body.
///
/// Accepts an object of `field -> [messages]`, an array of messages, or a
/// single string. Unattributed messages are stored under `"base"`. When no
/// messages are found the body's summary message becomes the `"base"` entry.
fn parse_field_errors(body: &Value) -> HashMap<String, Vec<String>> {
    let mut result = collect_field_errors(body);

    if result.is_empty() {
        if let Some(message) = error_message(body).and_then(Value::as_str) {
            result.insert("base".to_string(), vec![message.to_string()]);
        }
    }

    result
}

fn collect_field_errors(body: &Value) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();

    let Some(errors) = error_list(body).or_else(|| body.get("error")) else {
        return result;
    };

    match errors {
        Value::Object(map) => {
            for (field, messages) in map {
                let msgs: Vec<String> = match messages {
                    Value::Array(arr) => arr
                        .iter()
                        .filter_map(|v| v.as_str().map(ToString::to_string))
                        .collect(),
                    Value::String(s) => vec![s.clone()],
                    _ => vec![messages.to_string()],
                };
                result.insert(field.clone(), msgs);
            }
        }
        Value::Array(arr) => {
            let msgs: Vec<String> = arr
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect();
            if !msgs.is_empty() {
                result.insert("base".to_string(), msgs);
            }
        }
        Value::String(s) => {
            result.insert("base".to_string(), vec![s.clone()]);
        }
        _ => {}
    }

    result
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
