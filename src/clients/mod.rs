//! HTTP client types for Safepay API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the Safepay API.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`Dispatch`]: The seam resource operations send requests through
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, DELETE)
//! - [`ApiError`]: Everything that can go wrong on the wire
//!
//! # Example
//!
//! ```rust,ignore
//! use safepay_api::{SafepayConfig, SecretKey};
//! use safepay_api::clients::{Dispatch, HttpClient, HttpMethod};
//!
//! let config = SafepayConfig::builder()
//!     .secret_key(SecretKey::new("sec_sandbox_123")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let (response, _options) = client
//!     .dispatch(HttpMethod::Get, "customers/cus_1/cards", None, None)
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! There is none. Every request is attempted exactly once and failures are
//! returned to the caller.

mod dispatch;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use dispatch::Dispatch;
pub use errors::{ApiError, ApiResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, API_VERSION_HEADER, SDK_VERSION, SECRET_KEY_HEADER};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub(crate) use http_request::insert_header;
pub use http_response::HttpResponse;
