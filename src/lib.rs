//! # Safepay API Rust SDK
//!
//! A Rust SDK for the Safepay payments API, providing type-safe
//! configuration, an async HTTP client, and operations on resources nested
//! under a parent resource (a customer's saved cards, a payment's refunds).
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`SafepayConfig`] and [`SafepayConfigBuilder`]
//! - Validated newtypes for credentials, API versions and base URLs
//! - An async HTTP client that sends each request exactly once
//! - The [`rest::NestedResource`] trait with create, retrieve, update,
//!   delete and list operations
//! - Typed resources in [`rest::resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use safepay_api::{Environment, SafepayConfig, SecretKey};
//!
//! let config = SafepayConfig::builder()
//!     .secret_key(SecretKey::new("sec_sandbox_123").unwrap())
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base(), "https://sandbox.api.getsafepay.com");
//! ```
//!
//! ## Nested Resources
//!
//! ```rust,ignore
//! use safepay_api::{HttpClient, RequestOptions, SecretKey};
//! use safepay_api::rest::resources::Customer;
//!
//! let client = HttpClient::new(&config)?;
//!
//! // GET customers/cus_1/cards/card_9
//! let card = Customer::retrieve_card(&client, "cus_1", "card_9", None).await?;
//! println!("Card ending in {:?}", card.last_four);
//!
//! // Same call on behalf of another merchant
//! let options = RequestOptions::ApiKey(SecretKey::new("sec_other_merchant")?);
//! let card = Customer::retrieve_card(&client, "cus_1", "card_9", Some(&options)).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **Single attempt**: Nothing is retried; errors reach the caller unchanged

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiBase, ApiVersion, Environment, SafepayConfig, SafepayConfigBuilder, SecretKey};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ApiResponseError, Dispatch, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, InvalidHttpRequestError,
};

// Re-export resource types
pub use rest::{
    ApiResponse, NestedResource, RequestOptions, RequestSettings, ResourceError, ValidationError,
};
