//! Resource infrastructure for the Safepay API.
//!
//! This module provides:
//!
//! - **[`NestedResource`] trait**: create, retrieve, update, delete and list
//!   objects nested under a parent resource
//! - **[`ApiResponse<T>`]**: a Deref-based wrapper pairing a hydrated object
//!   with its raw response
//! - **[`RequestOptions`]**: per-request credential and settings overrides
//! - **[`Params`]** and [`validate_params`]: request parameter validation
//! - **Hydration**: [`ApiResource`], [`convert_to_safepay_object`],
//!   [`Collection`], [`SafepayObject`], [`DeletedObject`]
//! - **Errors**: [`ResourceError`] and [`ValidationError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use safepay_api::{HttpClient, SafepayConfig, SecretKey};
//! use safepay_api::rest::resources::{CardCreateParams, Customer};
//!
//! let config = SafepayConfig::builder()
//!     .secret_key(SecretKey::new("sec_sandbox_123")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! // POST customers/cus_1/cards
//! let card = Customer::create_card(
//!     &client,
//!     "cus_1",
//!     &CardCreateParams { token: "tok_abc".to_string(), ..Default::default() },
//!     None,
//! )
//! .await?;
//! println!("Saved card {} (request {:?})", card.token, card.request_id());
//! ```

mod errors;
mod nested;
mod object;
mod options;
mod params;
mod path;
mod response;

pub mod resources;

// Public exports
pub use errors::{ResourceError, ValidationError};
pub use nested::NestedResource;
pub use object::{convert_to_safepay_object, ApiResource, Collection, DeletedObject, SafepayObject};
pub use options::{RequestOptions, RequestSettings, ResolvedOptions};
pub use params::{validate_params, Params};
pub use path::{nested_resource_url, resource_url, NestedOperation};
pub use response::ApiResponse;
