//! Error types for resource operations.
//!
//! Nested resource operations surface exactly two kinds of failure, both
//! passed through unchanged:
//!
//! - [`ValidationError`]: the parameters were rejected before anything was sent
//! - [`ApiError`]: the transport failed (network, non-2xx status, undecodable body)
//!
//! # Example
//!
//! ```rust,ignore
//! use safepay_api::rest::ResourceError;
//! use safepay_api::clients::ApiError;
//!
//! match Customer::retrieve_card(&client, "cus_1", "card_9", None).await {
//!     Ok(card) => println!("Card ending in {:?}", card.last_four),
//!     Err(ResourceError::Validation(e)) => println!("Bad parameters: {e}"),
//!     Err(ResourceError::Api(ApiError::NotFound(e))) => println!("No such card: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::ApiError;

/// Parameters failed shape validation.
///
/// Raised before dispatch; when it is returned no request has been sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Parameters must be a string-keyed mapping.
    #[error("You must pass an object as the request parameters, found {found}.")]
    NotAMapping {
        /// The JSON type that was passed instead.
        found: &'static str,
    },

    /// Typed parameters could not be serialized.
    #[error("Failed to serialize request parameters: {message}")]
    Serialization {
        /// The serializer's error message.
        message: String,
    },
}

/// Error type for resource operations.
///
/// A transparent union of the two failure kinds; neither is wrapped,
/// translated or recovered from.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request parameters were rejected before dispatch.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ResourceError {
    /// Returns the request ID if the failure came from an API response.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.request_id(),
            Self::Validation(_) => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
