//! Response wrapper for resource operations.
//!
//! This module provides [`ApiResponse<T>`], which pairs a hydrated object
//! with the raw response it came from and the options the request was sent
//! with. The wrapper implements `Deref` for ergonomic access to the inner
//! data.
//!
//! # Deref Pattern
//!
//! ```rust,ignore
//! let cards = Customer::all_cards(&client, "cus_1", None, None).await?;
//!
//! // Collection methods via Deref
//! for card in cards.iter() {
//!     println!("{}", card.token);
//! }
//!
//! // The raw response is still available
//! println!("HTTP {}", cards.last_response().code);
//! ```

use std::ops::{Deref, DerefMut};

use crate::clients::HttpResponse;
use crate::rest::ResolvedOptions;

/// A hydrated object together with the response that produced it.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use safepay_api::clients::HttpResponse;
/// use safepay_api::rest::{ApiResponse, ResolvedOptions};
/// use serde_json::json;
///
/// let raw = HttpResponse::new(200, HashMap::new(), json!([1, 2, 3]));
/// let response = ApiResponse::new(vec![1, 2, 3], raw.clone(), ResolvedOptions::default());
///
/// assert_eq!(response.len(), 3);
/// assert_eq!(response.last_response(), &raw);
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    data: T,
    last_response: HttpResponse,
    options: ResolvedOptions,
}

impl<T> ApiResponse<T> {
    /// Attaches a response and its options to hydrated data.
    #[must_use]
    pub const fn new(data: T, last_response: HttpResponse, options: ResolvedOptions) -> Self {
        Self {
            data,
            last_response,
            options,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Consumes the response and returns all of its parts.
    #[must_use]
    pub fn into_parts(self) -> (T, HttpResponse, ResolvedOptions) {
        (self.data, self.last_response, self.options)
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns the raw response the data was hydrated from.
    #[must_use]
    pub const fn last_response(&self) -> &HttpResponse {
        &self.last_response
    }

    /// Returns the options the request was sent with.
    ///
    /// Pass `options().to_request_options()` to a follow-up call to reuse
    /// the same credential and settings.
    #[must_use]
    pub const fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Returns the `X-Request-Id` of the response, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.last_response.request_id()
    }

    /// Maps the inner data, keeping the response and options.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            data: f(self.data),
            last_response: self.last_response,
            options: self.options,
        }
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ApiResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

// Verify ApiResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiResponse<String>>();
    assert_send_sync::<ApiResponse<Vec<String>>>();
};
