//! URL building for resources and their nested sub-resources.
//!
//! A nested URL is the owning resource's URL, the nested path segment, and
//! optionally the nested identifier:
//!
//! ```text
//! customers/cus_1                 resource_url("customers", "cus_1")
//! customers/cus_1/cards           + nested path "/cards"
//! customers/cus_1/cards/card_9    + "/" + nested id
//! ```
//!
//! Identifiers are percent-encoded; path constants are used as given.
//!
//! # Example
//!
//! ```rust
//! use safepay_api::rest::{nested_resource_url, resource_url};
//!
//! let base = resource_url("customers", "cus_1");
//! assert_eq!(base, "customers/cus_1");
//! assert_eq!(
//!     nested_resource_url(&base, "/cards", Some("card_9")),
//!     "customers/cus_1/cards/card_9"
//! );
//! assert_eq!(nested_resource_url(&base, "/cards", None), "customers/cus_1/cards");
//! ```

use crate::clients::HttpMethod;

/// Operations that can be performed on a nested resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedOperation {
    /// Create a nested object (POST /{path}/{id}/{nested}).
    Create,
    /// Retrieve one nested object (GET /{path}/{id}/{nested}/{nested_id}).
    Retrieve,
    /// Update a nested object (POST /{path}/{id}/{nested}/{nested_id}).
    Update,
    /// Delete a nested object (DELETE /{path}/{id}/{nested}/{nested_id}).
    Delete,
    /// List nested objects (GET /{path}/{id}/{nested}).
    List,
}

impl NestedOperation {
    /// Returns the HTTP method for this operation.
    ///
    /// Updates are sent as `POST`.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::Retrieve | Self::List => HttpMethod::Get,
            Self::Create | Self::Update => HttpMethod::Post,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns `true` if the operation addresses a single nested object.
    #[must_use]
    pub const fn targets_member(&self) -> bool {
        matches!(self, Self::Retrieve | Self::Update | Self::Delete)
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Retrieve => "retrieve",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

/// Builds the URL of a single resource instance.
#[must_use]
pub fn resource_url(path: &str, id: &str) -> String {
    format!(
        "{}/{}",
        path.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Appends a nested path and optional nested identifier to a resource URL.
///
/// `nested_path` is expected to start with `/` (e.g. `"/cards"`).
#[must_use]
pub fn nested_resource_url(base_url: &str, nested_path: &str, nested_id: Option<&str>) -> String {
    let mut url = format!("{base_url}{nested_path}");
    if let Some(nested_id) = nested_id {
        url.push('/');
        url.push_str(&urlencoding::encode(nested_id));
    }
    url
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NestedOperation>();
};
