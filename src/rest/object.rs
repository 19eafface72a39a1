//! Turning JSON response bodies into domain objects.
//!
//! Every type an operation can return implements [`ApiResource`].
//! [`convert_to_safepay_object`] peels the Safepay response envelope off
//! the body and deserializes what is inside.
//!
//! # Response Envelope
//!
//! Most Safepay endpoints wrap their payload:
//!
//! ```json
//! { "data": { "token": "card_9", ... }, "status": { "errors": [], "message": "success" } }
//! ```
//!
//! A body is treated as an envelope when it is an object that has a `data`
//! key and no keys other than `data` and `status`. Any other body is
//! deserialized as-is.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpResponse};

/// A type that can be hydrated from a Safepay response.
pub trait ApiResource: DeserializeOwned + Send + Sync {
    /// The object name used in logs and error messages.
    const OBJECT: &'static str;
}

/// Hydrates a response body into `T`.
///
/// # Errors
///
/// Returns [`ApiError::MalformedResponse`] if the payload does not
/// deserialize into `T`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use safepay_api::clients::HttpResponse;
/// use safepay_api::rest::{convert_to_safepay_object, SafepayObject};
/// use serde_json::json;
///
/// let response = HttpResponse::new(
///     200,
///     HashMap::new(),
///     json!({"data": {"token": "card_9", "object": "payment_method"}, "status": {"errors": []}}),
/// );
///
/// let object: SafepayObject = convert_to_safepay_object(&response).unwrap();
/// assert_eq!(object.object(), Some("payment_method"));
/// ```
pub fn convert_to_safepay_object<T: ApiResource>(response: &HttpResponse) -> Result<T, ApiError> {
    let payload = unwrap_envelope(&response.body);

    serde_json::from_value(payload.clone()).map_err(|e| ApiError::MalformedResponse {
        code: response.code,
        message: format!("Failed to deserialize {}: {e}", T::OBJECT),
        request_id: response.request_id().map(ToString::to_string),
    })
}

fn unwrap_envelope(body: &Value) -> &Value {
    match body {
        Value::Object(map)
            if map.contains_key("data")
                && map.keys().all(|key| key == "data" || key == "status") =>
        {
            &map["data"]
        }
        other => other,
    }
}

/// An untyped Safepay object.
///
/// Used when a caller has no typed model for a response. Fields keep the
/// order the API sent them in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SafepayObject(Map<String, Value>);

impl SafepayObject {
    /// Returns a field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the `object` tag, if the API sent one.
    #[must_use]
    pub fn object(&self) -> Option<&str> {
        self.0.get("object").and_then(Value::as_str)
    }

    /// Returns the identifier from `token` or `id`, whichever is present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0
            .get("token")
            .or_else(|| self.0.get("id"))
            .and_then(Value::as_str)
    }

    /// Consumes the object and returns its fields.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl ApiResource for SafepayObject {
    const OBJECT: &'static str = "safepay_object";
}

/// A list of objects returned by a list endpoint.
///
/// Accepts a bare JSON array or an object carrying the items under `data`
/// (or `items`) and an optional total under `count` (or `total`).
///
/// # Example
///
/// ```rust
/// use safepay_api::rest::{Collection, SafepayObject};
/// use serde_json::json;
///
/// let list: Collection<SafepayObject> =
///     serde_json::from_value(json!({"data": [{"token": "card_1"}], "count": 7})).unwrap();
///
/// assert_eq!(list.len(), 1);
/// assert_eq!(list.total(), 7);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Collection<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// The total number of items, when the API reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> Collection<T> {
    /// Returns the reported total, falling back to the number of items held.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.count
            .unwrap_or_else(|| u64::try_from(self.data.len()).unwrap_or(u64::MAX))
    }

    /// Consumes the collection and returns its items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            count: None,
        }
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionRepr<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "items")]
        data: Vec<T>,
        #[serde(default, alias = "total")]
        count: Option<u64>,
    },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match CollectionRepr::deserialize(deserializer)? {
            CollectionRepr::Bare(data) => Self { data, count: None },
            CollectionRepr::Wrapped { data, count } => Self { data, count },
        })
    }
}

impl<T: ApiResource> ApiResource for Collection<T> {
    const OBJECT: &'static str = "list";
}

/// The result of a delete operation.
///
/// A successful delete with an empty or `null` payload counts as deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<RawDeleted>")]
pub struct DeletedObject {
    /// Identifier of the deleted object, when the API echoes it.
    pub id: Option<String>,
    /// Whether the object was deleted.
    pub deleted: bool,
}

#[derive(Deserialize)]
struct RawDeleted {
    #[serde(default, alias = "token")]
    id: Option<String>,
    #[serde(default = "deleted_by_default")]
    deleted: bool,
}

const fn deleted_by_default() -> bool {
    true
}

impl From<Option<RawDeleted>> for DeletedObject {
    fn from(raw: Option<RawDeleted>) -> Self {
        raw.map_or(
            Self {
                id: None,
                deleted: true,
            },
            |raw| Self {
                id: raw.id,
                deleted: raw.deleted,
            },
        )
    }
}

impl ApiResource for DeletedObject {
    const OBJECT: &'static str = "deleted_object";
}

// Verify hydrated types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SafepayObject>();
    assert_send_sync::<Collection<SafepayObject>>();
    assert_send_sync::<DeletedObject>();
};
