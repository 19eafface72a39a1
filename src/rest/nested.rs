//! Operations on resources nested under a parent resource.
//!
//! Many Safepay objects only exist beneath another one: a customer's saved
//! cards live at `customers/{id}/cards`, a payment's refunds at
//! `payments/{id}/refunds`. The [`NestedResource`] trait gives a parent
//! resource five provided operations on such sub-collections.
//!
//! Every operation runs the same pipeline:
//!
//! 1. Validate `params` (a failure returns [`ValidationError`] and nothing is sent)
//! 2. Dispatch exactly one request through a [`Dispatch`] implementation
//! 3. Hydrate the response body into `T`
//! 4. Return `T` wrapped in an [`ApiResponse`] carrying the raw response
//!
//! Errors are returned as they were raised; nothing is retried.
//!
//! [`ValidationError`]: crate::rest::ValidationError
//!
//! # Example
//!
//! ```rust,ignore
//! use safepay_api::rest::{Collection, NestedResource, SafepayObject};
//! use serde_json::json;
//!
//! struct Customer;
//!
//! impl NestedResource for Customer {
//!     const PATH: &'static str = "customers";
//! }
//!
//! // GET customers/cus_1/cards/card_9
//! let card = Customer::retrieve_nested_resource::<SafepayObject, _>(
//!     &client, "cus_1", "/cards", "card_9", None, None,
//! )
//! .await?;
//!
//! // POST customers/cus_1/cards
//! let card = Customer::create_nested_resource::<SafepayObject, _>(
//!     &client, "cus_1", "/cards", Some(&json!({"token": "tok_abc"})), None,
//! )
//! .await?;
//! ```

use serde_json::Value;

use crate::clients::Dispatch;
use crate::rest::{
    convert_to_safepay_object, path, validate_params, ApiResource, ApiResponse, NestedOperation,
    RequestOptions, ResourceError,
};

/// A resource that owns nested sub-resources.
///
/// Implementors only name their collection path; URL building and the five
/// operations are provided.
#[allow(async_fn_in_trait)]
pub trait NestedResource {
    /// The collection path of the parent resource (e.g. `"customers"`).
    const PATH: &'static str;

    /// Returns the URL of the parent resource instance `id`.
    #[must_use]
    fn resource_url(id: &str) -> String {
        path::resource_url(Self::PATH, id)
    }

    /// Returns the URL of a nested collection, or of one nested object when
    /// `nested_id` is given.
    #[must_use]
    fn nested_resource_url(id: &str, nested_path: &str, nested_id: Option<&str>) -> String {
        path::nested_resource_url(&Self::resource_url(id), nested_path, nested_id)
    }

    /// Creates a nested object.
    ///
    /// Sends `POST {resource_url(id)}{nested_path}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `params` is not an object, and
    /// [`ResourceError::Api`] if the request or hydration fails.
    async fn create_nested_resource<T: ApiResource, D: Dispatch>(
        client: &D,
        id: &str,
        nested_path: &str,
        params: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<T>, ResourceError> {
        let url = Self::nested_resource_url(id, nested_path, None);
        nested_resource_operation(client, NestedOperation::Create, &url, params, options).await
    }

    /// Retrieves one nested object.
    ///
    /// Sends `GET {resource_url(id)}{nested_path}/{nested_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `params` is not an object, and
    /// [`ResourceError::Api`] if the request or hydration fails.
    async fn retrieve_nested_resource<T: ApiResource, D: Dispatch>(
        client: &D,
        id: &str,
        nested_path: &str,
        nested_id: &str,
        params: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<T>, ResourceError> {
        let url = Self::nested_resource_url(id, nested_path, Some(nested_id));
        nested_resource_operation(client, NestedOperation::Retrieve, &url, params, options).await
    }

    /// Updates one nested object.
    ///
    /// Sends `POST {resource_url(id)}{nested_path}/{nested_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `params` is not an object, and
    /// [`ResourceError::Api`] if the request or hydration fails.
    async fn update_nested_resource<T: ApiResource, D: Dispatch>(
        client: &D,
        id: &str,
        nested_path: &str,
        nested_id: &str,
        params: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<T>, ResourceError> {
        let url = Self::nested_resource_url(id, nested_path, Some(nested_id));
        nested_resource_operation(client, NestedOperation::Update, &url, params, options).await
    }

    /// Deletes one nested object.
    ///
    /// Sends `DELETE {resource_url(id)}{nested_path}/{nested_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `params` is not an object, and
    /// [`ResourceError::Api`] if the request or hydration fails.
    async fn delete_nested_resource<T: ApiResource, D: Dispatch>(
        client: &D,
        id: &str,
        nested_path: &str,
        nested_id: &str,
        params: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<T>, ResourceError> {
        let url = Self::nested_resource_url(id, nested_path, Some(nested_id));
        nested_resource_operation(client, NestedOperation::Delete, &url, params, options).await
    }

    /// Lists the nested collection.
    ///
    /// Sends `GET {resource_url(id)}{nested_path}`. `T` is normally a
    /// [`Collection`](crate::rest::Collection) of the nested type.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `params` is not an object, and
    /// [`ResourceError::Api`] if the request or hydration fails.
    async fn all_nested_resources<T: ApiResource, D: Dispatch>(
        client: &D,
        id: &str,
        nested_path: &str,
        params: Option<&Value>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<T>, ResourceError> {
        let url = Self::nested_resource_url(id, nested_path, None);
        nested_resource_operation(client, NestedOperation::List, &url, params, options).await
    }
}

async fn nested_resource_operation<T: ApiResource, D: Dispatch>(
    client: &D,
    operation: NestedOperation,
    url: &str,
    params: Option<&Value>,
    options: Option<&RequestOptions>,
) -> Result<ApiResponse<T>, ResourceError> {
    let params = validate_params(params)?;

    tracing::debug!(
        operation = operation.as_str(),
        member = operation.targets_member(),
        object = T::OBJECT,
        %url,
        "Dispatching nested resource request"
    );

    let (response, resolved) = client
        .dispatch(operation.http_method(), url, params, options)
        .await?;

    let object = convert_to_safepay_object::<T>(&response)?;
    Ok(ApiResponse::new(object, response, resolved))
}
