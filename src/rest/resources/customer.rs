//! Customer resource and its saved payment methods.
//!
//! Saved cards always live under a customer:
//! - List: `customers/{customer_id}/cards`
//! - Retrieve: `customers/{customer_id}/cards/{card_id}`
//! - Create: `customers/{customer_id}/cards`
//! - Update: `customers/{customer_id}/cards/{card_id}` (POST)
//! - Delete: `customers/{customer_id}/cards/{card_id}`
//!
//! # Example
//!
//! ```rust,ignore
//! use safepay_api::rest::resources::{CardCreateParams, CardListParams, Customer};
//!
//! let card = Customer::create_card(
//!     &client,
//!     "cus_1",
//!     &CardCreateParams { token: "tok_abc".to_string(), is_default: Some(true) },
//!     None,
//! )
//! .await?;
//!
//! let cards = Customer::all_cards(&client, "cus_1", Some(&CardListParams { limit: Some(10), ..Default::default() }), None).await?;
//! for card in cards.iter() {
//!     println!("{} ending in {:?}", card.token, card.last_four);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::Dispatch;
use crate::rest::{
    ApiResource, ApiResponse, Collection, DeletedObject, NestedResource, Params, RequestOptions,
    ResourceError,
};

/// A Safepay customer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Customer {
    /// The customer token (e.g. `cus_...`).
    pub token: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Whether the customer was created during a guest checkout.
    #[serde(default)]
    pub is_guest: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiResource for Customer {
    const OBJECT: &'static str = "customer";
}

impl NestedResource for Customer {
    const PATH: &'static str = "customers";
}

/// A payment method saved on a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PaymentMethod {
    /// The payment method token.
    pub token: String,

    /// Token of the owning customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// The instrument kind, e.g. `CARD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Card network, e.g. `VISA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_month: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_year: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,

    #[serde(default)]
    pub is_default: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiResource for PaymentMethod {
    const OBJECT: &'static str = "payment_method";
}

/// Parameters for saving a card on a customer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardCreateParams {
    /// A tokenized card from the Safepay checkout or tokenization API.
    pub token: String,

    /// Make this card the customer's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// Parameters for updating a saved card.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
}

/// Parameters for listing saved cards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardListParams {
    /// Maximum number of cards to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Only return payment methods of this kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Customer {
    /// Nested path of a customer's saved cards.
    pub const CARDS_PATH: &'static str = "/cards";

    /// Saves a card on a customer.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the parameters cannot be serialized or
    /// the request fails.
    pub async fn create_card<D: Dispatch>(
        client: &D,
        customer_id: &str,
        params: &CardCreateParams,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<PaymentMethod>, ResourceError> {
        let params = Params::from_serializable(params)?.into_value();
        Self::create_nested_resource(client, customer_id, Self::CARDS_PATH, Some(&params), options)
            .await
    }

    /// Retrieves a saved card.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails, including
    /// [`ApiError::NotFound`](crate::clients::ApiError::NotFound) for an
    /// unknown card.
    pub async fn retrieve_card<D: Dispatch>(
        client: &D,
        customer_id: &str,
        card_id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<PaymentMethod>, ResourceError> {
        Self::retrieve_nested_resource(client, customer_id, Self::CARDS_PATH, card_id, None, options)
            .await
    }

    /// Updates a saved card.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the parameters cannot be serialized or
    /// the request fails.
    pub async fn update_card<D: Dispatch>(
        client: &D,
        customer_id: &str,
        card_id: &str,
        params: &CardUpdateParams,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<PaymentMethod>, ResourceError> {
        let params = Params::from_serializable(params)?.into_value();
        Self::update_nested_resource(
            client,
            customer_id,
            Self::CARDS_PATH,
            card_id,
            Some(&params),
            options,
        )
        .await
    }

    /// Deletes a saved card.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn delete_card<D: Dispatch>(
        client: &D,
        customer_id: &str,
        card_id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<DeletedObject>, ResourceError> {
        Self::delete_nested_resource(client, customer_id, Self::CARDS_PATH, card_id, None, options)
            .await
    }

    /// Lists a customer's saved cards.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the parameters cannot be serialized or
    /// the request fails.
    pub async fn all_cards<D: Dispatch>(
        client: &D,
        customer_id: &str,
        params: Option<&CardListParams>,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<Collection<PaymentMethod>>, ResourceError> {
        let params = params
            .map(|p| Params::from_serializable(p).map(Params::into_value))
            .transpose()?;
        Self::all_nested_resources(
            client,
            customer_id,
            Self::CARDS_PATH,
            params.as_ref(),
            options,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_urls() {
        assert_eq!(Customer::resource_url("cus_1"), "customers/cus_1");
        assert_eq!(
            Customer::nested_resource_url("cus_1", Customer::CARDS_PATH, Some("card_9")),
            "customers/cus_1/cards/card_9"
        );
    }

    #[test]
    fn test_payment_method_deserialization() {
        let card: PaymentMethod = serde_json::from_value(json!({
            "token": "card_9",
            "customer": "cus_1",
            "kind": "CARD",
            "scheme": "VISA",
            "last_four": "4242",
            "expiry_month": "12",
            "expiry_year": "2030",
            "is_default": true,
            "created_at": "2026-03-01T10:00:00Z",
            "unknown_field": "ignored"
        }))
        .unwrap();

        assert_eq!(card.token, "card_9");
        assert_eq!(card.last_four.as_deref(), Some("4242"));
        assert!(card.is_default);
        assert!(card.created_at.is_some());
    }

    #[test]
    fn test_card_params_skip_unset_fields() {
        let params = Params::from_serializable(&CardCreateParams {
            token: "tok_abc".to_string(),
            is_default: None,
        })
        .unwrap();
        assert_eq!(params.into_value(), json!({"token": "tok_abc"}));

        let params = Params::from_serializable(&CardListParams {
            limit: Some(5),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(params.to_query(), vec![("limit".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_customer_deserialization_defaults() {
        let customer: Customer = serde_json::from_value(json!({"token": "cus_1"})).unwrap();
        assert_eq!(customer.token, "cus_1");
        assert!(!customer.is_guest);
        assert!(customer.email.is_none());
    }
}
