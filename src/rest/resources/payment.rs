//! Payment resource and its refunds.
//!
//! Refunds are always accessed under a payment:
//! - List: `payments/{payment_id}/refunds`
//! - Retrieve: `payments/{payment_id}/refunds/{refund_id}`
//! - Create: `payments/{payment_id}/refunds`
//! - Update: `payments/{payment_id}/refunds/{refund_id}` (POST)
//!
//! Refunds cannot be deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::Dispatch;
use crate::rest::{
    ApiResource, ApiResponse, Collection, NestedResource, Params, RequestOptions, ResourceError,
};

/// A Safepay payment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Payment {
    /// The payment token.
    pub token: String,

    /// Amount in the currency's minor unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiResource for Payment {
    const OBJECT: &'static str = "payment";
}

impl NestedResource for Payment {
    const PATH: &'static str = "payments";
}

/// A refund of a payment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Refund {
    /// The refund token.
    pub token: String,

    /// Token of the refunded payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,

    /// Refunded amount in the currency's minor unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiResource for Refund {
    const OBJECT: &'static str = "refund";
}

/// Parameters for creating a refund.
///
/// Leaving `amount` unset refunds the remaining balance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefundCreateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Parameters for updating a refund.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefundUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Payment {
    /// Nested path of a payment's refunds.
    pub const REFUNDS_PATH: &'static str = "/refunds";

    /// Refunds a payment, fully or partially.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the parameters cannot be serialized or
    /// the request fails.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use safepay_api::rest::resources::{Payment, RefundCreateParams};
    ///
    /// let refund = Payment::create_refund(
    ///     &client,
    ///     "pay_1",
    ///     &RefundCreateParams { amount: Some(5000), ..Default::default() },
    ///     None,
    /// )
    /// .await?;
    /// println!("Refund {} is {:?}", refund.token, refund.state);
    /// ```
    pub async fn create_refund<D: Dispatch>(
        client: &D,
        payment_id: &str,
        params: &RefundCreateParams,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<Refund>, ResourceError> {
        let params = Params::from_serializable(params)?.into_value();
        Self::create_nested_resource(client, payment_id, Self::REFUNDS_PATH, Some(&params), options)
            .await
    }

    /// Retrieves a refund.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn retrieve_refund<D: Dispatch>(
        client: &D,
        payment_id: &str,
        refund_id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<Refund>, ResourceError> {
        Self::retrieve_nested_resource(
            client,
            payment_id,
            Self::REFUNDS_PATH,
            refund_id,
            None,
            options,
        )
        .await
    }

    /// Updates a refund's reason or metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the parameters cannot be serialized or
    /// the request fails.
    pub async fn update_refund<D: Dispatch>(
        client: &D,
        payment_id: &str,
        refund_id: &str,
        params: &RefundUpdateParams,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<Refund>, ResourceError> {
        let params = Params::from_serializable(params)?.into_value();
        Self::update_nested_resource(
            client,
            payment_id,
            Self::REFUNDS_PATH,
            refund_id,
            Some(&params),
            options,
        )
        .await
    }

    /// Lists a payment's refunds.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the request fails.
    pub async fn all_refunds<D: Dispatch>(
        client: &D,
        payment_id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<ApiResponse<Collection<Refund>>, ResourceError> {
        Self::all_nested_resources(client, payment_id, Self::REFUNDS_PATH, None, options).await
    }
}
