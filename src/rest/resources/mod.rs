//! Typed Safepay resources.
//!
//! Each resource names its collection path through
//! [`NestedResource`](crate::rest::NestedResource) and wraps the generic
//! nested operations in typed methods:
//!
//! | Resource | Nested path | Methods |
//! |---|---|---|
//! | [`Customer`] | `/cards` | `create_card`, `retrieve_card`, `update_card`, `delete_card`, `all_cards` |
//! | [`Payment`] | `/refunds` | `create_refund`, `retrieve_refund`, `update_refund`, `all_refunds` |
//!
//! # Example
//!
//! ```rust,ignore
//! use safepay_api::rest::resources::{Customer, Payment};
//!
//! let card = Customer::retrieve_card(&client, "cus_1", "card_9", None).await?;
//! let refunds = Payment::all_refunds(&client, "pay_1", None).await?;
//! ```

mod customer;
mod payment;

pub use customer::{CardCreateParams, CardListParams, CardUpdateParams, Customer, PaymentMethod};
pub use payment::{Payment, Refund, RefundCreateParams, RefundUpdateParams};
