//! Order header and line item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status tracked by the store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Initial status assigned at submission
    #[default]
    New,
    Preparing,
    Delivered,
    Cancelled,
}

/// Persisted order header (identifier assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Stall the customer ordered from
    pub stall_id: String,
    /// Customer display name ("comanda")
    pub customer_name: String,
    /// Delivery/location label (e.g. "Guarda-sol 12")
    pub location: String,
    /// Cart total captured at submission time
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub stall_id: String,
    pub customer_name: String,
    pub location: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
}

/// Create line item payload
///
/// One per cart line, bulk inserted under the order header. The unit
/// price is captured from the cart line, not re-read from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineCreate {
    pub order_id: String,
    pub product_id: String,
    pub quantity: i32,
    /// Unit price at time of order
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Option label and free-text note merged
    #[serde(default)]
    pub notes: String,
}
