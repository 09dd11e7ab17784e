//! Cart types
//!
//! The cart is process-local and never partially persisted: either the
//! whole cart becomes an order at submission, or nothing is written.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line per distinct product
///
/// Quantity is strictly positive while the line exists; a line that
/// reaches zero is removed, not kept. Name and unit price are captured
/// when the line is created (the catalog never mutates in-session).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: i32,
    /// Free-text note (may be empty)
    #[serde(default)]
    pub note: String,
    /// Present iff the product defines options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
}

impl CartLine {
    /// Line contribution to the cart total
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Option label and free-text note merged for the persisted line item
    pub fn combined_notes(&self) -> String {
        match (&self.selected_option, self.note.trim()) {
            (Some(option), "") => option.clone(),
            (Some(option), note) => format!("{option} - {note}"),
            (None, note) => note.to_string(),
        }
    }
}

/// Customer-supplied identity fields for submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInfo {
    /// Display name ("comanda")
    pub name: String,
    /// Delivery/location label
    pub location: String,
}

impl CustomerInfo {
    /// Both fields non-blank after trimming
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.location.trim().is_empty()
    }
}

/// Cart lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartState {
    Empty,
    Composing,
    Submitting,
}
