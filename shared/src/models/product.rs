//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
///
/// Owned by the remote store; the engine only holds a read-only cached
/// copy for the current stall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price (non-negative)
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category label (free text, matched case-insensitively)
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    /// Case-normalized category key used for filtering and grouping
    pub fn category_key(&self) -> String {
        self.category.trim().to_lowercase()
    }
}

/// Product option entity (e.g. size)
///
/// Zero or more per product; when any exist, picking one is a
/// precondition for adding quantity of that product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOption {
    pub id: String,
    /// Owning product reference
    pub product_id: String,
    pub label: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
