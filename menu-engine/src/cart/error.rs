use crate::store::StoreError;
use thiserror::Error;

/// Local cart mutation errors
///
/// None of these reach the network and none leave the cart in a
/// partially applied state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("submission in progress, cart is locked")]
    SubmitInProgress,

    #[error("product not found in catalog: {0}")]
    UnknownProduct(String),

    #[error("option '{label}' is not available for product {product_id}")]
    UnknownOption { product_id: String, label: String },

    #[error("choose an option for {0} first")]
    OptionRequired(String),
}

/// Submission errors
///
/// Validation variants are raised before any store call. Every variant
/// leaves the cart contents untouched so the customer can correct and
/// retry without re-entering items.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("stall is not identified")]
    MissingStall,

    #[error("cart is empty")]
    EmptyCart,

    #[error("customer name and delivery location are required")]
    MissingCustomerInfo,

    #[error("an option must be chosen for: {}", .products.join(", "))]
    MissingOptions { products: Vec<String> },

    #[error("failed to create the order: {0}")]
    CreateOrder(#[source] StoreError),

    #[error("failed to save the order items, the order was rolled back: {0}")]
    CreateLines(#[source] StoreError),

    /// Line insert failed and so did the compensating header delete;
    /// order `order_id` exists in the store without line items.
    #[error("order {order_id} was created but its items failed to save")]
    OrphanedOrder {
        order_id: String,
        #[source]
        source: StoreError,
    },
}

impl SubmitError {
    /// Raised by validation, recoverable by user correction alone
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingStall
                | Self::EmptyCart
                | Self::MissingCustomerInfo
                | Self::MissingOptions { .. }
        )
    }
}
