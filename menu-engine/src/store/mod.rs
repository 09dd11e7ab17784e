//! Remote store boundary
//!
//! The engine has exactly one collaborator: the store that owns the
//! product catalog and accepts the persistence calls of the submission
//! protocol. [`MenuStore`] is the injected seam; [`SupabaseStore`] is the
//! production client and [`MemoryStore`] the in-process double.

mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use shared::models::{Order, OrderCreate, OrderLineCreate, Product, ProductOption};
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("store response could not be decoded: {0}")]
    Decode(String),

    #[error("store did not return an order identifier")]
    MissingOrderId,

    #[error("store configuration invalid: {0}")]
    Config(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote store contract
///
/// The two fetches are read-only and return rows filtered to the given
/// stall. The three write calls implement the submission protocol:
/// header insert returning the generated identifier, bulk line insert
/// (treated as all-or-nothing by callers), and the compensating header
/// delete issued when the line insert fails.
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Products for the given stall
    async fn fetch_products(&self, stall_id: &str) -> StoreResult<Vec<Product>>;

    /// Product options for the given stall, ungrouped
    async fn fetch_options(&self, stall_id: &str) -> StoreResult<Vec<ProductOption>>;

    /// Insert the order header, returning the stored row with its identifier
    async fn create_order(&self, order: &OrderCreate) -> StoreResult<Order>;

    /// Bulk insert of line items under an already created header
    async fn create_order_lines(&self, lines: &[OrderLineCreate]) -> StoreResult<()>;

    /// Delete an order header (compensation for a failed line insert)
    async fn delete_order(&self, order_id: &str) -> StoreResult<()>;
}
