//! Data models
//!
//! Shared between the menu engine and the remote store. Field names match
//! the store's column names; money columns are `numeric` and map to
//! [`rust_decimal::Decimal`] serialized as JSON floats.

pub mod order;
pub mod product;

// Re-exports
pub use order::*;
pub use product::*;
