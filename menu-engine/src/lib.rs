//! PraiaFlow menu engine
//!
//! Cart/order composition for beach-stall digital menus: a read-only
//! catalog loader, the in-memory cart engine, and the two-phase order
//! submission protocol against a remote store.
//!
//! The engine owns no presentation. A UI layer feeds it discrete user
//! actions (quantity delta, option pick, note edit, submit) and renders
//! the derived views it exposes (filtered products, running total,
//! cart state).

pub mod cart;
pub mod catalog;
pub mod core;
pub mod store;
pub mod utils;

// Re-exports
pub use crate::cart::{CartEngine, CartError, SubmitError, SubmitReceipt};
pub use crate::catalog::{CatalogService, CatalogStatus, CategoryFilter};
pub use crate::core::Config;
pub use crate::store::{MemoryStore, MenuStore, StoreError, SupabaseStore};
