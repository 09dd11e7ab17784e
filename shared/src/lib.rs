//! Shared types for the PraiaFlow menu engine
//!
//! Data models exchanged with the remote store plus the in-memory cart
//! types owned by the ordering engine.

pub mod cart;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
