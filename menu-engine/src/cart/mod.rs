//! Cart/Order Engine
//!
//! Owns the in-progress cart (lines, option choices, notes, customer
//! identity), derives the filtered product view and the running total,
//! and runs the two-phase submission protocol against the remote store.

mod engine;
mod error;

pub use engine::{CartEngine, SubmitReceipt};
pub use error::{CartError, SubmitError};
