//! In-process store
//!
//! Backs the engine tests and local development without a remote store.
//! Unlike [`SupabaseStore`](super::SupabaseStore), fetches return the
//! seeded rows unfiltered so the catalog loader's boundary validation is
//! exercised. Failure injection flips individual calls to errors,
//! mirroring the network failure modes of the real client.

use super::{MenuStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shared::models::{Order, OrderCreate, OrderLineCreate, Product, ProductOption};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-process store double with failure injection
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Vec<Product>,
    options: Vec<ProductOption>,
    orders: Mutex<Vec<Order>>,
    lines: Mutex<Vec<OrderLineCreate>>,

    /// Fail the next fetch calls
    pub fail_fetch: AtomicBool,
    /// Fail the header insert
    pub fail_create_order: AtomicBool,
    /// Fail the bulk line insert
    pub fail_create_lines: AtomicBool,
    /// Fail the compensating delete
    pub fail_delete_order: AtomicBool,

    fetch_calls: AtomicUsize,
    create_order_calls: AtomicUsize,
    create_lines_calls: AtomicUsize,
    delete_order_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_options(mut self, options: Vec<ProductOption>) -> Self {
        self.options = options;
        self
    }

    /// Orders currently persisted (deleted headers are gone)
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().clone()
    }

    /// Line items persisted so far
    pub fn order_lines(&self) -> Vec<OrderLineCreate> {
        self.lines.lock().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn create_order_calls(&self) -> usize {
        self.create_order_calls.load(Ordering::SeqCst)
    }

    pub fn create_lines_calls(&self) -> usize {
        self.create_lines_calls.load(Ordering::SeqCst)
    }

    pub fn delete_order_calls(&self) -> usize {
        self.delete_order_calls.load(Ordering::SeqCst)
    }

    fn injected(call: &str) -> StoreError {
        StoreError::Unavailable(format!("{call} failure injected"))
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn fetch_products(&self, _stall_id: &str) -> StoreResult<Vec<Product>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::injected("fetch_products"));
        }
        Ok(self.products.clone())
    }

    async fn fetch_options(&self, _stall_id: &str) -> StoreResult<Vec<ProductOption>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::injected("fetch_options"));
        }
        Ok(self.options.clone())
    }

    async fn create_order(&self, order: &OrderCreate) -> StoreResult<Order> {
        self.create_order_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create_order.load(Ordering::SeqCst) {
            return Err(Self::injected("create_order"));
        }
        let stored = Order {
            id: uuid::Uuid::new_v4().to_string(),
            stall_id: order.stall_id.clone(),
            customer_name: order.customer_name.clone(),
            location: order.location.clone(),
            total: order.total,
            status: order.status,
            created_at: Some(Utc::now()),
        };
        self.orders.lock().push(stored.clone());
        Ok(stored)
    }

    async fn create_order_lines(&self, lines: &[OrderLineCreate]) -> StoreResult<()> {
        self.create_lines_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create_lines.load(Ordering::SeqCst) {
            return Err(Self::injected("create_order_lines"));
        }
        self.lines.lock().extend_from_slice(lines);
        Ok(())
    }

    async fn delete_order(&self, order_id: &str) -> StoreResult<()> {
        self.delete_order_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete_order.load(Ordering::SeqCst) {
            return Err(Self::injected("delete_order"));
        }
        self.orders.lock().retain(|o| o.id != order_id);
        Ok(())
    }
}
