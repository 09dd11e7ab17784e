//! Catalog Loader
//!
//! Read-only product/option cache for the current stall, loaded once per
//! distinct stall identifier from the remote store. A failed load
//! degrades to an empty catalog: the cart simply has nothing to add, it
//! never blocks on the failure.

mod categories;

pub use categories::{CATEGORY_ORDER, CategoryFilter, display_category, ordered_categories};

use crate::store::{MenuStore, StoreResult};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{Product, ProductOption};
use std::collections::HashMap;
use std::sync::Arc;

/// Catalog load status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// No stall identifier was supplied; terminal, no retry
    #[default]
    NotConfigured,
    /// Catalog loaded for the current stall
    Ready,
    /// Fetch failed; catalog is empty
    Failed,
}

#[derive(Default)]
struct CatalogCache {
    status: CatalogStatus,
    stall_id: Option<String>,
    products: Vec<Product>,
    /// Active options grouped by owning product id
    options: HashMap<String, Vec<ProductOption>>,
}

/// Read-only catalog for one stall
pub struct CatalogService {
    store: Arc<dyn MenuStore>,
    cache: RwLock<CatalogCache>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.read();
        f.debug_struct("CatalogService")
            .field("status", &cache.status)
            .field("stall_id", &cache.stall_id)
            .field("products_count", &cache.products.len())
            .finish()
    }
}

impl CatalogService {
    pub fn new(store: Arc<dyn MenuStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(CatalogCache::default()),
        }
    }

    /// Load the catalog for the given stall
    ///
    /// No stall identifier leaves the catalog in `NotConfigured` with no
    /// products. Repeat calls with the stall already loaded are no-ops;
    /// a different stall replaces the cache wholesale (re-fetches are
    /// never incremental).
    pub async fn load(&self, stall_id: Option<&str>) {
        let Some(stall_id) = stall_id.map(str::trim).filter(|s| !s.is_empty()) else {
            *self.cache.write() = CatalogCache::default();
            tracing::warn!("No stall identifier, menu not configured");
            return;
        };

        if self.cache.read().stall_id.as_deref() == Some(stall_id) {
            return;
        }

        match self.fetch(stall_id).await {
            Ok((products, options)) => {
                tracing::info!(
                    stall_id = %stall_id,
                    products = products.len(),
                    "Catalog loaded"
                );
                let mut cache = self.cache.write();
                cache.status = CatalogStatus::Ready;
                cache.stall_id = Some(stall_id.to_string());
                cache.products = products;
                cache.options = options;
            }
            Err(e) => {
                tracing::warn!(
                    stall_id = %stall_id,
                    error = %e,
                    "Catalog load failed, serving empty menu"
                );
                let mut cache = self.cache.write();
                cache.status = CatalogStatus::Failed;
                cache.stall_id = Some(stall_id.to_string());
                cache.products.clear();
                cache.options.clear();
            }
        }
    }

    async fn fetch(
        &self,
        stall_id: &str,
    ) -> StoreResult<(Vec<Product>, HashMap<String, Vec<ProductOption>>)> {
        let products = self
            .store
            .fetch_products(stall_id)
            .await?
            .into_iter()
            .filter(keep_product)
            .collect();

        let mut grouped: HashMap<String, Vec<ProductOption>> = HashMap::new();
        for option in self.store.fetch_options(stall_id).await? {
            if !option.is_active {
                continue;
            }
            grouped
                .entry(option.product_id.clone())
                .or_default()
                .push(option);
        }

        Ok((products, grouped))
    }

    pub fn status(&self) -> CatalogStatus {
        self.cache.read().status
    }

    pub fn stall_id(&self) -> Option<String> {
        self.cache.read().stall_id.clone()
    }

    /// Full product list for the current stall
    pub fn products(&self) -> Vec<Product> {
        self.cache.read().products.clone()
    }

    /// Resolve a product identifier into its cached record
    pub fn product(&self, product_id: &str) -> Option<Product> {
        self.cache
            .read()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
    }

    /// Active options for a product, empty when it has none
    pub fn options_for(&self, product_id: &str) -> Vec<ProductOption> {
        self.cache
            .read()
            .options
            .get(product_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether option selection is a precondition for adding quantity
    pub fn has_options(&self, product_id: &str) -> bool {
        self.cache
            .read()
            .options
            .get(product_id)
            .is_some_and(|opts| !opts.is_empty())
    }

    /// Distinct categories present, in presentation order
    pub fn categories(&self) -> Vec<String> {
        ordered_categories(&self.cache.read().products)
    }
}

/// Boundary validation: rows that would poison the catalog are dropped
/// with a warning instead of failing the load.
fn keep_product(product: &Product) -> bool {
    if !product.is_active {
        tracing::warn!(product_id = %product.id, "Dropping inactive product row");
        return false;
    }
    if product.price < Decimal::ZERO {
        tracing::warn!(
            product_id = %product.id,
            price = %product.price,
            "Dropping product row with negative price"
        );
        return false;
    }
    true
}
