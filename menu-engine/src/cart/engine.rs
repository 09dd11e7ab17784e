//! Cart engine and submission protocol
//!
//! All mutations are synchronous reducer-style transitions triggered by
//! discrete user actions; the only suspension points are the two
//! sequential store calls inside [`CartEngine::submit`]. While a submit
//! is in flight the `submitting` flag gates every mutation.

use super::error::{CartError, SubmitError};
use crate::catalog::{CatalogService, CategoryFilter};
use crate::store::{MenuStore, StoreError};
use rust_decimal::Decimal;
use shared::cart::{CartLine, CartState, CustomerInfo};
use shared::models::{Order, OrderCreate, OrderLineCreate, OrderStatus, Product};
use std::collections::HashMap;
use std::sync::Arc;

/// Confirmation returned on a fully successful submission
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SubmitReceipt {
    pub order_id: String,
    pub total: Decimal,
    pub customer_name: String,
    /// Delivery label echoed back for the confirmation message
    pub location: String,
}

/// In-memory cart/order engine for one ordering session
pub struct CartEngine {
    store: Arc<dyn MenuStore>,
    catalog: Arc<CatalogService>,
    stall_id: Option<String>,
    filter: CategoryFilter,
    lines: Vec<CartLine>,
    /// Option choices made before the first quantity tick, per product.
    /// Flows onto the line at creation; also keeps the choice when a
    /// line is removed so re-adding restores it.
    pending_options: HashMap<String, String>,
    customer: CustomerInfo,
    submitting: bool,
}

impl CartEngine {
    pub fn new(
        store: Arc<dyn MenuStore>,
        catalog: Arc<CatalogService>,
        stall_id: Option<String>,
    ) -> Self {
        Self {
            store,
            catalog,
            stall_id: stall_id
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            filter: CategoryFilter::All,
            lines: Vec::new(),
            pending_options: HashMap::new(),
            customer: CustomerInfo::default(),
            submitting: false,
        }
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Cart lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Running total: exact sum of unit price times quantity, recomputed
    /// on every call, never cached
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Catalog filtered by the active category
    pub fn filtered_products(&self) -> Vec<Product> {
        self.catalog
            .products()
            .into_iter()
            .filter(|p| self.filter.matches(p))
            .collect()
    }

    pub fn quantity_of(&self, product_id: &str) -> i32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Chosen option for a product: from its line, or the pending choice
    /// recorded before the first quantity tick
    pub fn selected_option_of(&self, product_id: &str) -> Option<String> {
        self.line(product_id)
            .and_then(|l| l.selected_option.clone())
            .or_else(|| self.pending_options.get(product_id).cloned())
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn state(&self) -> CartState {
        if self.submitting {
            CartState::Submitting
        } else if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::Composing
        }
    }

    fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set the active category filter; cart contents are untouched
    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Customer identity fields used at submission
    pub fn set_customer(&mut self, name: impl Into<String>, location: impl Into<String>) {
        self.customer = CustomerInfo {
            name: name.into(),
            location: location.into(),
        };
    }

    /// Apply a quantity delta for a product
    ///
    /// Creates the line (quantity 1) on the first positive delta,
    /// updates it in place, and removes it once the quantity reaches
    /// zero or below. A product with options requires a chosen option
    /// before the first positive delta.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i32) -> Result<(), CartError> {
        self.ensure_mutable()?;
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| CartError::UnknownProduct(product_id.to_string()))?;

        if let Some(idx) = self.lines.iter().position(|l| l.product_id == product_id) {
            // Any integer delta is accepted; saturate instead of overflowing
            let new_quantity = self.lines[idx].quantity.saturating_add(delta);
            if new_quantity <= 0 {
                // Absence of a line means zero; keep the option choice
                // so re-adding restores it
                let removed = self.lines.remove(idx);
                if let Some(option) = removed.selected_option {
                    self.pending_options.insert(removed.product_id, option);
                }
            } else {
                self.lines[idx].quantity = new_quantity;
            }
            return Ok(());
        }

        if delta <= 0 {
            return Ok(());
        }

        let selected_option = self.pending_options.remove(product_id);
        if selected_option.is_none() && self.catalog.has_options(product_id) {
            return Err(CartError::OptionRequired(product.name));
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name,
            unit_price: product.price,
            quantity: 1,
            note: String::new(),
            selected_option,
        });
        Ok(())
    }

    /// Choose an option for a product
    ///
    /// Overwrites the choice on an existing line, or records it for the
    /// line to come, so both option-then-quantity and
    /// quantity-then-option orderings work.
    pub fn select_option(&mut self, product_id: &str, label: &str) -> Result<(), CartError> {
        self.ensure_mutable()?;
        if self.catalog.product(product_id).is_none() {
            return Err(CartError::UnknownProduct(product_id.to_string()));
        }
        let known = self
            .catalog
            .options_for(product_id)
            .iter()
            .any(|o| o.label == label);
        if !known {
            return Err(CartError::UnknownOption {
                product_id: product_id.to_string(),
                label: label.to_string(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.selected_option = Some(label.to_string());
        } else {
            self.pending_options
                .insert(product_id.to_string(), label.to_string());
        }
        Ok(())
    }

    /// Set the free-text note on an existing line; no-op without a line
    pub fn set_note(&mut self, product_id: &str, text: impl Into<String>) -> Result<(), CartError> {
        self.ensure_mutable()?;
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.note = text.into();
        }
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<(), CartError> {
        if self.submitting {
            return Err(CartError::SubmitInProgress);
        }
        Ok(())
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Submit the cart as an order
    ///
    /// Validates locally (no store calls on a validation failure), then
    /// inserts the header and the line items sequentially. Any store
    /// failure preserves the cart for an unmodified retry; a line-insert
    /// failure triggers a compensating delete of the header. Only a full
    /// success clears the cart, and the customer identity is retained
    /// for repeat orders.
    pub async fn submit(&mut self) -> Result<SubmitReceipt, SubmitError> {
        let stall_id = self.stall_id.clone().ok_or(SubmitError::MissingStall)?;
        if self.lines.is_empty() {
            return Err(SubmitError::EmptyCart);
        }
        if !self.customer.is_complete() {
            return Err(SubmitError::MissingCustomerInfo);
        }
        let missing: Vec<String> = self
            .lines
            .iter()
            .filter(|l| l.selected_option.is_none() && self.catalog.has_options(&l.product_id))
            .map(|l| l.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(SubmitError::MissingOptions { products: missing });
        }

        self.submitting = true;
        let result = self.persist(stall_id).await;
        self.submitting = false;

        if result.is_ok() {
            self.lines.clear();
            self.pending_options.clear();
        }
        result
    }

    async fn persist(&self, stall_id: String) -> Result<SubmitReceipt, SubmitError> {
        let header = OrderCreate {
            stall_id,
            customer_name: self.customer.name.trim().to_string(),
            location: self.customer.location.trim().to_string(),
            total: self.total(),
            status: OrderStatus::New,
        };

        let order: Order = self
            .store
            .create_order(&header)
            .await
            .map_err(SubmitError::CreateOrder)?;
        if order.id.trim().is_empty() {
            return Err(SubmitError::CreateOrder(StoreError::MissingOrderId));
        }

        let lines: Vec<OrderLineCreate> = self
            .lines
            .iter()
            .map(|l| OrderLineCreate {
                order_id: order.id.clone(),
                product_id: l.product_id.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
                notes: l.combined_notes(),
            })
            .collect();

        if let Err(e) = self.store.create_order_lines(&lines).await {
            tracing::warn!(
                order_id = %order.id,
                error = %e,
                "Line item insert failed, rolling back order header"
            );
            return match self.store.delete_order(&order.id).await {
                Ok(()) => Err(SubmitError::CreateLines(e)),
                Err(delete_err) => {
                    tracing::error!(
                        order_id = %order.id,
                        error = %delete_err,
                        "Compensating delete failed, order left without items"
                    );
                    Err(SubmitError::OrphanedOrder {
                        order_id: order.id,
                        source: e,
                    })
                }
            };
        }

        tracing::info!(
            order_id = %order.id,
            total = %header.total,
            location = %header.location,
            "Order submitted"
        );
        Ok(SubmitReceipt {
            order_id: order.id,
            total: header.total,
            customer_name: header.customer_name,
            location: header.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use shared::models::ProductOption;
    use std::sync::atomic::Ordering;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn product(id: &str, name: &str, price_cents: i64, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: dec(price_cents),
            category: category.to_string(),
            is_active: true,
        }
    }

    fn option(id: &str, product_id: &str, label: &str) -> ProductOption {
        ProductOption {
            id: id.to_string(),
            product_id: product_id.to_string(),
            label: label.to_string(),
            is_active: true,
        }
    }

    fn beach_menu() -> (Vec<Product>, Vec<ProductOption>) {
        (
            vec![
                product("p1", "Água", 500, "Bebidas"),
                product("p2", "Caipirinha", 1800, "Bebidas Alcoólicas"),
                product("p3", "Camarão", 3500, "Para Petiscar"),
            ],
            vec![
                option("o1", "p2", "Pequeno"),
                option("o2", "p2", "Grande"),
            ],
        )
    }

    async fn engine_with(
        products: Vec<Product>,
        options: Vec<ProductOption>,
    ) -> (Arc<MemoryStore>, CartEngine) {
        let store = Arc::new(
            MemoryStore::new()
                .with_products(products)
                .with_options(options),
        );
        let catalog = Arc::new(CatalogService::new(store.clone()));
        catalog.load(Some("stall-1")).await;
        let engine = CartEngine::new(store.clone(), catalog, Some("stall-1".to_string()));
        (store, engine)
    }

    async fn beach_engine() -> (Arc<MemoryStore>, CartEngine) {
        let (products, options) = beach_menu();
        engine_with(products, options).await
    }

    fn fill_customer(engine: &mut CartEngine) {
        engine.set_customer("Ana", "Guarda-sol 12");
    }

    // ========== quantity mechanics ==========

    #[tokio::test]
    async fn test_agua_scenario() {
        let (_, mut engine) = beach_engine().await;

        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p1", 1).unwrap();
        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.quantity_of("p1"), 2);
        assert_eq!(engine.total(), dec(1000));
        assert_eq!(engine.state(), CartState::Composing);

        engine.adjust_quantity("p1", -1).unwrap();
        engine.adjust_quantity("p1", -1).unwrap();
        assert!(engine.lines().is_empty());
        assert_eq!(engine.total(), dec(0));
        assert_eq!(engine.state(), CartState::Empty);
    }

    #[tokio::test]
    async fn test_quantity_folds_deltas_and_removes_at_zero() {
        let (_, mut engine) = beach_engine().await;

        for delta in [1, 1, 1, -1, 1] {
            engine.adjust_quantity("p1", delta).unwrap();
        }
        assert_eq!(engine.quantity_of("p1"), 3);

        // A delta that would go negative removes the line outright
        engine.adjust_quantity("p1", -5).unwrap();
        assert_eq!(engine.quantity_of("p1"), 0);
        assert!(engine.lines().is_empty());
    }

    #[tokio::test]
    async fn test_extreme_deltas_saturate_instead_of_overflowing() {
        let (_, mut engine) = beach_engine().await;

        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p1", i32::MAX).unwrap();
        assert_eq!(engine.quantity_of("p1"), i32::MAX);
        assert_eq!(engine.lines().len(), 1);

        // Saturating low still removes the line
        engine.adjust_quantity("p1", i32::MIN).unwrap();
        assert!(engine.lines().is_empty());
        assert_eq!(engine.total(), dec(0));
    }

    #[tokio::test]
    async fn test_negative_delta_without_line_is_noop() {
        let (_, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", -1).unwrap();
        engine.adjust_quantity("p1", 0).unwrap();
        assert!(engine.lines().is_empty());
    }

    #[tokio::test]
    async fn test_first_positive_delta_creates_quantity_one() {
        let (_, mut engine) = beach_engine().await;
        // The contract accepts any integer, but a new line always starts at 1
        engine.adjust_quantity("p1", 3).unwrap();
        assert_eq!(engine.quantity_of("p1"), 1);
    }

    #[tokio::test]
    async fn test_at_most_one_line_per_product() {
        let (_, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p3", 1).unwrap();
        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p1", 1).unwrap();

        assert_eq!(engine.lines().len(), 2);
        assert_eq!(engine.quantity_of("p1"), 3);
        assert_eq!(engine.quantity_of("p3"), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let (_, mut engine) = beach_engine().await;
        let result = engine.adjust_quantity("missing", 1);
        assert_eq!(result, Err(CartError::UnknownProduct("missing".to_string())));
    }

    #[tokio::test]
    async fn test_total_matches_independent_sum() {
        let (_, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p3", 1).unwrap();

        let expected: Decimal = engine
            .lines()
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(engine.total(), expected);
        assert_eq!(engine.total(), dec(4500));
    }

    // ========== options ==========

    #[tokio::test]
    async fn test_option_required_before_quantity() {
        let (_, mut engine) = beach_engine().await;

        let result = engine.adjust_quantity("p2", 1);
        assert_eq!(
            result,
            Err(CartError::OptionRequired("Caipirinha".to_string()))
        );
        assert!(engine.lines().is_empty());

        engine.select_option("p2", "Grande").unwrap();
        engine.adjust_quantity("p2", 1).unwrap();
        assert_eq!(engine.quantity_of("p2"), 1);
        assert_eq!(engine.selected_option_of("p2").as_deref(), Some("Grande"));
    }

    #[tokio::test]
    async fn test_option_then_quantity_and_quantity_then_option() {
        let (_, mut engine) = beach_engine().await;

        // Option first
        engine.select_option("p2", "Pequeno").unwrap();
        engine.adjust_quantity("p2", 1).unwrap();
        assert_eq!(engine.selected_option_of("p2").as_deref(), Some("Pequeno"));

        // Overwrite on the existing line
        engine.select_option("p2", "Grande").unwrap();
        assert_eq!(engine.selected_option_of("p2").as_deref(), Some("Grande"));
        assert_eq!(engine.lines().len(), 1);
    }

    #[tokio::test]
    async fn test_option_choice_survives_line_removal() {
        let (_, mut engine) = beach_engine().await;

        engine.select_option("p2", "Grande").unwrap();
        engine.adjust_quantity("p2", 1).unwrap();
        engine.adjust_quantity("p2", -1).unwrap();
        assert!(engine.lines().is_empty());

        // Re-adding does not ask for the option again
        engine.adjust_quantity("p2", 1).unwrap();
        assert_eq!(engine.selected_option_of("p2").as_deref(), Some("Grande"));
    }

    #[tokio::test]
    async fn test_unknown_option_rejected() {
        let (_, mut engine) = beach_engine().await;
        let result = engine.select_option("p2", "Médio");
        assert_eq!(
            result,
            Err(CartError::UnknownOption {
                product_id: "p2".to_string(),
                label: "Médio".to_string(),
            })
        );
        // Plain products have no options at all
        assert!(engine.select_option("p1", "Grande").is_err());
    }

    // ========== notes and filters ==========

    #[tokio::test]
    async fn test_note_on_existing_line_only() {
        let (_, mut engine) = beach_engine().await;

        engine.set_note("p1", "sem gelo").unwrap();
        assert!(engine.lines().is_empty());

        engine.adjust_quantity("p1", 1).unwrap();
        engine.set_note("p1", "sem gelo").unwrap();
        assert_eq!(engine.lines()[0].note, "sem gelo");

        // Quantity changes preserve the note
        engine.adjust_quantity("p1", 1).unwrap();
        assert_eq!(engine.lines()[0].note, "sem gelo");
    }

    #[tokio::test]
    async fn test_category_filter_view_only() {
        let (_, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();

        engine.select_category(CategoryFilter::category("Para Petiscar"));
        let view: Vec<_> = engine.filtered_products();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "p3");
        // Cart is untouched by filtering
        assert_eq!(engine.quantity_of("p1"), 1);

        engine.select_category(CategoryFilter::All);
        assert_eq!(engine.filtered_products().len(), 3);
    }

    #[tokio::test]
    async fn test_mutations_locked_while_submitting() {
        let (_, mut engine) = beach_engine().await;
        engine.select_option("p2", "Grande").unwrap();
        engine.adjust_quantity("p2", 1).unwrap();

        // A submit in flight gates every mutation
        engine.submitting = true;
        assert_eq!(engine.state(), CartState::Submitting);
        assert_eq!(
            engine.adjust_quantity("p2", 1),
            Err(CartError::SubmitInProgress)
        );
        assert_eq!(
            engine.select_option("p2", "Pequeno"),
            Err(CartError::SubmitInProgress)
        );
        assert_eq!(
            engine.set_note("p2", "sem gelo"),
            Err(CartError::SubmitInProgress)
        );

        // Cart untouched by the rejected mutations
        assert_eq!(engine.quantity_of("p2"), 1);
        assert_eq!(engine.selected_option_of("p2").as_deref(), Some("Grande"));
        assert_eq!(engine.lines()[0].note, "");

        engine.submitting = false;
        engine.adjust_quantity("p2", 1).unwrap();
        assert_eq!(engine.quantity_of("p2"), 2);
    }

    // ========== submission ==========

    #[tokio::test]
    async fn test_submit_rejects_blank_customer_without_store_calls() {
        let (store, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();
        engine.set_customer("", "Guarda-sol 12");

        let result = engine.submit().await;
        assert!(matches!(result, Err(SubmitError::MissingCustomerInfo)));
        assert!(result.unwrap_err().is_validation());
        assert_eq!(store.create_order_calls(), 0);
        assert_eq!(store.create_lines_calls(), 0);
        assert_eq!(engine.lines().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_cart_and_missing_stall() {
        let (store, mut engine) = beach_engine().await;
        fill_customer(&mut engine);
        assert!(matches!(engine.submit().await, Err(SubmitError::EmptyCart)));

        let (products, options) = beach_menu();
        let (_, mut unconfigured) = engine_with(products, options).await;
        // Same catalog, but the session lost its stall identity
        unconfigured.stall_id = None;
        unconfigured.adjust_quantity("p1", 1).unwrap();
        fill_customer(&mut unconfigured);
        assert!(matches!(
            unconfigured.submit().await,
            Err(SubmitError::MissingStall)
        ));
        assert_eq!(store.create_order_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_success_persists_header_and_lines() {
        let (store, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p1", 1).unwrap();
        engine.select_option("p2", "Grande").unwrap();
        engine.adjust_quantity("p2", 1).unwrap();
        engine.set_note("p2", "pouco açúcar").unwrap();
        fill_customer(&mut engine);

        let receipt = engine.submit().await.unwrap();
        assert_eq!(receipt.total, dec(2800));
        assert_eq!(receipt.location, "Guarda-sol 12");

        let orders = store.orders();
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.id, receipt.order_id);
        assert_eq!(order.stall_id, "stall-1");
        assert_eq!(order.customer_name, "Ana");
        assert_eq!(order.total, dec(2800));
        assert_eq!(order.status, OrderStatus::New);

        let lines = store.order_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.order_id == receipt.order_id));
        let agua = lines.iter().find(|l| l.product_id == "p1").unwrap();
        assert_eq!(agua.quantity, 2);
        assert_eq!(agua.unit_price, dec(500));
        assert_eq!(agua.notes, "");
        let caipirinha = lines.iter().find(|l| l.product_id == "p2").unwrap();
        assert_eq!(caipirinha.unit_price, dec(1800));
        assert_eq!(caipirinha.notes, "Grande - pouco açúcar");

        // Cart cleared, identity retained for repeat orders
        assert_eq!(engine.state(), CartState::Empty);
        assert_eq!(engine.total(), dec(0));
        assert!(engine.customer().is_complete());
        assert!(!engine.is_submitting());
    }

    #[tokio::test]
    async fn test_header_failure_preserves_cart_for_retry() {
        let (store, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();
        fill_customer(&mut engine);
        store.fail_create_order.store(true, Ordering::SeqCst);

        let result = engine.submit().await;
        assert!(matches!(result, Err(SubmitError::CreateOrder(_))));
        assert!(!result.unwrap_err().is_validation());
        assert_eq!(engine.lines().len(), 1);
        assert!(store.orders().is_empty());
        assert_eq!(store.create_lines_calls(), 0);

        // Unmodified retry succeeds
        store.fail_create_order.store(false, Ordering::SeqCst);
        let receipt = engine.submit().await.unwrap();
        assert_eq!(receipt.total, dec(500));
        assert_eq!(store.order_lines().len(), 1);
    }

    #[tokio::test]
    async fn test_line_failure_rolls_back_header_and_preserves_cart() {
        let (store, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();
        engine.adjust_quantity("p3", 1).unwrap();
        fill_customer(&mut engine);
        store.fail_create_lines.store(true, Ordering::SeqCst);

        let result = engine.submit().await;
        assert!(matches!(result, Err(SubmitError::CreateLines(_))));
        // Compensating delete removed the orphan header
        assert_eq!(store.delete_order_calls(), 1);
        assert!(store.orders().is_empty());
        assert!(store.order_lines().is_empty());
        assert_eq!(engine.lines().len(), 2);

        // Retry resubmits the identical line set
        store.fail_create_lines.store(false, Ordering::SeqCst);
        let receipt = engine.submit().await.unwrap();
        let lines = store.order_lines();
        assert_eq!(lines.len(), 2);
        let quantities: Vec<(String, i32)> = lines
            .iter()
            .map(|l| (l.product_id.clone(), l.quantity))
            .collect();
        assert!(quantities.contains(&("p1".to_string(), 1)));
        assert!(quantities.contains(&("p3".to_string(), 1)));
        assert_eq!(receipt.total, dec(4000));
    }

    #[tokio::test]
    async fn test_failed_compensation_reports_orphaned_order() {
        let (store, mut engine) = beach_engine().await;
        engine.adjust_quantity("p1", 1).unwrap();
        fill_customer(&mut engine);
        store.fail_create_lines.store(true, Ordering::SeqCst);
        store.fail_delete_order.store(true, Ordering::SeqCst);

        let result = engine.submit().await;
        let orders = store.orders();
        assert_eq!(orders.len(), 1);
        match result {
            Err(SubmitError::OrphanedOrder { order_id, .. }) => {
                assert_eq!(order_id, orders[0].id);
            }
            other => panic!("expected OrphanedOrder, got {other:?}"),
        }
        // Cart still preserved
        assert_eq!(engine.lines().len(), 1);
        assert!(!engine.is_submitting());
    }
}
