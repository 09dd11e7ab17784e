//! PostgREST store client
//!
//! Talks to a Supabase-style store over its REST surface. Reads filter
//! server-side on stall and active flag; the header insert asks for the
//! created row back (`Prefer: return=representation`) so the generated
//! identifier reaches the engine.

use super::{MenuStore, StoreError, StoreResult};
use crate::core::Config;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use shared::models::{Order, OrderCreate, OrderLineCreate, Product, ProductOption};
use std::time::Duration;

const PRODUCTS_TABLE: &str = "products";
const OPTIONS_TABLE: &str = "product_options";
const ORDERS_TABLE: &str = "orders";
const ORDER_ITEMS_TABLE: &str = "order_items";

/// Supabase/PostgREST store client
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseStore {
    /// Build a client for the configured store
    pub fn new(config: &Config) -> StoreResult<Self> {
        let mut headers = HeaderMap::new();
        if !config.store_api_key.is_empty() {
            let mut api_key = HeaderValue::from_str(&config.store_api_key)
                .map_err(|_| StoreError::Config("api key is not a valid header value".into()))?;
            api_key.set_sensitive(true);
            headers.insert("apikey", api_key);

            let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.store_api_key))
                .map_err(|_| StoreError::Config("api key is not a valid header value".into()))?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.store_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Map non-2xx responses to [`StoreError::Status`] with the body text
    async fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl MenuStore for SupabaseStore {
    async fn fetch_products(&self, stall_id: &str) -> StoreResult<Vec<Product>> {
        let response = self
            .client
            .get(self.table_url(PRODUCTS_TABLE))
            .query(&[
                ("select", "*".to_string()),
                ("stall_id", format!("eq.{stall_id}")),
                ("is_active", "eq.true".to_string()),
            ])
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn fetch_options(&self, stall_id: &str) -> StoreResult<Vec<ProductOption>> {
        let response = self
            .client
            .get(self.table_url(OPTIONS_TABLE))
            .query(&[
                ("select", "*".to_string()),
                ("stall_id", format!("eq.{stall_id}")),
                ("is_active", "eq.true".to_string()),
            ])
            .send()
            .await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn create_order(&self, order: &OrderCreate) -> StoreResult<Order> {
        let response = self
            .client
            .post(self.table_url(ORDERS_TABLE))
            .header("Prefer", "return=representation")
            .json(&[order])
            .send()
            .await?;
        let response = Self::check(response).await?;
        let mut rows: Vec<Order> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        let order = rows.pop().ok_or(StoreError::MissingOrderId)?;
        if order.id.trim().is_empty() {
            return Err(StoreError::MissingOrderId);
        }
        Ok(order)
    }

    async fn create_order_lines(&self, lines: &[OrderLineCreate]) -> StoreResult<()> {
        let response = self
            .client
            .post(self.table_url(ORDER_ITEMS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&lines)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_order(&self, order_id: &str) -> StoreResult<()> {
        let response = self
            .client
            .delete(self.table_url(ORDERS_TABLE))
            .query(&[("id", format!("eq.{order_id}"))])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
