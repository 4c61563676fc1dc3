//! Wix Stores REST adapter.
//!
//! One client implements the catalog, order and inventory contracts. Each call
//! is a single request; nothing is retried.

pub mod dto;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use stocksync_catalog::{CatalogError, CatalogProduct, CatalogSource};
use stocksync_core::{OrderId, ProductId, VariantId};
use stocksync_inventory::{InventoryError, InventoryService};
use stocksync_orders::{OrderDetails, OrderError, OrderSource};

use crate::config::{ApiKey, WixConfig};
use dto::{DecrementRequest, OrderResponse, PRODUCT_PAGE_LIMIT, ProductsQueryRequest, ProductsQueryResponse};

const SITE_ID_HEADER: &str = "wix-site-id";

#[derive(Debug, Error)]
pub enum WixError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<WixError> for CatalogError {
    fn from(value: WixError) -> Self {
        match value {
            WixError::Parse(msg) => CatalogError::Decode(msg),
            other => CatalogError::Remote(other.to_string()),
        }
    }
}

impl From<WixError> for InventoryError {
    fn from(value: WixError) -> Self {
        match value {
            WixError::Api { status, .. } => InventoryError::Rejected { status },
            other => InventoryError::Transport(other.to_string()),
        }
    }
}

fn order_error(order_id: OrderId, error: WixError) -> OrderError {
    match error {
        WixError::Api { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            OrderError::NotFound(order_id)
        }
        WixError::Parse(msg) => OrderError::Decode(msg),
        other => OrderError::Remote(other.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct WixClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    site_id: String,
}

impl WixClient {
    pub fn new(config: &WixConfig, timeout: Duration) -> Result<Self, WixError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WixError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            site_id: config.site_id.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(AUTHORIZATION, self.api_key.expose())
            .header(SITE_ID_HEADER, &self.site_id)
    }

    async fn send(&self, req: RequestBuilder) -> Result<reqwest::Response, WixError> {
        let resp = req.send().await.map_err(|e| WixError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(WixError::Api {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, WixError> {
        self.send(req)
            .await?
            .json()
            .await
            .map_err(|e| WixError::Parse(e.to_string()))
    }

    /// Full product catalog with variants, hidden products included.
    pub async fn query_products(&self) -> Result<Vec<CatalogProduct>, WixError> {
        let req = self
            .request(Method::POST, "v1/products/query")
            .json(&ProductsQueryRequest::full_catalog());
        let response: ProductsQueryResponse = self.send_json(req).await?;

        if let Some(total) = response.total_results {
            if total > u64::from(PRODUCT_PAGE_LIMIT) {
                warn!(
                    total_results = total,
                    fetched = response.products.len(),
                    "catalog has more products than one page; the rest are not indexed"
                );
            }
        }
        debug!(products = response.products.len(), "fetched catalog");

        Ok(response.products)
    }

    pub async fn get_order(&self, order_id: OrderId) -> Result<OrderResponse, WixError> {
        let req = self.request(Method::GET, &format!("v2/orders/{order_id}"));
        self.send_json(req).await
    }

    pub async fn decrement_inventory(
        &self,
        product_id: ProductId,
        variant_id: VariantId,
        quantity: u32,
    ) -> Result<(), WixError> {
        let req = self
            .request(Method::POST, "v2/inventoryItems/decrement")
            .json(&DecrementRequest::single(product_id, variant_id, quantity));
        self.send(req).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for WixClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogProduct>, CatalogError> {
        Ok(self.query_products().await?)
    }
}

#[async_trait]
impl OrderSource for WixClient {
    async fn fetch_order(&self, order_id: OrderId) -> Result<OrderDetails, OrderError> {
        let response = self
            .get_order(order_id)
            .await
            .map_err(|e| order_error(order_id, e))?;
        Ok(response.order.into_details(order_id)?)
    }
}

#[async_trait]
impl InventoryService for WixClient {
    async fn decrement(
        &self,
        product_id: ProductId,
        variant_id: VariantId,
        quantity: u32,
    ) -> Result<(), InventoryError> {
        Ok(self
            .decrement_inventory(product_id, variant_id, quantity)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn config() -> WixConfig {
        WixConfig {
            api_key: ApiKey::new("key"),
            site_id: "site".to_string(),
            base_url: "https://www.wixapis.com/stores/".to_string(),
        }
    }

    #[test]
    fn endpoint_urls_are_joined_onto_base() {
        let client = WixClient::new(&config(), Duration::from_secs(5)).unwrap();

        assert_eq!(
            client.url("v1/products/query"),
            "https://www.wixapis.com/stores/v1/products/query"
        );
    }

    #[test]
    fn requests_carry_auth_and_site_headers() {
        let client = WixClient::new(&config(), Duration::from_secs(5)).unwrap();

        let req = client.request(Method::GET, "v2/orders/1").build().unwrap();

        assert_eq!(req.headers()[AUTHORIZATION], "key");
        assert_eq!(req.headers()[SITE_ID_HEADER], "site");
        assert_eq!(req.url().as_str(), "https://www.wixapis.com/stores/v2/orders/1");
    }

    #[test]
    fn api_errors_map_to_inventory_rejection() {
        let err: InventoryError = WixError::Api {
            status: 400,
            body: "bad".to_string(),
        }
        .into();
        assert_eq!(err, InventoryError::Rejected { status: 400 });

        let err: InventoryError = WixError::Network("timeout".to_string()).into();
        assert!(matches!(err, InventoryError::Transport(_)));
    }

    #[test]
    fn missing_order_maps_to_not_found() {
        let order_id = OrderId::from_uuid(Uuid::from_u128(3));
        let err = order_error(
            order_id,
            WixError::Api {
                status: 404,
                body: String::new(),
            },
        );

        match err {
            OrderError::NotFound(id) => assert_eq!(id, order_id),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn parse_errors_map_to_decode() {
        let err: CatalogError = WixError::Parse("bad json".to_string()).into();
        assert!(matches!(err, CatalogError::Decode(_)));

        let err = order_error(
            OrderId::from_uuid(Uuid::from_u128(1)),
            WixError::Parse("bad json".to_string()),
        );
        assert!(matches!(err, OrderError::Decode(_)));
    }
}
