//! Wire shapes of the Wix Stores endpoints the adapter uses.

use serde::{Deserialize, Serialize};

use stocksync_catalog::CatalogProduct;
use stocksync_core::{DomainResult, OrderId, ProductId, VariantId};
use stocksync_orders::{LineItemType, OrderDetails, OrderLine};

/// Wix caps one products query at 100 results.
pub const PRODUCT_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQueryRequest {
    query: ProductQuery,
    include_variants: bool,
    include_hidden_products: bool,
}

#[derive(Debug, Serialize)]
struct ProductQuery {
    paging: Paging,
}

#[derive(Debug, Serialize)]
struct Paging {
    limit: u32,
}

impl ProductsQueryRequest {
    /// First page of the full catalog, variants and hidden products included.
    pub fn full_catalog() -> Self {
        Self {
            query: ProductQuery {
                paging: Paging {
                    limit: PRODUCT_PAGE_LIMIT,
                },
            },
            include_variants: true,
            include_hidden_products: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQueryResponse {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub order: WixOrder,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WixOrder {
    #[serde(default)]
    pub buyer_info: BuyerInfo,
    #[serde(default)]
    pub line_items: Vec<WixLineItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInfo {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WixLineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub line_item_type: Option<String>,
}

impl WixOrder {
    pub fn into_details(self, order_id: OrderId) -> DomainResult<OrderDetails> {
        let lines = self
            .line_items
            .into_iter()
            .map(|item| {
                let kind = LineItemType::from_wire(item.line_item_type.as_deref().unwrap_or_default());
                OrderLine::new(item.name, item.sku.unwrap_or_default(), item.quantity, kind)
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(OrderDetails::new(
            order_id,
            self.buyer_info.first_name.unwrap_or_default(),
            self.buyer_info.last_name.unwrap_or_default(),
            lines,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecrementRequest {
    decrement_data: Vec<DecrementData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecrementData {
    product_id: ProductId,
    variant_id: VariantId,
    decrement_by: u32,
}

impl DecrementRequest {
    pub fn single(product_id: ProductId, variant_id: VariantId, quantity: u32) -> Self {
        Self {
            decrement_data: vec![DecrementData {
                product_id,
                variant_id,
                decrement_by: quantity,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stocksync_core::DomainError;
    use uuid::Uuid;

    #[test]
    fn products_query_body_matches_wire_format() {
        let body = serde_json::to_value(ProductsQueryRequest::full_catalog()).unwrap();

        assert_eq!(
            body,
            json!({
                "query": {"paging": {"limit": 100}},
                "includeVariants": true,
                "includeHiddenProducts": true
            })
        );
    }

    #[test]
    fn decrement_body_uses_nil_variant_for_plain_products() {
        let product_id = ProductId::from_uuid(Uuid::from_u128(7));
        let body = serde_json::to_value(DecrementRequest::single(product_id, VariantId::NONE, 3)).unwrap();

        assert_eq!(
            body,
            json!({
                "decrementData": [{
                    "productId": product_id.to_string(),
                    "variantId": "00000000-0000-0000-0000-000000000000",
                    "decrementBy": 3
                }]
            })
        );
    }

    #[test]
    fn products_response_parses_products_and_total() {
        let raw = json!({
            "products": [{
                "id": "9b2a1c6e-0000-0000-0000-000000000001",
                "name": "Lens cloth",
                "sku": "111",
                "manageVariants": false,
                "stock": {"trackInventory": true, "quantity": 12, "inStock": true},
                "ribbon": "new"
            }],
            "metadata": {"items": 1, "offset": 0},
            "totalResults": 1
        });

        let response: ProductsQueryResponse = serde_json::from_value(raw).unwrap();

        assert_eq!(response.total_results, Some(1));
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].sku, "111");
        assert_eq!(response.products[0].stock.quantity, Some(12));
    }

    #[test]
    fn order_response_converts_to_order_details() {
        let order_id = OrderId::from_uuid(Uuid::from_u128(5));
        let raw = json!({
            "order": {
                "id": order_id.to_string(),
                "buyerInfo": {"firstName": "Jane", "lastName": "Doe", "email": "jane@example.com"},
                "lineItems": [
                    {"name": "VUORI FRAME", "sku": "6095927077093-6095950193135", "quantity": 2, "lineItemType": "PHYSICAL"},
                    {"name": "Gift card", "quantity": 1, "lineItemType": "GIFT_CARD"}
                ]
            }
        });

        let response: OrderResponse = serde_json::from_value(raw).unwrap();
        let details = response.order.into_details(order_id).unwrap();

        assert_eq!(details.order_id(), order_id);
        assert_eq!(details.buyer_name(), "Jane Doe");
        assert_eq!(details.lines().len(), 2);
        assert_eq!(details.lines()[0].sku(), "6095927077093-6095950193135");
        assert!(details.lines()[0].is_physical());
        assert_eq!(details.lines()[1].sku(), "");
        assert!(!details.lines()[1].is_physical());
    }

    #[test]
    fn zero_quantity_line_is_a_validation_error() {
        let raw = json!({
            "order": {"lineItems": [{"name": "X", "sku": "1", "quantity": 0, "lineItemType": "PHYSICAL"}]}
        });

        let response: OrderResponse = serde_json::from_value(raw).unwrap();

        match response.order.into_details(OrderId::from_uuid(Uuid::from_u128(1))) {
            Err(DomainError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
