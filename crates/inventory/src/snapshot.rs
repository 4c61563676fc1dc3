//! Stock levels of every tracked product/variant, taken from a catalog snapshot.

use chrono::{DateTime, Utc};

use stocksync_catalog::CatalogProduct;

/// Below this many units an item is reported as low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevelKind {
    InStock,
    Low,
    OutOfStock,
}

impl StockLevelKind {
    /// Zero (or oversold, negative) stock is out of stock; `0 < q < threshold`
    /// is low. Untracked quantities count as in stock.
    pub fn classify(quantity: Option<i64>, low_threshold: i64) -> Self {
        match quantity {
            Some(q) if q <= 0 => StockLevelKind::OutOfStock,
            Some(q) if q < low_threshold => StockLevelKind::Low,
            _ => StockLevelKind::InStock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevel {
    pub product_name: String,
    /// Choice labels joined with `-`; empty for plain products.
    pub variant_label: String,
    pub sku: String,
    pub quantity: Option<i64>,
    pub level: StockLevelKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockSnapshot {
    taken_at: DateTime<Utc>,
    rows: Vec<StockLevel>,
}

impl StockSnapshot {
    /// Collect stock levels for products with inventory tracking enabled.
    ///
    /// Variant products list every variant that has a SKU; plain products list
    /// one row.
    pub fn from_catalog<'a>(
        products: impl IntoIterator<Item = &'a CatalogProduct>,
        low_threshold: i64,
        taken_at: DateTime<Utc>,
    ) -> Self {
        let mut rows = Vec::new();

        for product in products {
            if !product.stock.track_inventory {
                continue;
            }

            if product.manage_variants {
                for variant in product.variants.iter().filter(|v| !v.sku().is_empty()) {
                    rows.push(StockLevel {
                        product_name: product.name.clone(),
                        variant_label: variant.choices.join("-"),
                        sku: variant.sku().to_string(),
                        quantity: variant.stock.quantity,
                        level: StockLevelKind::classify(variant.stock.quantity, low_threshold),
                    });
                }
            } else {
                rows.push(StockLevel {
                    product_name: product.name.clone(),
                    variant_label: String::new(),
                    sku: product.sku.clone(),
                    quantity: product.stock.quantity,
                    level: StockLevelKind::classify(product.stock.quantity, low_threshold),
                });
            }
        }

        Self { taken_at, rows }
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub fn rows(&self) -> &[StockLevel] {
        &self.rows
    }

    /// Rows that need attention (low or out of stock), in catalog order.
    pub fn alerts(&self) -> impl Iterator<Item = &StockLevel> {
        self.rows
            .iter()
            .filter(|row| row.level != StockLevelKind::InStock)
    }
}
