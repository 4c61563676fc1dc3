//! Catalog snapshot records, as returned by the storefront's product query.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use stocksync_core::{ProductId, VariantId};

/// One product of a catalog snapshot (plain product or variant-managing product).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub sku: String,
    #[serde(default)]
    pub manage_variants: bool,
    #[serde(default)]
    pub stock: StockInfo,
    #[serde(default)]
    pub variants: Vec<CatalogVariant>,
}

/// One option combination of a variant-managing product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVariant {
    pub id: VariantId,
    /// Choice labels in the storefront's option order (e.g. `["Matte Black"]`).
    #[serde(default, deserialize_with = "choice_labels")]
    pub choices: Vec<String>,
    #[serde(default)]
    pub variant: VariantDetails,
    #[serde(default)]
    pub stock: StockInfo,
}

impl CatalogVariant {
    pub fn sku(&self) -> &str {
        &self.variant.sku
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetails {
    #[serde(default, deserialize_with = "string_or_null")]
    pub sku: String,
}

/// Stock tracking info attached to products and variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    #[serde(default)]
    pub track_inventory: bool,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Catalog fetch failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Remote(String),

    #[error("catalog response could not be decoded: {0}")]
    Decode(String),
}

/// Source of full catalog snapshots (variants and hidden products included).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogProduct>, CatalogError>;
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn choice_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let choices = Option::<Map<String, JsonValue>>::deserialize(deserializer)?;
    Ok(choices
        .into_iter()
        .flatten()
        .map(|(_, label)| match label {
            JsonValue::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}
