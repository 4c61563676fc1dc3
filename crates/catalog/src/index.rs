//! SKU → catalog entry index, built once per run from a catalog snapshot.
//!
//! Dash-containing SKUs are reserved for composite bundle encoding on order
//! lines, so they are never used as lookup keys. A variant product with even
//! one dashed variant SKU is treated as composite-only and contributes nothing.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::entry::CatalogEntry;
use crate::snapshot::CatalogProduct;

/// Delimiter between the parts of a composite SKU.
pub const COMPOSITE_DELIMITER: char = '-';

#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: HashMap<String, CatalogEntry>,
}

impl CatalogIndex {
    /// Build the index from a catalog snapshot. Never fails; unusable
    /// products are skipped with a warning.
    pub fn build<'a>(products: impl IntoIterator<Item = &'a CatalogProduct>) -> Self {
        let mut index = Self::default();
        for product in products {
            index.add_product(product);
        }
        debug!(entries = index.len(), "built SKU index");
        index
    }

    pub fn get(&self, sku: &str) -> Option<&CatalogEntry> {
        self.entries.get(sku)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.entries.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn add_product(&mut self, product: &CatalogProduct) {
        if product.manage_variants {
            let composite = product
                .variants
                .iter()
                .any(|v| v.sku().contains(COMPOSITE_DELIMITER));
            if composite {
                debug!(product = %product.name, "composite bundle product; variants not indexed");
                return;
            }

            for variant in &product.variants {
                if variant.sku().is_empty() {
                    warn!(
                        product = %product.name,
                        variant_id = %variant.id,
                        "variant has no sku"
                    );
                    continue;
                }
                self.insert(
                    variant.sku(),
                    CatalogEntry::variant(
                        product.name.clone(),
                        product.id,
                        variant.id,
                        variant.choices.clone(),
                    ),
                );
            }
        } else if is_lookup_sku(&product.sku) {
            self.insert(
                &product.sku,
                CatalogEntry::product(product.name.clone(), product.id),
            );
        } else {
            warn!(product = %product.name, sku = %product.sku, "product has no usable sku");
        }
    }

    fn insert(&mut self, sku: &str, entry: CatalogEntry) {
        if let Some(previous) = self.entries.insert(sku.to_string(), entry) {
            let current = &self.entries[sku];
            warn!(
                sku,
                previous = %previous.display_name(),
                current = %current.display_name(),
                "duplicate sku in catalog; keeping the last entry"
            );
        }
    }
}

fn is_lookup_sku(sku: &str) -> bool {
    !sku.is_empty() && !sku.contains(COMPOSITE_DELIMITER)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use stocksync_core::{ProductId, VariantId};
    use uuid::Uuid;

    use crate::snapshot::{CatalogProduct, CatalogVariant, StockInfo, VariantDetails};

    pub fn product_id(n: u128) -> ProductId {
        ProductId::from_uuid(Uuid::from_u128(n))
    }

    pub fn variant_id(n: u128) -> VariantId {
        VariantId::from_uuid(Uuid::from_u128(n))
    }

    pub fn plain(n: u128, name: &str, sku: &str) -> CatalogProduct {
        CatalogProduct {
            id: product_id(n),
            name: name.to_string(),
            sku: sku.to_string(),
            manage_variants: false,
            stock: StockInfo::default(),
            variants: Vec::new(),
        }
    }

    pub fn with_variants(n: u128, name: &str, variants: &[(&str, &str)]) -> CatalogProduct {
        CatalogProduct {
            id: product_id(n),
            name: name.to_string(),
            sku: String::new(),
            manage_variants: true,
            stock: StockInfo::default(),
            variants: variants
                .iter()
                .enumerate()
                .map(|(i, (sku, label))| CatalogVariant {
                    id: variant_id(n * 1000 + i as u128),
                    choices: vec![label.to_string()],
                    variant: VariantDetails {
                        sku: sku.to_string(),
                    },
                    stock: StockInfo::default(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn plain_product_is_indexed_by_its_own_sku() {
        let catalog = vec![plain(1, "Lens cloth", "111")];
        let index = CatalogIndex::build(&catalog);

        let entry = index.get("111").unwrap();
        assert_eq!(entry.name(), "Lens cloth");
        assert_eq!(entry.product_id(), product_id(1));
        assert_eq!(entry.variant_id(), None);
        assert_eq!(entry.choice_labels(), None);
    }

    #[test]
    fn variants_are_indexed_individually() {
        let catalog = vec![with_variants(
            2,
            "VUORI FRAME",
            &[("6095926198102", "Glossy White"), ("6095927077093", "Matte Black")],
        )];
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.len(), 2);
        let entry = index.get("6095927077093").unwrap();
        assert_eq!(entry.variant_id(), Some(variant_id(2001)));
        assert_eq!(entry.choice_label().as_deref(), Some("Matte Black"));
    }

    #[test]
    fn one_dashed_variant_suppresses_the_whole_product() {
        let catalog = vec![with_variants(
            3,
            "SELVA goggle",
            &[("6095936367383", "Frame"), ("6095936367383-6095946877810", "Bundle")],
        )];
        let index = CatalogIndex::build(&catalog);

        assert!(index.is_empty());
    }

    #[test]
    fn products_without_usable_sku_are_skipped() {
        let catalog = vec![
            plain(4, "Gift card", ""),
            plain(5, "Bundle", "111-222"),
            plain(6, "Case", "333"),
        ];
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.len(), 1);
        assert!(index.contains("333"));
    }

    #[test]
    fn empty_variant_skus_are_not_indexed() {
        let catalog = vec![with_variants(7, "Strap", &[("", "Red"), ("444", "Blue")])];
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.skus().collect::<Vec<_>>(), vec!["444"]);
    }

    #[test]
    fn duplicate_sku_keeps_the_last_entry() {
        let catalog = vec![plain(8, "First", "555"), plain(9, "Second", "555")];
        let index = CatalogIndex::build(&catalog);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("555").unwrap().name(), "Second");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a product with any dashed variant sku contributes no entries.
            #[test]
            fn dashed_variant_products_contribute_nothing(
                plain_skus in proptest::collection::vec("[0-9]{3,13}", 0..6),
                dashed in "[0-9]{3,13}-[0-9]{3,13}",
                position in 0usize..6,
            ) {
                let mut variants: Vec<(String, String)> = plain_skus
                    .iter()
                    .map(|s| (s.clone(), "Label".to_string()))
                    .collect();
                let at = position.min(variants.len());
                variants.insert(at, (dashed, "Bundle".to_string()));
                let borrowed: Vec<(&str, &str)> = variants
                    .iter()
                    .map(|(s, l)| (s.as_str(), l.as_str()))
                    .collect();

                let catalog = vec![with_variants(10, "Composite", &borrowed)];
                let index = CatalogIndex::build(&catalog);

                prop_assert!(index.is_empty());
            }
        }
    }
}
