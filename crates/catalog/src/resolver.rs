//! SKU resolution: exact lookup, substitution, composite expansion and
//! accessory bundling.
//!
//! ```text
//! "SELVA-6095946877810-6095946877810"  x2
//!   split on '-'
//!   "SELVA"          -> substitution -> frame entry  (+ accessory lens first, if keyed)
//!   "6095946877810"  -> lens entry
//!   "6095946877810"  -> lens entry
//!   every unit at quantity 2
//! ```

use thiserror::Error;
use tracing::{debug, error, warn};

use stocksync_orders::{OrderDetails, OrderLine};

use crate::entry::CatalogEntry;
use crate::index::{COMPOSITE_DELIMITER, CatalogIndex};
use crate::rules::SkuRules;
use crate::snapshot::{CatalogError, CatalogSource};

/// A catalog entry and the quantity to take off its stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUnit {
    pub entry: CatalogEntry,
    pub quantity: u32,
}

impl ResolvedUnit {
    pub fn new(entry: CatalogEntry, quantity: u32) -> Self {
        Self { entry, quantity }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("sku {0} not found in catalog")]
    NotFound(String),

    /// The substitution table points at a SKU the catalog does not have.
    #[error("sku {alias} substitutes to {target}, which is not in the catalog")]
    DanglingSubstitution { alias: String, target: String },
}

/// Resolves order SKUs against a catalog index using injected rules.
#[derive(Debug, Clone)]
pub struct SkuResolver {
    index: CatalogIndex,
    rules: SkuRules,
}

impl SkuResolver {
    pub fn new(index: CatalogIndex, rules: SkuRules) -> Self {
        for (alias, target) in rules.substitutions() {
            if !index.contains(target) {
                warn!(alias, target, "substitution target missing from catalog");
            }
        }
        for (trigger, accessory) in rules.accessories() {
            if !index.contains(accessory) {
                warn!(trigger, accessory, "accessory sku missing from catalog");
            }
        }
        Self { index, rules }
    }

    /// Fetch a catalog snapshot and build the resolver from it.
    ///
    /// A failed fetch is returned as an error; there is no partially built resolver.
    pub async fn load<S>(source: &S, rules: SkuRules) -> Result<Self, CatalogError>
    where
        S: CatalogSource + ?Sized,
    {
        let products = source.fetch_catalog().await?;
        let index = CatalogIndex::build(&products);
        Ok(Self::new(index, rules))
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn rules(&self) -> &SkuRules {
        &self.rules
    }

    /// Resolve a single (non-composite) SKU.
    pub fn resolve(&self, sku: &str) -> Result<&CatalogEntry, ResolveError> {
        if let Some(entry) = self.index.get(sku) {
            return Ok(entry);
        }

        if let Some(target) = self.rules.substitution(sku) {
            return match self.index.get(target) {
                Some(entry) => {
                    debug!(sku, target, "resolved sku through substitution");
                    Ok(entry)
                }
                None => {
                    error!(sku, target, "substitution target not found in sku mapping");
                    Err(ResolveError::DanglingSubstitution {
                        alias: sku.to_string(),
                        target: target.to_string(),
                    })
                }
            };
        }

        error!(sku, "sku not found in sku mapping");
        Err(ResolveError::NotFound(sku.to_string()))
    }

    /// Expand one order line into the units it consumes.
    ///
    /// Every part of a composite SKU is one full unit at the line quantity.
    /// Unresolvable parts are logged and skipped; the rest of the line still
    /// resolves.
    pub fn expand_order_line(&self, line: &OrderLine) -> Vec<ResolvedUnit> {
        let quantity = line.quantity();
        let mut units = Vec::new();

        for part in line.sku().split(COMPOSITE_DELIMITER) {
            if part.is_empty() {
                warn!(sku = %line.sku(), "empty part in composite sku");
                continue;
            }

            let entry = match self.resolve(part) {
                Ok(entry) => entry,
                Err(e) => {
                    error!(sku = part, line = %line.sku(), error = %e, "failed to get product details for sku");
                    continue;
                }
            };

            if let Some(accessory_sku) = self.rules.accessory(part) {
                match self.resolve(accessory_sku) {
                    Ok(accessory) => units.push(ResolvedUnit::new(accessory.clone(), quantity)),
                    Err(e) => {
                        error!(
                            sku = part,
                            accessory = accessory_sku,
                            error = %e,
                            "failed to resolve bundled accessory"
                        );
                    }
                }
            }

            units.push(ResolvedUnit::new(entry.clone(), quantity));
        }

        units
    }

    /// Expand every physical line of an order, in line order.
    pub fn expand_order(&self, order: &OrderDetails) -> Vec<ResolvedUnit> {
        order
            .physical_lines()
            .flat_map(|line| self.expand_order_line(line))
            .collect()
    }
}
