//! Catalog module: SKU index and SKU resolution.
//!
//! Builds the SKU → product/variant index from a storefront catalog snapshot and
//! resolves order SKUs (exact, substituted, composite, bundled) against it.
//! Deterministic domain logic; the snapshot comes from a `CatalogSource`.

pub mod entry;
pub mod index;
pub mod resolver;
pub mod rules;
pub mod snapshot;

pub use entry::{CatalogEntry, VariantSelection};
pub use index::{COMPOSITE_DELIMITER, CatalogIndex};
pub use resolver::{ResolveError, ResolvedUnit, SkuResolver};
pub use rules::{RulesError, SkuRules};
pub use snapshot::{
    CatalogError, CatalogProduct, CatalogSource, CatalogVariant, StockInfo, VariantDetails,
};
