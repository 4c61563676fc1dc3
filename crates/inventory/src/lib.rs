//! Inventory module.
//!
//! Applies resolved order units to the remote stock counters and records the
//! per-unit outcome; also derives stock-level snapshots from the catalog.
//! The remote side is the `InventoryService` contract (no HTTP here).

pub mod reconcile;
pub mod service;
pub mod snapshot;

pub use reconcile::{InventoryReconciler, ReconcileStatus, ReconciliationResult, UnitOutcome};
pub use service::{InventoryError, InventoryService};
pub use snapshot::{DEFAULT_LOW_STOCK_THRESHOLD, StockLevel, StockLevelKind, StockSnapshot};
