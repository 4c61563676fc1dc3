//! Orders module.
//!
//! Paid storefront orders as seen by stock reconciliation: buyer and line items.
//! Pure data plus the `OrderSource` contract (no IO here).

pub mod order;
pub mod source;

pub use order::{LineItemType, OrderDetails, OrderLine};
pub use source::{OrderError, OrderSource};
