use async_trait::async_trait;
use thiserror::Error;

use stocksync_core::{ProductId, VariantId};

/// Decrement failure. Both kinds are per-unit and never abort a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The service answered with a non-OK status.
    #[error("inventory service rejected decrement (status {status})")]
    Rejected { status: u16 },

    /// The request never got an answer (connection, timeout, ...).
    #[error("inventory request failed: {0}")]
    Transport(String),
}

/// Remote stock counters.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Take `quantity` off the stock of one product/variant.
    ///
    /// Plain products are addressed with [`VariantId::NONE`].
    async fn decrement(
        &self,
        product_id: ProductId,
        variant_id: VariantId,
        quantity: u32,
    ) -> Result<(), InventoryError>;
}
