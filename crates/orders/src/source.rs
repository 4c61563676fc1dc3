use async_trait::async_trait;
use thiserror::Error;

use stocksync_core::{DomainError, OrderId};

use crate::order::OrderDetails;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error("order request failed: {0}")]
    Remote(String),

    #[error("order response could not be decoded: {0}")]
    Decode(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Source of order details (buyer and line items).
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_order(&self, order_id: OrderId) -> Result<OrderDetails, OrderError>;
}
