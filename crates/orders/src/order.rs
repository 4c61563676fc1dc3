use tracing::info;

use stocksync_core::{DomainError, DomainResult, OrderId};

/// Line item kind, as reported by the storefront.
///
/// Only physical lines move stock; digital goods, gift cards and custom
/// amounts are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemType {
    Physical,
    Other,
}

impl LineItemType {
    pub fn from_wire(value: &str) -> Self {
        if value.eq_ignore_ascii_case("PHYSICAL") {
            LineItemType::Physical
        } else {
            LineItemType::Other
        }
    }
}

/// Order line: SKU (possibly composite), quantity, kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    name: String,
    sku: String,
    quantity: u32,
    line_item_type: LineItemType,
}

impl OrderLine {
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        quantity: u32,
        line_item_type: LineItemType,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("line quantity must be positive"));
        }
        Ok(Self {
            name: name.into(),
            sku: sku.into(),
            quantity,
            line_item_type,
        })
    }

    /// Shorthand for a physical line, mostly useful in tests and fixtures.
    pub fn physical(sku: impl Into<String>, quantity: u32) -> DomainResult<Self> {
        let sku = sku.into();
        Self::new(sku.clone(), sku, quantity, LineItemType::Physical)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_item_type(&self) -> LineItemType {
        self.line_item_type
    }

    pub fn is_physical(&self) -> bool {
        self.line_item_type == LineItemType::Physical
    }
}

/// Paid order as needed for stock reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    order_id: OrderId,
    buyer_first_name: String,
    buyer_last_name: String,
    lines: Vec<OrderLine>,
}

impl OrderDetails {
    pub fn new(
        order_id: OrderId,
        buyer_first_name: impl Into<String>,
        buyer_last_name: impl Into<String>,
        lines: Vec<OrderLine>,
    ) -> Self {
        Self {
            order_id,
            buyer_first_name: buyer_first_name.into(),
            buyer_last_name: buyer_last_name.into(),
            lines,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// `First Last`, as shown in reports.
    pub fn buyer_name(&self) -> String {
        format!("{} {}", self.buyer_first_name, self.buyer_last_name)
            .trim()
            .to_string()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Lines that move stock. Skipped lines are logged.
    pub fn physical_lines(&self) -> impl Iterator<Item = &OrderLine> {
        let order_id = self.order_id;
        self.lines.iter().filter(move |line| {
            if !line.is_physical() {
                info!(
                    order_id = %order_id,
                    line = %line.name(),
                    "not a physical product; skipping"
                );
            }
            line.is_physical()
        })
    }
}
