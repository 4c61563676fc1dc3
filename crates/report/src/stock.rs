//! Stock report: a CSV of every tracked item plus an alert email body.

use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;

use stocksync_inventory::{StockLevelKind, StockSnapshot};

use crate::html::escape_html;

pub const STOCK_REPORT_SUBJECT: &str = "Stock Report";
pub const STOCK_CSV_FILENAME: &str = "stock.csv";

#[derive(Debug, Error)]
pub enum StockReportError {
    #[error("failed to write stock CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finish stock CSV: {0}")]
    Flush(String),
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Product Name")]
    product_name: &'a str,
    #[serde(rename = "Variant")]
    variant: &'a str,
    #[serde(rename = "Stock")]
    stock: Option<i64>,
}

/// Render the snapshot as CSV with a `Product Name,Variant,Stock` header.
///
/// Untracked quantities are written as an empty cell.
pub fn render_csv(snapshot: &StockSnapshot) -> Result<Vec<u8>, StockReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if snapshot.rows().is_empty() {
        writer.write_record(["Product Name", "Variant", "Stock"])?;
    }
    for row in snapshot.rows() {
        writer.serialize(CsvRow {
            product_name: &row.product_name,
            variant: &row.variant_label,
            stock: row.quantity,
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| StockReportError::Flush(e.error().to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAlert {
    pub subject: String,
    pub body: String,
}

/// One paragraph per low or out-of-stock item, in snapshot order.
pub fn build_stock_alert(snapshot: &StockSnapshot) -> StockAlert {
    let mut body = String::new();

    for row in snapshot.alerts() {
        let name = escape_html(&row.product_name);
        let sku = escape_html(&row.sku);
        match row.level {
            StockLevelKind::OutOfStock => {
                let _ = write!(
                    body,
                    "<p><strong><font color='red'>The product {name} - {sku} is out of stock.</font></strong></p>"
                );
            }
            StockLevelKind::Low => {
                let _ = write!(
                    body,
                    "<p>The product {name} - {sku} is low in stock. Quantity: {}</p>",
                    row.quantity.unwrap_or_default()
                );
            }
            StockLevelKind::InStock => {}
        }
    }

    if body.is_empty() {
        body.push_str("<p>All tracked products are in stock.</p>");
    }
    let _ = write!(
        body,
        "<p>Snapshot taken at {}.</p>",
        snapshot.taken_at().format("%Y-%m-%d %H:%M UTC")
    );

    StockAlert {
        subject: STOCK_REPORT_SUBJECT.to_string(),
        body,
    }
}
