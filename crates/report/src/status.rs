//! Inventory update status report for one order.
//!
//! Pure function of its inputs: the same order id, buyer and result always
//! render the same subject and body.

use std::fmt::Write as _;

use stocksync_core::OrderId;
use stocksync_inventory::{ReconcileStatus, ReconciliationResult};

use crate::html::escape_html;

pub const SIGNATURE: &str = "Signed by The Naos bot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: ReconcileStatus,
    pub subject: String,
    pub body: String,
}

pub fn status_subject(status: ReconcileStatus, buyer_name: &str) -> String {
    format!("[{status}] Inventory Update Status - {buyer_name}")
}

/// Render the status email for a reconciled order.
///
/// Every attempted unit is listed with the quantity taken off its stock. On
/// FAIL a red section lists exactly the units whose decrement failed.
pub fn build_report(
    order_id: OrderId,
    buyer_name: &str,
    result: &ReconciliationResult,
) -> StatusReport {
    let status = result.status();
    let mut body = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        body,
        "<p>Order {order_id} was processed with status {status}.</p>"
    );
    body.push_str("<h3>Order details:</h3>");
    let _ = write!(body, "<p>Name: {}</p>", escape_html(buyer_name));
    body.push_str("<h3>Products:</h3>");

    if result.is_empty() {
        body.push_str("<p>No stock-tracked products on this order.</p>");
    }
    for outcome in result.outcomes() {
        let _ = write!(
            body,
            "<p>{}: -{}</p>",
            escape_html(&outcome.unit.entry.display_name()),
            outcome.unit.quantity
        );
    }

    if status == ReconcileStatus::Fail {
        body.push_str(
            "<p><font color='red'>Failed to update inventory for the following products:</font></p>",
        );
        for outcome in result.failed() {
            let _ = write!(
                body,
                "<p>{}: {}</p>",
                escape_html(&outcome.unit.entry.display_name()),
                outcome.unit.quantity
            );
        }
        let _ = write!(body, "<p>{SIGNATURE}</p>");
    }

    StatusReport {
        status,
        subject: status_subject(status, buyer_name),
        body,
    }
}
