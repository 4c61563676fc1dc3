//! Report module.
//!
//! Turns reconciliation results and stock snapshots into email content, and
//! defines the `NotificationSink` contract the mail adapter implements.

mod html;
pub mod notify;
pub mod status;
pub mod stock;

pub use html::escape_html;
pub use notify::{Attachment, Email, NotificationSink, NotifyError, deliver};
pub use status::{SIGNATURE, StatusReport, build_report, status_subject};
pub use stock::{
    STOCK_CSV_FILENAME, STOCK_REPORT_SUBJECT, StockAlert, StockReportError, build_stock_alert,
    render_csv,
};
