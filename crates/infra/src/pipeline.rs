//! Run orchestration (application-level).
//!
//! ```text
//! update-stock:  order fetch -> catalog fetch -> SKU resolution
//!                -> sequential decrements -> status report -> email
//! stock-report:  catalog fetch -> stock snapshot -> CSV + alert -> email
//! ```
//!
//! Fetch failures are terminal for the run and returned to the caller. Once
//! reconciliation has started the run always completes: per-unit failures end
//! up in the report, and a failed email send is logged only.
//!
//! This module contains no IO itself; it composes the source, service and sink
//! contracts.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info};

use stocksync_catalog::{CatalogError, CatalogSource, SkuResolver, SkuRules};
use stocksync_core::OrderId;
use stocksync_inventory::{
    InventoryReconciler, InventoryService, ReconciliationResult, StockSnapshot,
};
use stocksync_orders::{OrderError, OrderSource};
use stocksync_report::{
    Attachment, Email, NotificationSink, STOCK_CSV_FILENAME, StatusReport, StockAlert,
    StockReportError, build_report, build_stock_alert, deliver, render_csv,
};

use crate::config::MailRoute;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    StockReport(#[from] StockReportError),
}

/// Outcome of one `update-stock` run.
#[derive(Debug, Clone)]
pub struct OrderRun {
    pub order_id: OrderId,
    pub result: ReconciliationResult,
    pub report: StatusReport,
    /// Whether the status email was accepted by the mail service.
    pub notified: bool,
}

/// Reconciles one paid order against the storefront inventory.
///
/// The catalog index is rebuilt on every run, so each run sees the catalog as
/// it is at that moment.
#[derive(Debug)]
pub struct StockUpdatePipeline<C, O, I, N> {
    catalog: C,
    orders: O,
    reconciler: InventoryReconciler<I>,
    notifier: N,
    rules: SkuRules,
    mail: MailRoute,
}

impl<C, O, I, N> StockUpdatePipeline<C, O, I, N> {
    pub fn new(catalog: C, orders: O, inventory: I, notifier: N, rules: SkuRules, mail: MailRoute) -> Self {
        Self {
            catalog,
            orders,
            reconciler: InventoryReconciler::new(inventory),
            notifier,
            rules,
            mail,
        }
    }

    pub fn inventory(&self) -> &I {
        self.reconciler.service()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<C, O, I, N> StockUpdatePipeline<C, O, I, N>
where
    C: CatalogSource,
    O: OrderSource,
    I: InventoryService,
    N: NotificationSink,
{
    pub async fn run(&self, order_id: OrderId) -> Result<OrderRun, PipelineError> {
        info!(order_id = %order_id, "processing order");

        let order = self.orders.fetch_order(order_id).await.inspect_err(|e| {
            error!(order_id = %order_id, error = %e, "failed to fetch order");
        })?;

        let resolver = SkuResolver::load(&self.catalog, self.rules.clone())
            .await
            .inspect_err(|e| {
                error!(order_id = %order_id, error = %e, "failed to fetch catalog");
            })?;

        let units = resolver.expand_order(&order);
        let result = self.reconciler.reconcile(units).await;

        let buyer_name = order.buyer_name();
        let report = build_report(order_id, &buyer_name, &result);
        let email = Email::html(
            self.mail.from.clone(),
            self.mail.to.clone(),
            report.subject.clone(),
            report.body.clone(),
        );
        let notified = deliver(&self.notifier, &email).await;

        info!(
            order_id = %order_id,
            status = %report.status,
            units = result.len(),
            failed = result.failed().count(),
            "order processed"
        );

        Ok(OrderRun {
            order_id,
            result,
            report,
            notified,
        })
    }
}

/// Outcome of one `stock-report` run.
#[derive(Debug, Clone)]
pub struct StockReportRun {
    pub snapshot: StockSnapshot,
    pub csv: Vec<u8>,
    pub alert: StockAlert,
    pub notified: bool,
}

#[derive(Debug)]
pub struct StockReportPipeline<C, N> {
    catalog: C,
    notifier: N,
    mail: MailRoute,
    low_threshold: i64,
}

impl<C, N> StockReportPipeline<C, N> {
    pub fn new(catalog: C, notifier: N, mail: MailRoute, low_threshold: i64) -> Self {
        Self {
            catalog,
            notifier,
            mail,
            low_threshold,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<C, N> StockReportPipeline<C, N>
where
    C: CatalogSource,
    N: NotificationSink,
{
    pub async fn run(&self, taken_at: DateTime<Utc>) -> Result<StockReportRun, PipelineError> {
        let products = self.catalog.fetch_catalog().await.inspect_err(|e| {
            error!(error = %e, "failed to fetch catalog");
        })?;

        let snapshot = StockSnapshot::from_catalog(&products, self.low_threshold, taken_at);
        let csv = render_csv(&snapshot)?;
        let alert = build_stock_alert(&snapshot);

        let email = Email::html(
            self.mail.from.clone(),
            self.mail.to.clone(),
            alert.subject.clone(),
            alert.body.clone(),
        )
        .with_attachment(Attachment::csv(STOCK_CSV_FILENAME, csv.clone()));
        let notified = deliver(&self.notifier, &email).await;

        info!(
            rows = snapshot.rows().len(),
            alerts = snapshot.alerts().count(),
            "stock report generated"
        );

        Ok(StockReportRun {
            snapshot,
            csv,
            alert,
            notified,
        })
    }
}
