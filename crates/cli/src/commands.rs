use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use stocksync_infra::{
    SendGridNotifier, StockReportPipeline, StockUpdatePipeline, StoreConfig, WixClient,
};
use stocksync_inventory::ReconcileStatus;

use crate::cli::{StockReportArgs, UpdateStockArgs};

/// Exit code when the run completed but some decrements failed.
const EXIT_RECONCILE_FAILED: u8 = 2;

fn adapters(config: &StoreConfig) -> Result<(WixClient, SendGridNotifier)> {
    let wix = WixClient::new(&config.wix, config.http_timeout).context("create storefront client")?;
    let mail = SendGridNotifier::new(&config.sendgrid, config.http_timeout)
        .context("create mail client")?;
    Ok((wix, mail))
}

pub async fn run_update_stock(config: StoreConfig, args: &UpdateStockArgs) -> Result<ExitCode> {
    let rules = config.load_sku_rules()?;
    let (wix, mail) = adapters(&config)?;

    // The storefront client serves as catalog, order source and inventory;
    // clones share one connection pool.
    let pipeline = StockUpdatePipeline::new(
        wix.clone(),
        wix.clone(),
        wix,
        mail,
        rules,
        config.mail.clone(),
    );
    let run = pipeline
        .run(args.order_id)
        .await
        .with_context(|| format!("update stock for order {}", args.order_id))?;

    Ok(match run.report.status {
        ReconcileStatus::Success => ExitCode::SUCCESS,
        ReconcileStatus::Fail => ExitCode::from(EXIT_RECONCILE_FAILED),
    })
}

pub async fn run_stock_report(config: StoreConfig, args: &StockReportArgs) -> Result<ExitCode> {
    let (wix, mail) = adapters(&config)?;

    let pipeline = StockReportPipeline::new(wix, mail, config.mail.clone(), args.threshold);
    let run = pipeline.run(Utc::now()).await.context("build stock report")?;

    if let Some(path) = &args.output {
        std::fs::write(path, &run.csv)
            .with_context(|| format!("write stock CSV to {}", path.display()))?;
        info!(path = %path.display(), "wrote stock CSV");
    }

    Ok(ExitCode::SUCCESS)
}
