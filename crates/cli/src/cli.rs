//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use stocksync_core::OrderId;
use stocksync_inventory::DEFAULT_LOW_STOCK_THRESHOLD;

#[derive(Parser)]
#[command(
    name = "stocksync",
    version,
    about = "Reconcile storefront orders against inventory",
    long_about = "Reconcile paid storefront orders against inventory.\n\n\
                  Credentials come from WIX_API_KEY, WIX_SITE_ID and SG_API_KEY.\n\
                  Set RUST_LOG to change the log level."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log output format (json for log shippers, pretty for humans).
    #[arg(long = "log-format", value_enum, default_value = "json", global = true)]
    pub log_format: LogFormatArg,

    /// JSON file with SKU substitution and accessory tables
    /// (overrides STOCKSYNC_SKU_RULES; built-in tables when neither is set).
    #[arg(long = "sku-rules", value_name = "PATH", global = true)]
    pub sku_rules: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decrement stock for every item of a paid order and email the outcome.
    UpdateStock(UpdateStockArgs),

    /// Email a stock-level report with the full stock list attached as CSV.
    StockReport(StockReportArgs),
}

#[derive(Parser)]
pub struct UpdateStockArgs {
    /// Storefront order id.
    #[arg(long = "order-id", value_name = "ID")]
    pub order_id: OrderId,
}

#[derive(Parser)]
pub struct StockReportArgs {
    /// Also write the stock CSV to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Items with fewer units than this are reported as low on stock.
    #[arg(long = "threshold", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    pub threshold: i64,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Json,
    Pretty,
}
