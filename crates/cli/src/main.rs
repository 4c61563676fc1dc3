//! Stock reconciliation CLI.

use std::process::ExitCode;

use clap::Parser;
use stocksync_infra::StoreConfig;
use stocksync_observability::LogFormat;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_stock_report, run_update_stock};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    stocksync_observability::init(match cli.log_format {
        LogFormatArg::Json => LogFormat::Json,
        LogFormatArg::Pretty => LogFormat::Pretty,
    });

    // Configuration problems stop the run before any remote call.
    let mut config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(error = %error, "invalid configuration");
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = cli.sku_rules {
        config.sku_rules_path = Some(path);
    }

    let outcome = match &cli.command {
        Command::UpdateStock(args) => run_update_stock(config, args).await,
        Command::StockReport(args) => run_stock_report(config, args).await,
    };

    match outcome {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "run failed");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
