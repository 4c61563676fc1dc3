//! Infrastructure layer: configuration, storefront and mail adapters, run
//! pipelines.

pub mod config;
pub mod pipeline;
pub mod sendgrid;
pub mod wix;


pub use config::{ConfigError, MailRoute, StoreConfig, load_sku_rules};
pub use pipeline::{OrderRun, PipelineError, StockReportPipeline, StockReportRun, StockUpdatePipeline};
pub use sendgrid::SendGridNotifier;
pub use wix::{WixClient, WixError};
