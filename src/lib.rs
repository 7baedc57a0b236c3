// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod config;
pub mod report;
pub mod scrapers;
pub mod services;

// 重新导出常用类型，方便使用
pub use config::Config;
pub use errors::{Result, ReportError};
pub use models::news::{NewsBundle, NewsItem};
pub use models::quote::{QuoteOutcome, QuoteRecord, SymbolSpec};
pub use models::snapshot::MarketSnapshot;
pub use services::report_service::{ReportService, RunSummary};
