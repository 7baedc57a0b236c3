use stock_daily::config::Config;
use stock_daily::scrapers::sina::SinaScraper;
use stock_daily::scrapers::stooq::StooqScraper;
use stock_daily::scrapers::tavily::TavilyNews;
use stock_daily::services::report_service::ReportService;

use chrono::Utc;
use chrono_tz::Asia::Shanghai;
use clap::App;
use log::{info, warn};
use std::error::Error;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 只提供 --help / --version，没有影响行为的参数
    App::new("stock_daily")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collect daily US / CN market quotes and news into a Markdown report")
        .get_matches();

    let api_key = std::env::var("TAVILY_API_KEY").ok();
    if api_key.is_none() {
        warn!("TAVILY_API_KEY is not set, news sections will be empty");
    }
    let config = Config::new().with_api_key(api_key);

    let us_scraper = Arc::new(StooqScraper::new(&config)?);
    let cn_scraper = Arc::new(SinaScraper::new(&config)?);
    let news_source = Arc::new(TavilyNews::new(&config)?);

    let now = Utc::now().with_timezone(&Shanghai);
    let date = now.date_naive();
    let captured_at = now.fixed_offset();

    let service = ReportService::new(config, us_scraper, cn_scraper, news_source);
    let summary = service.run(date, captured_at).await?;

    info!("完成");
    println!("{}", summary);

    Ok(())
}
