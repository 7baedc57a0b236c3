use crate::config::Config;
use crate::errors::{ReportError, Result};
use crate::models::quote::{QuoteOutcome, QuoteRecord, SymbolSpec, UnavailableReason};
use crate::scrapers::base::QuoteScraper;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;

/// Stooq 无数据时返回的标记
const NO_DATA_TOKEN: &str = "N/D";

/// CSV 表头首列
const HEADER_FIELD: &str = "Symbol";

/// Symbol,Date,Time,Open,High,Low,Close 至少 7 列
const MIN_FIELDS: usize = 7;

/// Stooq 美股指数与个股行情抓取器
pub struct StooqScraper {
    client: Client,
    base_url: String,
}

impl StooqScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ReportError::RequestError)?;

        Ok(Self {
            client,
            base_url: config.stooq_url.clone(),
        })
    }

    async fn request(&self, code: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("s", code), ("f", "sd2t2ohlcv"), ("h", ""), ("e", "csv")])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

/// 去掉 ".US" 市场后缀，指数代码保持原样
fn display_symbol(code: &str) -> String {
    code.strip_suffix(".US").unwrap_or(code).to_string()
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .map(|field| field.trim().eq_ignore_ascii_case(HEADER_FIELD))
        .unwrap_or(false)
}

/// 解析 Stooq CSV 响应（表头 + 数据行），取最后一行非空数据
///
/// Format: Symbol,Date,Time,Open,High,Low,Close,Volume
pub fn parse_stooq_response(body: &str, spec: &SymbolSpec) -> QuoteOutcome {
    if body.contains(NO_DATA_TOKEN) {
        return QuoteOutcome::unavailable(&spec.code, UnavailableReason::NoData);
    }

    // 只有表头没有数据行时同样视为无数据
    let line = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_header(l))
        .last();
    let line = match line {
        Some(line) => line,
        None => return QuoteOutcome::unavailable(&spec.code, UnavailableReason::NoData),
    };

    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < MIN_FIELDS {
        return QuoteOutcome::unavailable(
            &spec.code,
            UnavailableReason::Malformed(format!(
                "expected at least {} fields, got {}",
                MIN_FIELDS,
                parts.len()
            )),
        );
    }

    let volume = parts
        .get(7)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string());

    QuoteOutcome::Available(QuoteRecord {
        display_name: spec.display_name.clone(),
        symbol: display_symbol(&spec.code),
        date: Some(parts[1].to_string()).filter(|d| !d.is_empty()),
        close: parts[6].to_string(),
        open: parts[3].to_string(),
        high: parts[4].to_string(),
        low: parts[5].to_string(),
        volume,
        change_percent: None,
    })
}

#[async_trait]
impl QuoteScraper for StooqScraper {
    fn source_name(&self) -> &'static str {
        "Stooq"
    }

    async fn fetch_quote(&self, spec: &SymbolSpec) -> QuoteOutcome {
        debug!("获取 Stooq 行情 {} ({})", spec.display_name, spec.code);

        let body = match self.request(&spec.code).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Stooq request for {} failed: {}", spec.code, e);
                return QuoteOutcome::unavailable(
                    &spec.code,
                    UnavailableReason::Request(e.to_string()),
                );
            }
        };

        let outcome = parse_stooq_response(&body, spec);
        if outcome.is_available() {
            info!("成功获取 {} 行情", spec.display_name);
        }
        outcome
    }
}
