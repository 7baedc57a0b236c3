use crate::config::Config;
use crate::errors::{ReportError, Result};
use crate::models::quote::{QuoteOutcome, QuoteRecord, SymbolSpec, UnavailableReason};
use crate::report::format::{change_percent, or_placeholder};
use crate::scrapers::base::QuoteScraper;
use async_trait::async_trait;
use encoding_rs::GBK;
use log::{debug, info, warn};
use reqwest::Client;

/// 名称,今开,昨收,当前,最高,最低 至少 6 列
const MIN_FIELDS: usize = 6;

/// 行情日期所在列
const DATE_FIELD: usize = 30;

const SINA_REFERER: &str = "https://finance.sina.com.cn/";

/// 新浪财经 A 股指数行情抓取器
pub struct SinaScraper {
    client: Client,
    base_url: String,
}

impl SinaScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ReportError::RequestError)?;

        Ok(Self {
            client,
            base_url: config.sina_url.trim_end_matches('/').to_string(),
        })
    }

    async fn request(&self, code: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/list={}", self.base_url, code))
            .header("Referer", SINA_REFERER)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(decode_gbk(&bytes))
    }
}

/// 新浪行情接口返回 GBK 编码
pub fn decode_gbk(bytes: &[u8]) -> String {
    let (text, _, had_errors) = GBK.decode(bytes);
    if had_errors {
        debug!("GBK 解码时遇到无效字节，已替换");
    }
    text.into_owned()
}

/// 解析 `var hq_str_sh000001="名称,今开,昨收,当前,最高,最低,...";`
pub fn parse_sina_response(body: &str, spec: &SymbolSpec) -> QuoteOutcome {
    if !body.contains(&spec.code) {
        return QuoteOutcome::unavailable(&spec.code, UnavailableReason::NoData);
    }

    let payload = body.split('"').nth(1).unwrap_or("").trim();
    if payload.is_empty() {
        return QuoteOutcome::unavailable(&spec.code, UnavailableReason::NoData);
    }

    let parts: Vec<&str> = payload.split(',').map(str::trim).collect();
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

    QuoteOutcome::Available(QuoteRecord {
        display_name: spec.display_name.clone(),
        symbol: spec.code.clone(),
        date: parts
            .get(DATE_FIELD)
            .filter(|d| !d.is_empty())
            .map(|d| d.to_string()),
        close: or_placeholder(parts[3]).to_string(),
        open: or_placeholder(parts[1]).to_string(),
        high: or_placeholder(parts[4]).to_string(),
        low: or_placeholder(parts[5]).to_string(),
        volume: None,
        change_percent: Some(change_percent(parts[3], parts[2])),
    })
}

#[async_trait]
impl QuoteScraper for SinaScraper {
    fn source_name(&self) -> &'static str {
        "Sina"
    }

    async fn fetch_quote(&self, spec: &SymbolSpec) -> QuoteOutcome {
        debug!("获取新浪行情 {} ({})", spec.display_name, spec.code);

        let body = match self.request(&spec.code).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Sina request for {} failed: {}", spec.code, e);
                return QuoteOutcome::unavailable(
                    &spec.code,
                    UnavailableReason::Request(e.to_string()),
                );
            }
        };

        let outcome = parse_sina_response(&body, spec);
        if outcome.is_available() {
            info!("成功获取 {} 行情", spec.display_name);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::test_server::{serve_once, UNREACHABLE_URL};
    use std::time::Duration;

    fn shanghai() -> SymbolSpec {
        SymbolSpec::new("sh000001", "上证指数", "上证")
    }

    const SH_BODY: &str = "var hq_str_sh000001=\"上证指数,3290.1200,3280.0000,3312.8000,\
                           3320.5500,3285.4100,0,0,412345678,512345678901,\
                           0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,\
                           2026-02-13,15:30:39,00,\";";

    #[test]
    fn test_parse_index_payload() {
        match parse_sina_response(SH_BODY, &shanghai()) {
            QuoteOutcome::Available(record) => {
                assert_eq!(record.display_name, "上证指数");
                assert_eq!(record.symbol, "sh000001");
                assert_eq!(record.open, "3290.1200");
                assert_eq!(record.close, "3312.8000");
                assert_eq!(record.high, "3320.5500");
                assert_eq!(record.low, "3285.4100");
                assert_eq!(record.date.as_deref(), Some("2026-02-13"));
                assert_eq!(record.change_percent.as_deref(), Some("+1.00%"));
                assert!(record.volume.is_none());
            }
            other => panic!("expected a record, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_payload_is_no_data() {
        let body = "var hq_str_sh000001=\"\";";
        assert_eq!(
            parse_sina_response(body, &shanghai()),
            QuoteOutcome::unavailable("sh000001", UnavailableReason::NoData)
        );
    }

    #[test]
    fn test_response_for_other_code_is_no_data() {
        let body = "var hq_str_sz399001=\"深证成指,1,2,3,4,5\";";
        assert_eq!(
            parse_sina_response(body, &shanghai()),
            QuoteOutcome::unavailable("sh000001", UnavailableReason::NoData)
        );
    }

    #[test]
    fn test_short_payload_is_dropped() {
        let body = "var hq_str_sh000001=\"上证指数,3290.12,3280.00,3312.80,3320.55\";";
        assert!(matches!(
            parse_sina_response(body, &shanghai()),
            QuoteOutcome::Unavailable {
                reason: UnavailableReason::Malformed(_),
                ..
            }
        ));
    }

    #[test]
    fn test_blank_fields_render_placeholder() {
        let body = "var hq_str_sh000001=\"上证指数,,0,,,\";";
        match parse_sina_response(body, &shanghai()) {
            QuoteOutcome::Available(record) => {
                assert_eq!(record.open, "-");
                assert_eq!(record.close, "-");
                assert_eq!(record.high, "-");
                assert_eq!(record.low, "-");
                assert_eq!(record.change_percent.as_deref(), Some("-"));
                assert!(record.date.is_none());
            }
            other => panic!("expected a record, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_gbk_payload() {
        let (bytes, _, _) = GBK.encode("var hq_str_sz399006=\"创业板指,1,2,3,4,5\";");
        let text = decode_gbk(&bytes);
        assert!(text.contains("创业板指"));

        let spec = SymbolSpec::new("sz399006", "创业板指", "创业板");
        assert!(parse_sina_response(&text, &spec).is_available());
    }

    fn scraper_for(url: &str) -> SinaScraper {
        let mut config = Config::new().with_request_timeout(Duration::from_secs(2));
        config.sina_url = format!("{}/", url);
        SinaScraper::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_connection_failure_is_request_unavailable() {
        let outcome = scraper_for(UNREACHABLE_URL).fetch_quote(&shanghai()).await;
        assert!(matches!(
            outcome,
            QuoteOutcome::Unavailable {
                reason: UnavailableReason::Request(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_served_gbk_body_is_decoded_and_parsed() {
        let (bytes, _, _) = GBK.encode(SH_BODY);
        let url = serve_once("200 OK", bytes.into_owned()).await;
        match scraper_for(&url).fetch_quote(&shanghai()).await {
            QuoteOutcome::Available(record) => {
                assert_eq!(record.display_name, "上证指数");
                assert_eq!(record.close, "3312.8000");
                assert_eq!(record.change_percent.as_deref(), Some("+1.00%"));
            }
            other => panic!("expected a record, got {:?}", other),
        }
    }
}
