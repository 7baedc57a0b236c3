use crate::models::news::NewsBundle;
use crate::models::quote::QuoteRecord;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 显示名称 → 行情记录
pub type QuoteMap = BTreeMap<String, QuoteRecord>;

/// 某一天的全部行情与新闻，按日期落盘，同一天再次运行会覆盖
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub date: NaiveDate,
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<FixedOffset>,
    #[serde(rename = "us_stocks")]
    pub us_quotes: QuoteMap,
    #[serde(rename = "cn_stocks")]
    pub cn_quotes: QuoteMap,
    pub news: NewsBundle,
}

impl MarketSnapshot {
    pub fn date_stamp(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn us_close(&self, name: &str) -> Option<&str> {
        self.us_quotes.get(name).map(|q| q.close.as_str())
    }

    pub fn cn_close(&self, name: &str) -> Option<&str> {
        self.cn_quotes.get(name).map(|q| q.close.as_str())
    }
}
