use serde::{Deserialize, Serialize};
use std::fmt;

/// 一个待抓取的标的：上游请求代码、报告中的显示名称、索引中的简称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSpec {
    pub code: String,
    pub display_name: String,
    pub short_name: String,
}

impl SymbolSpec {
    pub fn new(code: &str, display_name: &str, short_name: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            short_name: short_name.to_string(),
        }
    }
}

/// 单个标的的行情记录，数值字段保留上游原始文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(rename = "name")]
    pub display_name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub close: String,
    pub open: String,
    pub high: String,
    pub low: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(rename = "change", default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnavailableReason {
    /// 上游明确返回无数据
    NoData,
    /// 响应字段不足或格式不对
    Malformed(String),
    /// 网络错误、超时或非 2xx 状态
    Request(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NoData => write!(f, "no data"),
            UnavailableReason::Malformed(msg) => write!(f, "malformed response: {}", msg),
            UnavailableReason::Request(msg) => write!(f, "request failed: {}", msg),
        }
    }
}

/// 单个标的的抓取结果
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    Available(QuoteRecord),
    Unavailable {
        symbol: String,
        reason: UnavailableReason,
    },
}

impl QuoteOutcome {
    pub fn unavailable(symbol: &str, reason: UnavailableReason) -> Self {
        QuoteOutcome::Unavailable {
            symbol: symbol.to_string(),
            reason,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, QuoteOutcome::Available(_))
    }
}
