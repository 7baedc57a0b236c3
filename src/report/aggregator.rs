use crate::models::news::NewsBundle;
use crate::models::quote::QuoteOutcome;
use crate::models::snapshot::{MarketSnapshot, QuoteMap};
use chrono::{DateTime, FixedOffset, NaiveDate};
use log::warn;

/// 只保留抓取成功的记录，按显示名称建立映射
pub fn quote_map(outcomes: Vec<QuoteOutcome>) -> QuoteMap {
    let mut quotes = QuoteMap::new();
    for outcome in outcomes {
        match outcome {
            QuoteOutcome::Available(record) => {
                quotes.insert(record.display_name.clone(), record);
            }
            QuoteOutcome::Unavailable { symbol, reason } => {
                warn!("跳过 {}: {}", symbol, reason);
            }
        }
    }
    quotes
}

/// 组装当天的快照，不做任何 IO
pub fn build_snapshot(
    date: NaiveDate,
    captured_at: DateTime<FixedOffset>,
    us_quotes: QuoteMap,
    cn_quotes: QuoteMap,
    news: NewsBundle,
) -> MarketSnapshot {
    MarketSnapshot {
        date,
        captured_at,
        us_quotes,
        cn_quotes,
        news,
    }
}
