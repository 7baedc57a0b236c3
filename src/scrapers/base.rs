use crate::models::news::NewsItem;
use crate::models::quote::{QuoteOutcome, SymbolSpec};
use async_trait::async_trait;

/// Base trait for quote scrapers
///
/// Implementations never fail: anything that goes wrong for a symbol comes
/// back as `QuoteOutcome::Unavailable`.
#[async_trait]
pub trait QuoteScraper: Send + Sync {
    /// Name of the upstream source, used in logs
    fn source_name(&self) -> &'static str;

    /// Fetch a single symbol
    async fn fetch_quote(&self, spec: &SymbolSpec) -> QuoteOutcome;

    /// Fetch every symbol one after the other, in the given order
    async fn fetch_quotes(&self, specs: &[SymbolSpec]) -> Vec<QuoteOutcome> {
        let mut outcomes = Vec::with_capacity(specs.len());
        for spec in specs {
            outcomes.push(self.fetch_quote(spec).await);
        }
        outcomes
    }
}

/// Base trait for news search sources
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns at most `max_results` items in upstream order, or a single
    /// failure item when the search could not be completed.
    async fn fetch_news(&self, query: &str, max_results: usize) -> Vec<NewsItem>;
}
