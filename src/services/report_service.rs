use crate::config::Config;
use crate::errors::Result;
use crate::models::news::NewsBundle;
use crate::report::aggregator::{build_snapshot, quote_map};
use crate::report::index::IndexUpdater;
use crate::report::renderer::ReportRenderer;
use crate::scrapers::base::{NewsSource, QuoteScraper};
use crate::services::storage::SnapshotStore;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use log::info;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// 一次运行的结果摘要，用于打印到终端
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub us_count: usize,
    pub cn_count: usize,
    pub us_news_count: usize,
    pub cn_news_count: usize,
    pub global_news_count: usize,
    pub snapshot_path: PathBuf,
    pub report_path: PathBuf,
    pub index_path: PathBuf,
    pub dow_close: Option<String>,
    pub shanghai_close: Option<String>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 {} 摘要:", self.date.format("%Y-%m-%d"))?;
        writeln!(f, "   美股 {} 条，A 股 {} 条", self.us_count, self.cn_count)?;
        writeln!(
            f,
            "   新闻：美股 {} 条，A 股 {} 条，全球 {} 条",
            self.us_news_count, self.cn_news_count, self.global_news_count
        )?;
        if let Some(close) = &self.dow_close {
            writeln!(f, "   道琼斯：{}", close)?;
        }
        if let Some(close) = &self.shanghai_close {
            writeln!(f, "   上证指数：{}", close)?;
        }
        writeln!(f, "💾 数据：{}", self.snapshot_path.display())?;
        writeln!(f, "📄 报告：{}", self.report_path.display())?;
        write!(f, "📝 索引：{}", self.index_path.display())
    }
}

/// 把查询模板中的 {year} / {month} 换成运行日期
pub fn expand_query(template: &str, date: NaiveDate) -> String {
    template
        .replace("{year}", &date.year().to_string())
        .replace("{month}", &date.month().to_string())
}

/// 日报服务：抓取 → 汇总 → 落盘 → 渲染 → 更新索引
pub struct ReportService {
    config: Config,
    us_scraper: Arc<dyn QuoteScraper>,
    cn_scraper: Arc<dyn QuoteScraper>,
    news_source: Arc<dyn NewsSource>,
    store: SnapshotStore,
    renderer: ReportRenderer,
    index: IndexUpdater,
}

impl ReportService {
    pub fn new(
        config: Config,
        us_scraper: Arc<dyn QuoteScraper>,
        cn_scraper: Arc<dyn QuoteScraper>,
        news_source: Arc<dyn NewsSource>,
    ) -> Self {
        let store = SnapshotStore::new(&config.data_dir, &config.reports_dir);
        let renderer = ReportRenderer::from_config(&config);
        let index = IndexUpdater::new(&config.index_path, &config.us_indices, &config.cn_indices);
        Self {
            config,
            us_scraper,
            cn_scraper,
            news_source,
            store,
            renderer,
            index,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    async fn collect_news(&self, date: NaiveDate) -> NewsBundle {
        let max = self.config.news_max_results;
        let us = self
            .news_source
            .fetch_news(&expand_query(&self.config.us_news_query, date), max)
            .await;
        let cn = self
            .news_source
            .fetch_news(&expand_query(&self.config.cn_news_query, date), max)
            .await;
        let global = self
            .news_source
            .fetch_news(&expand_query(&self.config.global_news_query, date), max)
            .await;
        NewsBundle { us, cn, global }
    }

    /// 执行一次完整的日报流程，请求依次发出
    pub async fn run(
        &self,
        date: NaiveDate,
        captured_at: DateTime<FixedOffset>,
    ) -> Result<RunSummary> {
        info!("开始收集 {} ({}) 的股票数据", date, date.weekday());

        info!("收集美股数据 ({})", self.us_scraper.source_name());
        let mut us_outcomes = self.us_scraper.fetch_quotes(&self.config.us_indices).await;
        us_outcomes.extend(self.us_scraper.fetch_quotes(&self.config.us_tech).await);
        let us_quotes = quote_map(us_outcomes);
        info!("收集到 {} 条美股数据", us_quotes.len());

        info!("收集 A 股数据 ({})", self.cn_scraper.source_name());
        let cn_quotes = quote_map(self.cn_scraper.fetch_quotes(&self.config.cn_indices).await);
        info!("收集到 {} 条 A 股数据", cn_quotes.len());

        info!("收集市场新闻");
        let news = self.collect_news(date).await;
        info!(
            "收集到 {} 条美股新闻，{} 条 A 股新闻，{} 条全球新闻",
            news.us.len(),
            news.cn.len(),
            news.global.len()
        );

        let snapshot = build_snapshot(date, captured_at, us_quotes, cn_quotes, news);

        let snapshot_path = self.store.save_snapshot(&snapshot)?;
        let report = self.renderer.render(&snapshot);
        let report_path = self.store.save_report(date, &report)?;
        self.index.update(date, &snapshot.us_quotes, &snapshot.cn_quotes)?;

        let dow_close = self
            .config
            .us_indices
            .first()
            .and_then(|spec| snapshot.us_close(&spec.display_name))
            .map(str::to_string);
        let shanghai_close = self
            .config
            .cn_indices
            .first()
            .and_then(|spec| snapshot.cn_close(&spec.display_name))
            .map(str::to_string);

        Ok(RunSummary {
            date,
            us_count: snapshot.us_quotes.len(),
            cn_count: snapshot.cn_quotes.len(),
            us_news_count: snapshot.news.us.len(),
            cn_news_count: snapshot.news.cn.len(),
            global_news_count: snapshot.news.global.len(),
            snapshot_path,
            report_path,
            index_path: self.index.path().to_path_buf(),
            dow_close,
            shanghai_close,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_query() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        assert_eq!(
            expand_query("美股市场新闻 美联储 科技股 {year} 年 {month} 月", date),
            "美股市场新闻 美联储 科技股 2026 年 2 月"
        );
        assert_eq!(expand_query("no placeholders", date), "no placeholders");
    }
}
