use crate::models::quote::SymbolSpec;
use std::path::PathBuf;
use std::time::Duration;

pub const STOOQ_QUOTE_URL: &str = "https://stooq.com/q/l/";
pub const SINA_QUOTE_URL: &str = "https://hq.sinajs.cn";
pub const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// 索引文档中最新行情的锚点标题
pub const INDEX_MARKER: &str = "## 最新行情";

pub struct Config {
    pub data_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub index_path: PathBuf,
    pub request_timeout: Duration,
    pub stooq_url: String,
    pub sina_url: String,
    pub tavily_url: String,
    pub tavily_api_key: Option<String>,
    pub us_indices: Vec<SymbolSpec>,
    pub us_tech: Vec<SymbolSpec>,
    pub cn_indices: Vec<SymbolSpec>,
    pub us_news_query: String,
    pub cn_news_query: String,
    pub global_news_query: String,
    pub news_max_results: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
            index_path: PathBuf::from("README.md"),
            request_timeout: Duration::from_secs(30),
            stooq_url: STOOQ_QUOTE_URL.to_string(),
            sina_url: SINA_QUOTE_URL.to_string(),
            tavily_url: TAVILY_SEARCH_URL.to_string(),
            tavily_api_key: None,
            us_indices: vec![
                SymbolSpec::new("^DJI", "道琼斯", "道琼斯"),
                SymbolSpec::new("^SPX", "标普 500", "标普"),
                SymbolSpec::new("^IXIC", "纳斯达克", "纳指"),
            ],
            us_tech: vec![
                SymbolSpec::new("AAPL.US", "苹果", "苹果"),
                SymbolSpec::new("MSFT.US", "微软", "微软"),
                SymbolSpec::new("GOOGL.US", "谷歌", "谷歌"),
                SymbolSpec::new("AMZN.US", "亚马逊", "亚马逊"),
                SymbolSpec::new("NVDA.US", "英伟达", "英伟达"),
                SymbolSpec::new("META.US", "Meta", "Meta"),
                SymbolSpec::new("TSLA.US", "特斯拉", "特斯拉"),
            ],
            cn_indices: vec![
                SymbolSpec::new("sh000001", "上证指数", "上证"),
                SymbolSpec::new("sz399001", "深证成指", "深证"),
                SymbolSpec::new("sz399006", "创业板指", "创业板"),
            ],
            us_news_query: "美股市场新闻 美联储 科技股 {year} 年 {month} 月".to_string(),
            cn_news_query: "A 股市场新闻 中国证监会 沪深股市 {year} 年 {month} 月".to_string(),
            global_news_query: "全球财经新闻 人工智能 AI 芯片 加密货币 {year} 年".to_string(),
            news_max_results: 3,
        }
    }

    /// 以给定目录为根，数据、报告和 README 都放在其下
    pub fn with_root_dir(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.data_dir = root.join("data");
        self.reports_dir = root.join("reports");
        self.index_path = root.join("README.md");
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = dir.into();
        self
    }

    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.tavily_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_news_max_results(mut self, max: usize) -> Self {
        self.news_max_results = max;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_symbol_tables() {
        let config = Config::default();
        assert_eq!(config.us_indices.len(), 3);
        assert_eq!(config.us_tech.len(), 7);
        assert_eq!(config.cn_indices.len(), 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.tavily_api_key.is_none());
    }

    #[test]
    fn test_root_dir_layout() {
        let config = Config::new().with_root_dir("/tmp/stock");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/stock/data"));
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/stock/reports"));
        assert_eq!(config.index_path, PathBuf::from("/tmp/stock/README.md"));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = Config::new().with_api_key(Some("  ".to_string()));
        assert!(config.tavily_api_key.is_none());

        let config = Config::new().with_api_key(Some("tvly-test".to_string()));
        assert_eq!(config.tavily_api_key.as_deref(), Some("tvly-test"));
    }
}
