use crate::config::Config;
use crate::models::news::NewsItem;
use crate::models::quote::SymbolSpec;
use crate::models::snapshot::MarketSnapshot;
use crate::report::format::{dollar, PLACEHOLDER};

const DATA_SOURCES: &str = "## 📊 数据源

| 类型 | 数据源 | 说明 |
|------|--------|------|
| 美股行情 | Stooq | 公开免费 API，延迟 15-20 分钟 |
| A 股行情 | 新浪财经 | 公开免费 API，实时 |
| 市场新闻 | Tavily | AI 搜索引擎，实时资讯 |
";

const FOOTER: &str = "*🤖 自动生成 | 数据仅供参考*\n";

/// Markdown 日报渲染器
///
/// 表格行顺序固定为配置中的标的顺序，快照里没有的标的直接跳过。
pub struct ReportRenderer {
    us_indices: Vec<String>,
    us_tech: Vec<String>,
    cn_indices: Vec<String>,
}

impl ReportRenderer {
    pub fn from_config(config: &Config) -> Self {
        let names = |specs: &[SymbolSpec]| -> Vec<String> {
            specs.iter().map(|s| s.display_name.clone()).collect()
        };
        Self {
            us_indices: names(&config.us_indices),
            us_tech: names(&config.us_tech),
            cn_indices: names(&config.cn_indices),
        }
    }

    pub fn render(&self, snapshot: &MarketSnapshot) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "# 📈 每日股票行情 | {}\n\n**生成时间**: {} (Asia/Shanghai)\n\n---\n\n",
            snapshot.date_stamp(),
            snapshot.captured_at.format("%Y-%m-%d %H:%M:%S")
        ));

        // 美股三大指数
        report.push_str("## 🇺🇸 美股市场\n\n### 三大指数\n\n");
        report.push_str("| 指数 | 代码 | 收盘价 | 开盘 | 最高 | 最低 | 成交量 |\n");
        report.push_str("|------|------|--------|------|------|------|--------|\n");
        for name in &self.us_indices {
            if let Some(q) = snapshot.us_quotes.get(name) {
                report.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    name,
                    q.symbol,
                    q.close,
                    q.open,
                    q.high,
                    q.low,
                    q.volume.as_deref().unwrap_or(PLACEHOLDER)
                ));
            }
        }

        // 科技七姐妹
        report.push_str("\n### 科技七姐妹\n\n");
        report.push_str("| 公司 | 代码 | 收盘价 | 开盘 | 最高 | 最低 |\n");
        report.push_str("|------|------|--------|------|------|------|\n");
        for name in &self.us_tech {
            if let Some(q) = snapshot.us_quotes.get(name) {
                report.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    name,
                    q.symbol,
                    dollar(&q.close),
                    dollar(&q.open),
                    dollar(&q.high),
                    dollar(&q.low)
                ));
            }
        }

        // A 股三大指数
        report.push_str("\n---\n\n## 🇨🇳 A 股市场\n\n### 三大指数\n\n");
        report.push_str("| 指数 | 代码 | 收盘价 | 开盘 | 最高 | 最低 | 涨跌幅 |\n");
        report.push_str("|------|------|--------|------|------|------|--------|\n");
        for name in &self.cn_indices {
            if let Some(q) = snapshot.cn_quotes.get(name) {
                report.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    name,
                    q.symbol,
                    q.close,
                    q.open,
                    q.high,
                    q.low,
                    q.change_percent.as_deref().unwrap_or(PLACEHOLDER)
                ));
            }
        }

        // 新闻
        report.push_str("\n---\n\n## 📰 市场新闻 (Tavily)\n\n");
        let news = &snapshot.news;
        let sections = [
            ("### 🇺🇸 美股新闻", &news.us),
            ("### 🇨🇳 A 股新闻", &news.cn),
            ("### 🌍 全球财经", &news.global),
        ];
        for (heading, items) in sections {
            render_news_section(&mut report, heading, items);
        }

        report.push_str("---\n\n");
        report.push_str(DATA_SOURCES);
        report.push_str("\n---\n\n");
        report.push_str(FOOTER);

        report
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 写出一个新闻小节；过滤失败条目后为空则整节省略
fn render_news_section(report: &mut String, heading: &str, items: &[NewsItem]) {
    let visible: Vec<&NewsItem> = items.iter().filter(|n| n.is_displayable()).collect();
    if visible.is_empty() {
        return;
    }

    report.push_str(heading);
    report.push_str("\n\n");
    for news in visible {
        report.push_str(&format!("- **{}**\n", news.title));
        if !news.url.is_empty() {
            report.push_str(&format!("  🔗 [{}]({})\n", news.url, news.url));
        }
        if !news.snippet.is_empty() {
            report.push_str(&format!("  {}\n", news.snippet));
        }
        report.push('\n');
    }
}
