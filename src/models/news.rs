use serde::{Deserialize, Serialize};

/// 抓取失败时哨兵条目的标题前缀
pub const FETCH_FAILED_PREFIX: &str = "获取失败";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    #[serde(rename = "content")]
    pub snippet: String,
}

impl NewsItem {
    pub fn new(title: &str, url: &str, snippet: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        }
    }

    /// 抓取失败时的哨兵条目，标题中带上失败原因
    pub fn failure(reason: &str) -> Self {
        Self {
            title: format!("{}：{}", FETCH_FAILED_PREFIX, reason),
            url: String::new(),
            snippet: String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.title.contains(FETCH_FAILED_PREFIX)
    }

    /// 是否可以出现在报告中
    pub fn is_displayable(&self) -> bool {
        !self.title.is_empty() && !self.is_failure()
    }
}

/// 三类新闻，失败的哨兵条目也保留在这里以便落盘
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsBundle {
    #[serde(rename = "us_news", default)]
    pub us: Vec<NewsItem>,
    #[serde(rename = "cn_news", default)]
    pub cn: Vec<NewsItem>,
    #[serde(rename = "global_news", default)]
    pub global: Vec<NewsItem>,
}

impl NewsBundle {
    pub fn total(&self) -> usize {
        self.us.len() + self.cn.len() + self.global.len()
    }
}
