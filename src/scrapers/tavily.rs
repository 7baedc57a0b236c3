use crate::config::Config;
use crate::errors::{ReportError, Result};
use crate::models::news::NewsItem;
use crate::report::format::truncate_snippet;
use crate::scrapers::base::NewsSource;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_answer: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Tavily 搜索 API 新闻抓取器
pub struct TavilyNews {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl TavilyNews {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ReportError::RequestError)?;

        Ok(Self {
            client,
            endpoint: config.tavily_url.clone(),
            api_key: config.tavily_api_key.clone(),
        })
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<SearchResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ReportError::from("TAVILY_API_KEY is not set"))?;

        let body = SearchRequest {
            query,
            max_results,
            search_depth: "advanced",
            include_answer: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::UpstreamError(format!("HTTP {}", status)));
        }

        let text = response.text().await?;
        debug!("Tavily 响应 {} 字节", text.len());
        Ok(serde_json::from_str(&text)?)
    }
}

/// 按上游顺序取前 `max_results` 条，截断摘要
pub fn news_from_response(response: SearchResponse, max_results: usize) -> Vec<NewsItem> {
    response
        .results
        .into_iter()
        .take(max_results)
        .map(|r| NewsItem {
            title: r.title.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
            snippet: truncate_snippet(r.content.as_deref().unwrap_or("")),
        })
        .collect()
}

#[async_trait]
impl NewsSource for TavilyNews {
    async fn fetch_news(&self, query: &str, max_results: usize) -> Vec<NewsItem> {
        info!("搜索新闻: {}", query);

        match self.search(query, max_results).await {
            Ok(response) => {
                let items = news_from_response(response, max_results);
                info!("获取到 {} 条新闻", items.len());
                items
            }
            Err(e) => {
                warn!("News search failed for '{}': {}", query, e);
                vec![NewsItem::failure(&e.to_string())]
            }
        }
    }
}
