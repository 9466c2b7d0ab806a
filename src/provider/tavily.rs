use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use super::{ProviderError, SearchProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl FromStr for SearchDepth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(SearchDepth::Basic),
            "advanced" => Ok(SearchDepth::Advanced),
            other => Err(anyhow!("unknown search depth {other:?}, expected basic or advanced")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    General,
    News,
    Finance,
}

impl FromStr for Topic {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Topic::General),
            "news" => Ok(Topic::News),
            "finance" => Ok(Topic::Finance),
            other => Err(anyhow!(
                "unknown topic {other:?}, expected general, news or finance"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TavilySettings {
    pub base_url: String,
    pub search_depth: SearchDepth,
    pub topic: Topic,
    pub max_results: u8,
}

impl Default for TavilySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_depth: SearchDepth::Basic,
            topic: Topic::General,
            max_results: 5,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct SearchBody<'a> {
    query: &'a str,
    search_depth: SearchDepth,
    topic: Topic,
    max_results: u8,
}

pub struct TavilyClient {
    http: Client,
    api_key: String,
    settings: TavilySettings,
}

impl TavilyClient {
    pub fn new(api_key: String, settings: TavilySettings) -> Self {
        Self {
            http: Client::new(),
            api_key,
            settings,
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.settings.base_url.trim_end_matches('/'))
    }

    fn body<'a>(&self, query: &'a str) -> SearchBody<'a> {
        SearchBody {
            query,
            search_depth: self.settings.search_depth,
            topic: self.settings.topic,
            max_results: self.settings.max_results,
        }
    }
}

/// Pull a human readable message out of a Tavily error body.
/// Tavily reports `{"detail": {"error": "..."}}`; some proxies use `{"error": "..."}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value
        .pointer("/detail/error")
        .or_else(|| value.get("error"))
        .or_else(|| value.get("detail"))?;
    match message {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str) -> Result<Value, ProviderError> {
        let url = self.search_url();
        log::debug!("tavily search: {url}");

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.body(query))
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("{e:#}")))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            return Err(ProviderError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(format!("{e:#}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::Unknown(format!("invalid JSON from provider: {e}")))
    }

    fn name(&self) -> &str {
        "tavily"
    }
}
