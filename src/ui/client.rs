use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::json;

use super::UiError;
use super::state::SearchResponse;

#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, UiError>;
}

/// Talks to the search gateway over HTTP.
pub struct HttpGateway {
    http: Client,
    url: Url,
}

impl HttpGateway {
    pub fn new(url: &str) -> Result<Self, UiError> {
        let url = Url::parse(url).map_err(|_| UiError::InvalidUrl(url.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UiError::InvalidUrl(url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            url,
        })
    }

}

#[async_trait]
impl GatewayClient for HttpGateway {
    // Only a 200 counts. A 500 from the gateway and a dropped connection look
    // the same to the caller.
    async fn search(&self, query: &str) -> Result<SearchResponse, UiError> {
        let res = self
            .http
            .post(self.url.clone())
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| UiError::Request(format!("{e:#}")))?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(UiError::Request(format!("gateway returned {status}")));
        }

        res.json::<SearchResponse>()
            .await
            .map_err(|e| UiError::Request(format!("{e:#}")))
    }
}

#[test]
fn test_gateway_url_validation() {
    assert!(HttpGateway::new("http://localhost:8080").is_ok());
    assert!(HttpGateway::new("https://articlenest.example/").is_ok());
    assert!(matches!(
        HttpGateway::new("not a url"),
        Err(UiError::InvalidUrl(_))
    ));
    assert!(matches!(
        HttpGateway::new("ftp://example.com"),
        Err(UiError::InvalidUrl(_))
    ));
}
