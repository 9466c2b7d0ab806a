use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod tavily;

pub use tavily::TavilyClient;

/// Why a call to the search provider failed.
///
/// The gateway never shows these to clients; they exist so failures can be
/// logged and tested by category.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("unexpected provider failure: {0}")]
    Unknown(String),
}

impl ProviderError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Network(_) => "network",
            ProviderError::Provider { .. } => "provider",
            ProviderError::Unknown(_) => "unknown",
        }
    }
}

/// A hosted search backend the gateway forwards queries to.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return the provider's response body untouched.
    async fn search(&self, query: &str) -> Result<Value, ProviderError>;

    fn name(&self) -> &str;
}

#[test]
fn test_error_kinds() {
    assert_eq!(ProviderError::Network("refused".into()).kind(), "network");
    assert_eq!(
        ProviderError::Provider {
            status: 401,
            message: "Unauthorized".into()
        }
        .kind(),
        "provider"
    );
    assert_eq!(ProviderError::Unknown("boom".into()).kind(), "unknown");
}
