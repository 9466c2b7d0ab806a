use anyhow::Result;
use async_trait::async_trait;
use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use articlenest::api::{AppState, create_router};
use articlenest::provider::{ProviderError, SearchProvider};
use articlenest::ui::state::{DELETED_MESSAGE, EMPTY_QUERY_MESSAGE, REQUEST_FAILED_MESSAGE};
use articlenest::ui::{
    GatewayClient, HttpGateway, Notification, Phase, ResultItem, SearchResponse, SearchSession,
    UiError, ViewState,
};

mod test_helpers {
    use super::*;

    /// Gateway double that replays canned outcomes and records every call.
    pub struct ScriptedGateway {
        pub outcomes: Mutex<Vec<Result<SearchResponse, UiError>>>,
        pub calls: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedGateway {
        pub fn new(outcomes: Vec<Result<SearchResponse, UiError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into_iter().rev().collect()),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl GatewayClient for ScriptedGateway {
        async fn search(&self, query: &str) -> Result<SearchResponse, UiError> {
            self.calls.lock().unwrap().push(query.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(UiError::Request("no scripted outcome".into())))
        }
    }

    pub fn item(title: &str) -> ResultItem {
        ResultItem {
            title: title.to_string(),
            content: format!("about {title}"),
            url: format!("http://{title}.example"),
        }
    }

    /// Provider that answers through a real gateway bound on localhost.
    pub struct StubProvider {
        pub response: Option<Value>,
        pub queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        async fn search(&self, query: &str) -> Result<Value, ProviderError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.response.clone().ok_or(ProviderError::Provider {
                status: 401,
                message: "Unauthorized".into(),
            })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    pub async fn spawn_gateway(provider: Arc<StubProvider>) -> Result<SocketAddr> {
        let router = create_router(AppState::new(provider), "http://localhost:5173")?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        Ok(addr)
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_non_empty_query_makes_exactly_one_call() -> Result<()> {
    let gateway = ScriptedGateway::new(vec![Ok(SearchResponse {
        results: vec![item("a")],
    })]);
    let calls = gateway.calls.clone();
    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());

    session.set_query("rust lifetimes");
    assert!(session.submit().await);

    assert_eq!(*calls.lock().unwrap(), vec!["rust lifetimes".to_string()]);
    assert_eq!(session.state().phase(), Phase::Populated);
    assert!(session.notifier().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_query_never_reaches_network() -> Result<()> {
    let gateway = ScriptedGateway::new(vec![]);
    let calls = gateway.calls.clone();
    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());

    for query in ["", "  ", "\n\t"] {
        session.set_query(query);
        assert!(!session.submit().await);
    }

    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(session.notifier().len(), 3);
    assert!(
        session
            .notifier()
            .iter()
            .all(|n| *n == Notification::error(EMPTY_QUERY_MESSAGE))
    );
    assert_eq!(session.state().phase(), Phase::Idle);
    Ok(())
}

#[tokio::test]
async fn test_failure_after_success_keeps_old_results() -> Result<()> {
    let gateway = ScriptedGateway::new(vec![
        Ok(SearchResponse {
            results: vec![item("a"), item("b")],
        }),
        Err(UiError::Request("gateway returned 500".into())),
    ]);
    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());

    session.set_query("first");
    session.submit().await;
    let before = session.state().results.clone();

    session.set_query("second");
    session.submit().await;

    assert_eq!(session.state().results, before);
    assert!(!session.state().loading);
    // earlier results stay on screen, so the screen is still populated
    assert_eq!(session.state().phase(), Phase::Populated);
    assert_eq!(
        session.notifier().as_slice(),
        &[Notification::error(REQUEST_FAILED_MESSAGE)]
    );
    Ok(())
}

#[tokio::test]
async fn test_confirm_delete_resets_everything() -> Result<()> {
    let gateway = ScriptedGateway::new(vec![Ok(SearchResponse {
        results: vec![item("a"), item("b"), item("c")],
    })]);
    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());

    session.set_query("rust");
    session.submit().await;

    assert!(session.request_delete());
    session.cancel_delete();
    assert_eq!(session.state().phase(), Phase::Populated);

    assert!(session.request_delete());
    session.confirm_delete();

    assert_eq!(*session.state(), ViewState::default());
    assert_eq!(
        session.notifier().last(),
        Some(&Notification::success(DELETED_MESSAGE))
    );
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_through_gateway() -> Result<()> {
    let long_content = "x".repeat(200);
    let provider = Arc::new(StubProvider {
        response: Some(json!({
            "query": "a",
            "response_time": 0.5,
            "results": [{"title": "A", "content": long_content, "url": "http://a", "score": 0.9}]
        })),
        queries: Mutex::new(Vec::new()),
    });
    let addr = spawn_gateway(provider.clone()).await?;

    let gateway = HttpGateway::new(&format!("http://{addr}"))?;
    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());
    session.set_query("a");
    assert!(session.submit().await);

    let state = session.state();
    assert_eq!(state.phase(), Phase::Populated);
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].title, "A");
    assert_eq!(state.results[0].url, "http://a");
    assert_eq!(state.results[0].preview().chars().count(), 180);
    assert_eq!(*provider.queries.lock().unwrap(), vec!["a".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_gateway_error() -> Result<()> {
    let provider = Arc::new(StubProvider {
        response: None,
        queries: Mutex::new(Vec::new()),
    });
    let addr = spawn_gateway(provider).await?;

    let gateway = HttpGateway::new(&format!("http://{addr}"))?;
    let err = gateway.search("rust").await.unwrap_err();
    assert!(matches!(err, UiError::Request(_)));

    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());
    session.set_query("rust");
    session.submit().await;
    assert_eq!(session.state().phase(), Phase::Idle);
    assert_eq!(
        session.notifier().as_slice(),
        &[Notification::error(REQUEST_FAILED_MESSAGE)]
    );
    Ok(())
}

#[tokio::test]
async fn test_only_200_counts_as_success() -> Result<()> {
    let router = Router::new().route(
        "/",
        post(|| async {
            (
                StatusCode::CREATED,
                Json(json!({
                    "results": [{"title": "A", "content": "x", "url": "http://a"}]
                })),
            )
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    let gateway = HttpGateway::new(&format!("http://{addr}"))?;
    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());
    session.set_query("rust");
    session.submit().await;

    assert_ne!(session.state().phase(), Phase::Populated);
    assert!(session.state().results.is_empty());
    assert_eq!(
        session.notifier().as_slice(),
        &[Notification::error(REQUEST_FAILED_MESSAGE)]
    );
    Ok(())
}

#[tokio::test]
async fn test_unreachable_gateway_is_reported_the_same_way() -> Result<()> {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let gateway = HttpGateway::new(&format!("http://{addr}"))?;
    let mut session = SearchSession::new(gateway, Vec::<Notification>::new());
    session.set_query("rust");
    session.submit().await;

    assert_eq!(
        session.notifier().as_slice(),
        &[Notification::error(REQUEST_FAILED_MESSAGE)]
    );
    assert!(!session.state().loading);
    Ok(())
}
