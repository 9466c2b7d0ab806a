use axum::{Json, extract::State};
use serde_json::Value;

use super::AppState;
use super::error::GatewayError;
use super::models::SearchRequest;

pub async fn search_handler(
    State(state): State<AppState>,
    request: Option<Json<SearchRequest>>,
) -> Result<Json<Value>, GatewayError> {
    let query = request
        .and_then(|Json(request)| request.query)
        .unwrap_or_default();
    tracing::info!(query = %query, provider = state.provider.name(), "search request");

    match state.provider.search(&query).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let err = GatewayError::from(e);
            tracing::error!(kind = err.kind(), error = %err, "search failed");
            Err(err)
        }
    }
}
