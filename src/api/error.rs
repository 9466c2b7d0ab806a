use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::provider::ProviderError;

use super::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Provider(e) => e.kind(),
        }
    }
}

// Clients only ever see the generic message, whatever went wrong.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::generic())).into_response()
    }
}

#[test]
fn test_kind_follows_provider_error() {
    let err = GatewayError::from(ProviderError::Network("reset".into()));
    assert_eq!(err.kind(), "network");

    let err = GatewayError::from(ProviderError::Provider {
        status: 401,
        message: "Unauthorized".into(),
    });
    assert_eq!(err.kind(), "provider");
    assert_eq!(err.to_string(), "provider returned 401: Unauthorized");
}
