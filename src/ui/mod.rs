//! Search screen logic: view state, the gateway client and the submit flow.
//! Rendering is left to whoever drives a [`SearchSession`].

use thiserror::Error;

pub mod client;
pub mod session;
pub mod state;

pub use client::{GatewayClient, HttpGateway};
pub use session::{Notifier, SearchSession};
pub use state::{Level, Notification, Phase, ResultItem, SearchResponse, ViewState};

#[derive(Debug, Error)]
pub enum UiError {
    #[error("gateway request failed: {0}")]
    Request(String),

    #[error("invalid gateway url {0:?}")]
    InvalidUrl(String),
}
