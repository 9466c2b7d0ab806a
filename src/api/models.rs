use serde::{Deserialize, Serialize};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Body of `POST /`. The gateway does not validate it: a missing query is
/// forwarded as an empty string.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn generic() -> Self {
        Self {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
