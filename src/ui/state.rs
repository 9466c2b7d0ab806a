use serde::{Deserialize, Serialize};

use super::UiError;

/// Number of characters of `content` shown on a result card.
pub const PREVIEW_CHARS: usize = 180;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter something";
pub const REQUEST_FAILED_MESSAGE: &str = "Error while calling API";
pub const DELETED_MESSAGE: &str = "Resources Deleted";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub content: String,
    pub url: String,
}

impl ResultItem {
    pub fn preview(&self) -> &str {
        match self.content.char_indices().nth(PREVIEW_CHARS) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}

/// What the UI reads out of a gateway response. Any other provider fields
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<ResultItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Populated,
    ConfirmingDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Self {
            level: Level::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            level: Level::Error,
            message: message.to_string(),
        }
    }
}

/// Why `begin_submit` did not start a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// The query was empty or whitespace only.
    EmptyQuery(Notification),
    /// A request is already in flight; the trigger is dropped.
    InFlight,
}

/// Transient view state of the search screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub results: Vec<ResultItem>,
    pub loading: bool,
    pub dialog_open: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialog overlays every other phase.
    pub fn phase(&self) -> Phase {
        if self.dialog_open {
            Phase::ConfirmingDelete
        } else if self.loading {
            Phase::Loading
        } else if !self.results.is_empty() {
            Phase::Populated
        } else {
            Phase::Idle
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Start a submit. On success returns the query to send and the state is
    /// `Loading`; on rejection the state is untouched.
    pub fn begin_submit(&mut self) -> Result<String, SubmitRejected> {
        if self.loading {
            return Err(SubmitRejected::InFlight);
        }
        if self.query.trim().is_empty() {
            return Err(SubmitRejected::EmptyQuery(Notification::error(
                EMPTY_QUERY_MESSAGE,
            )));
        }
        self.loading = true;
        Ok(self.query.clone())
    }

    /// Apply the outcome of the request started by `begin_submit`.
    /// Results from a failed request are left as they were.
    pub fn complete_submit(
        &mut self,
        outcome: Result<SearchResponse, UiError>,
    ) -> Option<Notification> {
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.results = response.results;
                self.dialog_open = false;
                None
            }
            Err(_) => Some(Notification::error(REQUEST_FAILED_MESSAGE)),
        }
    }

    /// Open the confirmation dialog. Only possible while results are shown.
    pub fn request_delete(&mut self) -> bool {
        if self.results.is_empty() || self.dialog_open {
            return false;
        }
        self.dialog_open = true;
        true
    }

    pub fn confirm_delete(&mut self) -> Option<Notification> {
        if !self.dialog_open {
            return None;
        }
        *self = ViewState::default();
        Some(Notification::success(DELETED_MESSAGE))
    }

    pub fn cancel_delete(&mut self) {
        self.dialog_open = false;
    }
}
