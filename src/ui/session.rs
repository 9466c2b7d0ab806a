use super::client::GatewayClient;
use super::state::{Notification, SubmitRejected, ViewState};

/// Receives the transient messages the screen would pop up.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Owns the view state of one search screen and runs user actions against it.
pub struct SearchSession<G, N> {
    gateway: G,
    notifier: N,
    state: ViewState,
}

impl<G, N> SearchSession<G, N>
where
    G: GatewayClient,
    N: Notifier,
{
    pub fn new(gateway: G, notifier: N) -> Self {
        Self {
            gateway,
            notifier,
            state: ViewState::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    /// Button click or Enter. Returns whether a request was sent.
    pub async fn submit(&mut self) -> bool {
        let query = match self.state.begin_submit() {
            Ok(query) => query,
            Err(SubmitRejected::EmptyQuery(notification)) => {
                self.notifier.notify(notification);
                return false;
            }
            Err(SubmitRejected::InFlight) => return false,
        };

        let outcome = self.gateway.search(&query).await;
        if let Err(e) = &outcome {
            tracing::warn!("search request failed: {e}");
        }
        if let Some(notification) = self.state.complete_submit(outcome) {
            self.notifier.notify(notification);
        }
        true
    }

    pub fn request_delete(&mut self) -> bool {
        self.state.request_delete()
    }

    pub fn confirm_delete(&mut self) {
        if let Some(notification) = self.state.confirm_delete() {
            self.notifier.notify(notification);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }
}
