use std::{ops::Deref, time::Duration};

use ovation_shared::EngagementGateway;
use tokio::sync::watch;

use crate::State;

/// Quiet window absorbing repeated triggers from re-renders.
pub const VIEW_DEBOUNCE: Duration = Duration::from_millis(300);

/// Counts a detail-view open at most once per browser session. Views are
/// best-effort telemetry: failures are logged, never retried.
pub struct Tracker<G: EngagementGateway> {
    state: State<G>,
}

impl<G: EngagementGateway> Deref for Tracker<G> {
    type Target = State<G>;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<G: EngagementGateway> Tracker<G> {
    pub(crate) fn new(state: State<G>) -> Self {
        Self { state }
    }

    /// Register one view of a subject. Rapid repeated calls before the
    /// debounce fires collapse into a single gateway call; once counted,
    /// later calls in the same session are no-ops. The displayed count is
    /// whatever the server returns, since server-side counting applies its
    /// own rules.
    pub fn register(&self, subject_id: &str)
    where
        G: 'static,
    {
        if self.session.viewed(subject_id) {
            return;
        }
        if !self.hub.begin_view(subject_id) {
            return;
        }

        let state = self.state.clone();
        let subject_id = subject_id.to_owned();
        tokio::spawn(async move {
            tokio::time::sleep(VIEW_DEBOUNCE).await;

            // Mark before calling so a transient failure never produces a
            // second attempt within the session.
            state.session.mark_viewed(&subject_id);
            state.hub.end_view(&subject_id);

            match state.gateway.increment_view(&subject_id).await {
                Ok(count) => state.hub.set_views(&subject_id, count),
                Err(err) => {
                    tracing::warn!("view increment failed for {subject_id}: {err}");
                }
            }
        });
    }

    pub fn subscribe(&self, subject_id: &str) -> watch::Receiver<u64> {
        self.hub.views(subject_id)
    }
}
