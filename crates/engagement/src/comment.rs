use std::ops::Deref;

use ovation_shared::{EngagementGateway, Result};
use tokio::sync::watch;

use crate::State;

/// Comment count shared by every surface rendering the same subject. All
/// mutation sites publish through the hub channel, so a count change in the
/// detail modal reaches the originating card without threaded callbacks.
pub struct Counter<G: EngagementGateway> {
    state: State<G>,
}

impl<G: EngagementGateway> Deref for Counter<G> {
    type Target = State<G>;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<G: EngagementGateway> Counter<G> {
    pub(crate) fn new(state: State<G>) -> Self {
        Self { state }
    }

    /// Overwrite after an authoritative fetch.
    pub fn set(&self, subject_id: &str, count: u64) {
        self.hub.comment_sender(subject_id).send_replace(count);
    }

    /// A local comment add succeeded; bump before server confirmation.
    pub fn increment(&self, subject_id: &str) {
        self.hub
            .comment_sender(subject_id)
            .send_modify(|count| *count += 1);
    }

    /// A local comment delete succeeded. Floors at zero.
    pub fn decrement(&self, subject_id: &str) {
        self.hub
            .comment_sender(subject_id)
            .send_modify(|count| *count = count.saturating_sub(1));
    }

    /// Fetch the authoritative count. On failure the displayed value stays
    /// and the error is returned to the caller; subscribers see nothing.
    pub async fn refresh(&self, subject_id: &str) -> Result<u64> {
        let count = self.gateway.comment_count(subject_id).await?;
        self.set(subject_id, count);
        Ok(count)
    }

    pub fn subscribe(&self, subject_id: &str) -> watch::Receiver<u64> {
        self.hub.comments(subject_id)
    }
}
