use ovation_shared::{EngagementGateway, Result};

use super::apply_server;

impl<G: EngagementGateway> super::Command<G> {
    /// Re-read authoritative state, e.g. when a subject mounts without
    /// embedded engagement data. Discarded if the user reacted while the
    /// read was in flight.
    pub async fn refresh(&self, subject_id: &str) -> Result<()> {
        let reactions = self.hub.reaction_sender(subject_id);
        let token = reactions.borrow().version;

        let server = self.gateway.reaction_snapshot(subject_id).await?;

        if !apply_server(&reactions, token, &server) {
            tracing::debug!("discarding stale reaction snapshot for {subject_id}");
        }
        Ok(())
    }
}
