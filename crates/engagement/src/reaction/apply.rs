use ovation_shared::{EngagementGateway, Error, ReactionKind, Result};

use super::apply_server;

impl<G: EngagementGateway> super::Command<G> {
    /// Set, switch or clear the caller's reaction with immediate local
    /// feedback. Clicking the active reaction again clears it. The local
    /// apply is synchronous; the gateway call reconciles with server truth
    /// on success and rolls back the optimistic change on failure, unless
    /// a later apply has already superseded this one.
    pub async fn apply(&self, subject_id: &str, requested: Option<ReactionKind>) -> Result<()> {
        if self.session.user_id().is_none() {
            return Err(Error::AuthenticationRequired);
        }

        let reactions = self.hub.reaction_sender(subject_id);

        let mut before = None;
        let mut effective = requested;
        let mut token = 0;
        reactions.send_if_modified(|state| {
            if requested.is_some() && state.current == requested {
                effective = None;
            }
            if state.current.is_none() && effective.is_none() {
                return false;
            }
            before = Some(state.as_snapshot());
            state.apply_local(effective);
            token = state.version;
            true
        });

        // Nothing to remove and nothing to add.
        let Some(before) = before else {
            return Ok(());
        };

        let reply = match effective {
            Some(kind) => self.gateway.set_reaction(subject_id, kind).await,
            None => self.gateway.clear_reaction(subject_id).await,
        };

        match reply {
            Ok(Some(server)) => {
                if !apply_server(&reactions, token, &server) {
                    tracing::debug!("discarding stale reaction response for {subject_id}");
                }
                Ok(())
            }
            Ok(None) => {
                // Endpoint confirmed without a body; fetch current counts.
                match self.gateway.reaction_snapshot(subject_id).await {
                    Ok(server) => {
                        if !apply_server(&reactions, token, &server) {
                            tracing::debug!("discarding stale reaction snapshot for {subject_id}");
                        }
                    }
                    Err(err) => {
                        tracing::warn!("reaction snapshot refresh failed for {subject_id}: {err}");
                    }
                }
                Ok(())
            }
            Err(err) => {
                let rolled_back = reactions.send_if_modified(|state| {
                    if state.version != token {
                        return false;
                    }
                    state.restore(&before);
                    true
                });
                if !rolled_back {
                    tracing::debug!("skipping rollback of superseded reaction on {subject_id}");
                }
                Err(err)
            }
        }
    }
}
