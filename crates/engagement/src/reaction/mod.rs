mod apply;
mod refresh;
mod state;

pub use state::*;

use std::ops::Deref;

use ovation_shared::{EngagementGateway, ReactionSnapshot};
use tokio::sync::watch;

use crate::State;

pub struct Command<G: EngagementGateway> {
    state: State<G>,
}

impl<G: EngagementGateway> Deref for Command<G> {
    type Target = State<G>;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<G: EngagementGateway> Command<G> {
    pub(crate) fn new(state: State<G>) -> Self {
        Self { state }
    }

    /// Initial state for a freshly mounted subject view, from the embedded
    /// page payload or a session cache.
    pub fn seed(&self, subject_id: &str, snapshot: &ReactionSnapshot) {
        self.hub.seed(subject_id, snapshot);
    }

    pub fn subscribe(&self, subject_id: &str) -> watch::Receiver<ReactionState> {
        self.hub.reactions(subject_id)
    }

    pub fn snapshot(&self, subject_id: &str) -> ReactionSnapshot {
        self.hub.reactions(subject_id).borrow().as_snapshot()
    }
}

/// Applies server truth only if the local version still matches the one
/// the caller captured; a mismatch means the response is stale and must
/// not clobber newer state.
fn apply_server(
    reactions: &watch::Sender<ReactionState>,
    token: u64,
    server: &ReactionSnapshot,
) -> bool {
    reactions.send_if_modified(|state| {
        if state.version != token {
            return false;
        }
        state.restore(server);
        true
    })
}
