use async_trait::async_trait;

use crate::{ReactionKind, ReactionSnapshot, Result};

/// Remote engagement endpoints, JSON over HTTP. Implemented by the host
/// application's transport layer; the engine only depends on this trait.
#[async_trait]
pub trait EngagementGateway: Send + Sync {
    /// Set or replace the caller's reaction. Returns the server snapshot
    /// when the endpoint provides one in its response body.
    async fn set_reaction(
        &self,
        subject_id: &str,
        kind: ReactionKind,
    ) -> Result<Option<ReactionSnapshot>>;

    /// Remove the caller's reaction.
    async fn clear_reaction(&self, subject_id: &str) -> Result<Option<ReactionSnapshot>>;

    /// Read the current reaction state for a subject.
    async fn reaction_snapshot(&self, subject_id: &str) -> Result<ReactionSnapshot>;

    /// Count one view, returning the server-side view total.
    async fn increment_view(&self, subject_id: &str) -> Result<u64>;

    /// Read the authoritative comment count.
    async fn comment_count(&self, subject_id: &str) -> Result<u64>;
}
