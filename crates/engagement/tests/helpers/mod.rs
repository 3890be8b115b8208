use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use ovation_engagement::{Session, State};
use ovation_shared::{
    EngagementGateway, Error, ReactionCount, ReactionKind, ReactionSnapshot, Result,
};

/// A scripted reaction mutation reply.
pub struct Reply {
    pub delay: Duration,
    pub result: Result<Option<ReactionSnapshot>>,
}

impl Reply {
    pub fn ok(snapshot: ReactionSnapshot) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(Some(snapshot)),
        }
    }

    pub fn empty() -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(None),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(Error::gateway(message)),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// In-memory gateway. Reaction mutations pop scripted replies (empty
/// confirmation when the queue runs dry); view and comment endpoints count
/// their calls.
#[derive(Default)]
pub struct FakeGateway {
    replies: Mutex<VecDeque<Reply>>,
    snapshot_reply: Mutex<Option<ReactionSnapshot>>,
    pub reaction_calls: AtomicU64,
    pub snapshot_calls: AtomicU64,
    pub view_calls: AtomicU64,
    pub comment_calls: AtomicU64,
    pub view_total: AtomicU64,
    pub comment_total: AtomicU64,
    pub fail_views: AtomicBool,
    pub fail_comments: AtomicBool,
}

impl FakeGateway {
    pub fn push_reply(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn set_snapshot_reply(&self, snapshot: ReactionSnapshot) {
        *self.snapshot_reply.lock().unwrap() = Some(snapshot);
    }

    async fn mutate(&self) -> Result<Option<ReactionSnapshot>> {
        self.reaction_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.result
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl EngagementGateway for FakeGateway {
    async fn set_reaction(
        &self,
        _subject_id: &str,
        _kind: ReactionKind,
    ) -> Result<Option<ReactionSnapshot>> {
        self.mutate().await
    }

    async fn clear_reaction(&self, _subject_id: &str) -> Result<Option<ReactionSnapshot>> {
        self.mutate().await
    }

    async fn reaction_snapshot(&self, _subject_id: &str) -> Result<ReactionSnapshot> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        match self.snapshot_reply.lock().unwrap().clone() {
            Some(snapshot) => Ok(snapshot),
            None => Err(Error::gateway("snapshot unavailable")),
        }
    }

    async fn increment_view(&self, _subject_id: &str) -> Result<u64> {
        self.view_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_views.load(Ordering::SeqCst) {
            return Err(Error::gateway("view endpoint down"));
        }
        Ok(self.view_total.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn comment_count(&self, _subject_id: &str) -> Result<u64> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_comments.load(Ordering::SeqCst) {
            return Err(Error::gateway("comment endpoint down"));
        }
        Ok(self.comment_total.load(Ordering::SeqCst))
    }
}

/// Engine state for an authenticated caller.
pub fn signed_in_state(gateway: FakeGateway) -> State<FakeGateway> {
    init_tracing();
    State::new(gateway, Session::authenticated("user-1"))
}

pub fn anonymous_state(gateway: FakeGateway) -> State<FakeGateway> {
    init_tracing();
    State::new(gateway, Session::anonymous())
}

/// Build a snapshot with `top` derived from the counts, the way the server
/// reports it.
pub fn snapshot(
    counts: &[(ReactionKind, u64)],
    current: Option<ReactionKind>,
    total: u64,
) -> ReactionSnapshot {
    let mut top: Vec<ReactionCount> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| ReactionCount {
            kind: *kind,
            count: *count,
        })
        .collect();
    top.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.kind.priority().cmp(&b.kind.priority()))
    });
    top.truncate(3);

    let counts: HashMap<ReactionKind, u64> = counts.iter().copied().collect();
    ReactionSnapshot {
        counts,
        current,
        top,
        total,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
