use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use ovation_shared::ReactionSnapshot;
use tokio::sync::watch;

use crate::reaction::ReactionState;

/// Per-subject channel registry shared by every surface rendering the same
/// subject. Injected at app start; subjects are created lazily on first
/// touch and dropped by [`Hub::release`] when their last view unmounts.
#[derive(Clone, Default)]
pub struct Hub {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    subjects: HashMap<String, Subject>,
    pending_views: HashSet<String>,
}

struct Subject {
    reactions: watch::Sender<ReactionState>,
    comments: watch::Sender<u64>,
    views: watch::Sender<u64>,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            reactions: watch::Sender::new(ReactionState::default()),
            comments: watch::Sender::new(0),
            views: watch::Sender::new(0),
        }
    }
}

impl Hub {
    pub fn reactions(&self, subject_id: &str) -> watch::Receiver<ReactionState> {
        self.with_subject(subject_id, |subject| subject.reactions.subscribe())
    }

    pub fn comments(&self, subject_id: &str) -> watch::Receiver<u64> {
        self.with_subject(subject_id, |subject| subject.comments.subscribe())
    }

    pub fn views(&self, subject_id: &str) -> watch::Receiver<u64> {
        self.with_subject(subject_id, |subject| subject.views.subscribe())
    }

    /// Initial reaction state from the embedded page payload or a session
    /// cache.
    pub fn seed(&self, subject_id: &str, snapshot: &ReactionSnapshot) {
        self.with_subject(subject_id, |subject| {
            subject.reactions.send_modify(|state| state.restore(snapshot));
        });
    }

    /// Drop a subject's channels once its last view unmounts.
    pub fn release(&self, subject_id: &str) {
        let mut inner = self.lock();
        inner.subjects.remove(subject_id);
        inner.pending_views.remove(subject_id);
    }

    pub(crate) fn reaction_sender(&self, subject_id: &str) -> watch::Sender<ReactionState> {
        self.with_subject(subject_id, |subject| subject.reactions.clone())
    }

    pub(crate) fn comment_sender(&self, subject_id: &str) -> watch::Sender<u64> {
        self.with_subject(subject_id, |subject| subject.comments.clone())
    }

    pub(crate) fn set_views(&self, subject_id: &str, count: u64) {
        self.with_subject(subject_id, |subject| {
            subject.views.send_replace(count);
        });
    }

    /// Marks a view commit as in flight. Returns false when one is already
    /// pending for this subject.
    pub(crate) fn begin_view(&self, subject_id: &str) -> bool {
        self.lock().pending_views.insert(subject_id.to_owned())
    }

    pub(crate) fn end_view(&self, subject_id: &str) {
        self.lock().pending_views.remove(subject_id);
    }

    fn with_subject<T>(&self, subject_id: &str, f: impl FnOnce(&Subject) -> T) -> T {
        let mut inner = self.lock();
        let subject = inner.subjects.entry(subject_id.to_owned()).or_default();
        f(subject)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
