use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Session-scoped key/value flags, cleared when the browser session ends.
/// The browser host backs this with sessionStorage; tests and native hosts
/// use [`MemoryStore`].
pub trait SessionStore: Send + Sync {
    fn contains(&self, key: &str) -> bool;
    fn mark(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryStore {
    keys: Mutex<HashSet<String>>,
}

impl SessionStore for MemoryStore {
    fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    fn mark(&self, key: &str) {
        self.lock().insert(key.to_owned());
    }
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The acting caller: an optional authenticated user plus the browser
/// session's scoped storage.
#[derive(Clone)]
pub struct Session {
    user_id: Option<String>,
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(user_id: Option<String>, store: Arc<dyn SessionStore>) -> Self {
        Self { user_id, store }
    }

    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self::new(Some(user_id.into()), Arc::new(MemoryStore::default()))
    }

    pub fn anonymous() -> Self {
        Self::new(None, Arc::new(MemoryStore::default()))
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub(crate) fn viewed(&self, subject_id: &str) -> bool {
        self.store.contains(&view_key(subject_id))
    }

    pub(crate) fn mark_viewed(&self, subject_id: &str) {
        self.store.mark(&view_key(subject_id));
    }
}

fn view_key(subject_id: &str) -> String {
    format!("viewed:{subject_id}")
}
