pub mod comment;
pub mod hub;
pub mod reaction;
pub mod session;
pub mod view;

pub use hub::Hub;
pub use session::{MemoryStore, Session, SessionStore};

use std::sync::Arc;

use ovation_shared::EngagementGateway;

/// Everything the engagement surfaces share: the remote gateway, the
/// per-subject hub and the caller's session. Created once at app start and
/// cloned into each surface.
pub struct State<G: EngagementGateway> {
    pub gateway: Arc<G>,
    pub hub: Hub,
    pub session: Session,
}

impl<G: EngagementGateway> Clone for State<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            hub: self.hub.clone(),
            session: self.session.clone(),
        }
    }
}

impl<G: EngagementGateway> State<G> {
    pub fn new(gateway: G, session: Session) -> Self {
        Self {
            gateway: Arc::new(gateway),
            hub: Hub::default(),
            session,
        }
    }

    pub fn reaction(&self) -> reaction::Command<G> {
        reaction::Command::new(self.clone())
    }

    pub fn view(&self) -> view::Tracker<G> {
        view::Tracker::new(self.clone())
    }

    pub fn comment(&self) -> comment::Counter<G> {
        comment::Counter::new(self.clone())
    }
}
