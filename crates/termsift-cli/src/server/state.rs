//! Application state for the review server.

use std::sync::Arc;
use tokio::sync::RwLock;

use termsift::{Session, SessionSnapshot};

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    /// The session being reviewed. Every mutation replaces it wholesale.
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Create new application state around an existing session.
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Snapshot of the current session.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }
}
