use std::sync::Arc;

use crate::domain::services::ChatRelay;
use crate::infrastructure::provider::ProviderClient;
use crate::infrastructure::session::{SessionContext, SessionId, SessionStore};

/// Shared handler state, passed as an `Extension`
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ProviderClient>,
    pub sessions: Arc<dyn SessionStore>,
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(provider: Arc<dyn ProviderClient>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            relay: ChatRelay::new(provider.clone()),
            provider,
            sessions,
        }
    }

    /// Per-request context for one session
    pub fn session(&self, session_id: SessionId) -> SessionContext {
        SessionContext::new(self.sessions.clone(), session_id)
    }
}
