//! Session-scoped transcript storage

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::models::{ChatTurn, Transcript};

/// Identifier of one browser session (the session cookie value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a cookie value; anything that is not a UUID is rejected
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage of transcripts keyed by session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Snapshot of the session's transcript (empty for unknown sessions)
    async fn transcript(&self, session_id: &SessionId) -> Transcript;

    /// Append one turn at the end of the session's transcript
    async fn append(&self, session_id: &SessionId, turn: ChatTurn);
}

/// Process-local store. Sessions live until the process exits.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, Transcript>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn transcript(&self, session_id: &SessionId) -> Transcript {
        self.sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    async fn append(&self, session_id: &SessionId, turn: ChatTurn) {
        self.sessions.entry(*session_id).or_default().push(turn);
    }
}

/// Per-request view of one session: the store plus the caller's session id
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    session_id: SessionId,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>, session_id: SessionId) -> Self {
        Self { store, session_id }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub async fn transcript(&self) -> Transcript {
        self.store.transcript(&self.session_id).await
    }

    pub async fn append(&self, turn: ChatTurn) {
        self.store.append(&self.session_id, turn).await;
    }
}
