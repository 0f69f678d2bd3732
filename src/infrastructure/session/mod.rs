pub mod cookie;
pub mod store;

pub use cookie::{ResolvedSession, SESSION_COOKIE, session_from_headers};
pub use store::{InMemorySessionStore, SessionContext, SessionId, SessionStore};
