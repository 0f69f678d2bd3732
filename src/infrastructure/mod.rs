// External collaborators: provider API client, session storage

pub mod provider;
pub mod session;

pub use provider::{ChunkStream, GroqClient, ProviderClient, ProviderError};
pub use session::{InMemorySessionStore, SessionContext, SessionId, SessionStore};
