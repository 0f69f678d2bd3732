//! Chat relay
//!
//! Appends the user's message to the session transcript, streams the
//! provider's completion as `RelayEvent`s, and stores the assembled answer
//! once the provider is done. The events go through a channel so the relay
//! runs the same way behind an HTTP response or in a test.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::domain::models::{ChatTurn, ModelSelection, RelayEvent};
use crate::infrastructure::provider::ProviderClient;
use crate::infrastructure::session::SessionContext;
use crate::shared::logging::{
    log_relay_complete, log_relay_disconnected, log_relay_error, log_relay_start,
};

/// Events buffered between the relay task and the response body
const RELAY_CHANNEL_CAPACITY: usize = 100;

/// Relay events for one request. Dropping it stops the relay.
pub type RelayStream = ReceiverStream<RelayEvent>;

#[derive(Clone)]
pub struct ChatRelay {
    provider: Arc<dyn ProviderClient>,
}

impl ChatRelay {
    pub fn new(provider: Arc<dyn ProviderClient>) -> Self {
        Self { provider }
    }

    /// Record the user's message and start relaying the answer.
    ///
    /// The user turn is stored before this returns and is kept whatever
    /// happens to the stream afterwards.
    pub async fn start(
        &self,
        session: SessionContext,
        message: String,
        model: ModelSelection,
    ) -> RelayStream {
        session.append(ChatTurn::user(message)).await;

        let (tx, rx) = mpsc::channel(RELAY_CHANNEL_CAPACITY);
        let provider = self.provider.clone();
        tokio::spawn(async move {
            run_relay(provider, session, model, tx).await;
        });

        ReceiverStream::new(rx)
    }
}

async fn run_relay(
    provider: Arc<dyn ProviderClient>,
    session: SessionContext,
    model: ModelSelection,
    tx: mpsc::Sender<RelayEvent>,
) {
    let session_id = session.session_id().to_string();
    let transcript = session.transcript().await;
    log_relay_start(&session_id, model.as_str(), transcript.len());
    if !model.is_listed() {
        tracing::warn!(model = %model, "Model is not in the picker list, forwarding as-is");
    }

    let mut chunks = match provider.stream_chat(model.as_str(), transcript.turns()).await {
        Ok(chunks) => chunks,
        Err(e) => {
            let message = e.to_string();
            log_relay_error(&session_id, &message);
            let _ = tx.send(RelayEvent::Error(message)).await;
            return;
        }
    };

    let mut full_response = String::new();
    let mut chunk_count = 0usize;

    while let Some(chunk) = chunks.next().await {
        match chunk {
            Ok(delta) if delta.is_empty() => {}
            Ok(delta) => {
                full_response.push_str(&delta);
                chunk_count += 1;
                if tx.send(RelayEvent::Content(delta)).await.is_err() {
                    log_relay_disconnected(&session_id, chunk_count);
                    return;
                }
            }
            Err(e) => {
                let message = e.to_string();
                log_relay_error(&session_id, &message);
                let _ = tx.send(RelayEvent::Error(message)).await;
                return;
            }
        }
    }

    log_relay_complete(&session_id, chunk_count, full_response.len());
    session.append(ChatTurn::assistant(full_response)).await;
    let _ = tx.send(RelayEvent::Done).await;
}
