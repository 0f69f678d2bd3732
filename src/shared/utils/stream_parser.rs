//! Client side of the chat relay
//!
//! Mirrors what the page script does with the `text/event-stream` body:
//! buffer partial lines, decode every `data: ` line, and track the request
//! through `Idle -> Streaming -> (Done | Error)`.

use crate::domain::models::{DATA_PREFIX, EventPayload};

use super::line_buffer::LineBuffer;

/// Lifecycle of one relayed request as seen by the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    Idle,
    Streaming,
    Done,
    Error,
}

impl ConsumerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConsumerState::Done | ConsumerState::Error)
    }
}

/// What changed after feeding bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerUpdate {
    Content(String),
    Error(String),
    Done,
}

#[derive(Debug)]
pub struct RelayConsumer {
    state: ConsumerState,
    lines: LineBuffer,
    assistant_text: String,
    error: Option<String>,
}

impl Default for RelayConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayConsumer {
    pub fn new() -> Self {
        Self {
            state: ConsumerState::Idle,
            lines: LineBuffer::new(),
            assistant_text: String::new(),
            error: None,
        }
    }

    pub fn state(&self) -> ConsumerState {
        self.state
    }

    /// Text accumulated for the assistant message so far
    pub fn assistant_text(&self) -> &str {
        &self.assistant_text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Feed a chunk of the response body. Input after a terminal event is ignored.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<ConsumerUpdate> {
        let mut updates = Vec::new();
        if self.state.is_terminal() {
            return updates;
        }
        self.state = ConsumerState::Streaming;
        self.lines.push(bytes);

        while let Some(line) = self.lines.next_line() {
            if let Some(update) = self.process_line(&line) {
                updates.push(update);
            }
            if self.state.is_terminal() {
                break;
            }
        }

        updates
    }

    /// Body ended. A stream that stops without `[DONE]` or an error event was
    /// cut off in transit.
    pub fn finish(&mut self) -> ConsumerState {
        if !self.state.is_terminal() {
            self.fail("Stream ended before completion".to_string());
        }
        self.state
    }

    fn process_line(&mut self, line: &str) -> Option<ConsumerUpdate> {
        let data = line.strip_prefix(DATA_PREFIX)?;

        match EventPayload::parse(data) {
            Ok(None) => {
                self.state = ConsumerState::Done;
                Some(ConsumerUpdate::Done)
            }
            Ok(Some(EventPayload { error: Some(error), .. })) => {
                self.fail(error.clone());
                Some(ConsumerUpdate::Error(error))
            }
            Ok(Some(EventPayload { content: Some(content), .. })) if !content.is_empty() => {
                self.assistant_text.push_str(&content);
                Some(ConsumerUpdate::Content(content))
            }
            Ok(Some(_)) => None,
            Err(e) => {
                tracing::warn!("Failed to parse relay event: {} - Line: {}", e, line);
                let message = format!("Malformed relay event: {}", e);
                self.fail(message.clone());
                Some(ConsumerUpdate::Error(message))
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.state = ConsumerState::Error;
        self.error = Some(message);
    }
}
