use serde::{Deserialize, Serialize};

/// Payload of the terminal event
pub const DONE_SENTINEL: &str = "[DONE]";

/// Event marker prefixing every relayed line
pub const DATA_PREFIX: &str = "data: ";

/// One event of a chat relay, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// Incremental text of the assistant response
    Content(String),
    /// Provider failure; always the last event of its stream
    Error(String),
    /// Response complete and stored
    Done,
}

impl RelayEvent {
    /// Text following `data: ` on the wire
    pub fn data(&self) -> String {
        match self {
            RelayEvent::Content(content) => serde_json::json!({ "content": content }).to_string(),
            RelayEvent::Error(error) => serde_json::json!({ "error": error }).to_string(),
            RelayEvent::Done => DONE_SENTINEL.to_string(),
        }
    }

    /// Full wire frame, `data: <payload>\n\n`
    pub fn to_frame(&self) -> String {
        format!("{}{}\n\n", DATA_PREFIX, self.data())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RelayEvent::Error(_) | RelayEvent::Done)
    }
}

/// JSON body of a non-terminal event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventPayload {
    /// Decode the text after `data: `
    pub fn parse(data: &str) -> Result<Option<Self>, serde_json::Error> {
        if data == DONE_SENTINEL {
            return Ok(None);
        }
        serde_json::from_str(data).map(Some)
    }
}
