//! Groq API client (OpenAI-compatible `chat/completions`)

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::types::{
    ApiErrorBody, ChatChunk, ChatCompletion, ChatRequest, ContentPart, ImageUrl, MessageContent,
    RequestMessage,
};
use super::{ChunkStream, ProviderClient, ProviderError};
use crate::config::AppConfig;
use crate::domain::models::{ChatTurn, DONE_SENTINEL, Role, UploadedImage};
use crate::shared::logging::{log_provider_request, log_provider_status};
use crate::shared::utils::LineBuffer;

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Buffered chunks between the HTTP body reader and the relay
const CHUNK_CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    vision_model: String,
}

impl GroqClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        vision_model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("groq-web-chat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            vision_model: vision_model.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(&config.base_url, &config.api_key, &config.vision_model)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH)
    }

    /// POST a request and turn non-2xx statuses into `ProviderError::Status`
    async fn send(&self, request: &ChatRequest) -> Result<reqwest::Response, ProviderError> {
        let endpoint = self.endpoint();
        log_provider_request(&endpoint, &request.model, request.stream);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        log_provider_status(&endpoint, status.as_u16());
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        Err(ProviderError::Status {
            status: status.as_u16(),
            message: error_summary(&body),
        })
    }

    async fn complete_request(&self, request: &ChatRequest) -> Result<ChatCompletion, ProviderError> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProviderClient for GroqClient {
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatTurn],
    ) -> Result<ChunkStream, ProviderError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: messages.iter().map(RequestMessage::from).collect(),
            stream: true,
        };
        let response = self.send(&request).await?;

        let (tx, rx) = mpsc::channel::<Result<String, ProviderError>>(CHUNK_CHANNEL_CAPACITY);

        // Reader task runs until the stream finishes or the receiver is dropped
        tokio::spawn(async move {
            let mut body = response.bytes_stream();
            let mut lines = LineBuffer::new();

            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(Err(ProviderError::Request(e))).await;
                        return;
                    }
                };
                lines.push(&bytes);
                if !forward_lines(&mut lines, &tx).await {
                    return;
                }
            }

            // Final line may arrive without its newline
            if !lines.is_empty() {
                lines.push(b"\n");
                if !forward_lines(&mut lines, &tx).await {
                    return;
                }
            }

            // Body ended without [DONE]: the connection was cut mid-answer
            tracing::warn!("Provider stream ended before [DONE]");
            let _ = tx
                .send(Err(ProviderError::Decode(
                    "stream ended before [DONE]".to_string(),
                )))
                .await;
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }

    async fn analyze_image(
        &self,
        image: &UploadedImage,
        prompt: &str,
    ) -> Result<ChatCompletion, ProviderError> {
        let request = ChatRequest {
            model: self.vision_model.clone(),
            messages: vec![RequestMessage {
                role: Role::User,
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_data_url(),
                        },
                    },
                ]),
            }],
            stream: false,
        };
        self.complete_request(&request).await
    }
}

/// Forward every complete buffered line. Returns `false` once nothing more
/// should be read.
async fn forward_lines(
    lines: &mut LineBuffer,
    tx: &mpsc::Sender<Result<String, ProviderError>>,
) -> bool {
    while let Some(line) = lines.next_line() {
        match parse_stream_line(&line) {
            StreamLine::Skip => {}
            StreamLine::Chunk(content) => {
                if tx.send(Ok(content)).await.is_err() {
                    tracing::debug!("Chunk receiver dropped, closing provider stream");
                    return false;
                }
            }
            StreamLine::Done => return false,
            StreamLine::Error(e) => {
                let _ = tx.send(Err(e)).await;
                return false;
            }
        }
    }
    true
}

/// Meaning of one line of the provider's event stream
#[derive(Debug)]
enum StreamLine {
    Skip,
    Chunk(String),
    Done,
    Error(ProviderError),
}

fn parse_stream_line(line: &str) -> StreamLine {
    let Some(payload) = line.strip_prefix("data:").map(str::trim_start) else {
        return StreamLine::Skip;
    };

    if payload == DONE_SENTINEL {
        return StreamLine::Done;
    }
    if payload.trim().is_empty() {
        return StreamLine::Skip;
    }

    match serde_json::from_str::<ChatChunk>(payload) {
        Ok(chunk) => match chunk.choices.into_iter().next().and_then(|c| c.delta.content) {
            Some(content) => StreamLine::Chunk(content),
            None => StreamLine::Skip,
        },
        Err(e) => match serde_json::from_str::<ApiErrorBody>(payload) {
            Ok(body) => StreamLine::Error(ProviderError::Api(body.error.message)),
            Err(_) => StreamLine::Error(ProviderError::Decode(format!(
                "{}: {}",
                e,
                payload.trim()
            ))),
        },
    }
}

/// Human-readable message from an error response body
fn error_summary(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(trimmed) {
        return match parsed.error.kind {
            Some(kind) => format!("{} ({})", parsed.error.message, kind),
            None => parsed.error.message,
        };
    }
    if trimmed.is_empty() {
        "<empty>".to_string()
    } else {
        trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
