//! LLM provider client
//!
//! The relay and the image handler only see the `ProviderClient` trait;
//! `GroqClient` is the HTTP implementation.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use thiserror::Error;

use crate::domain::models::{ChatTurn, UploadedImage};

pub mod groq;
pub mod types;

pub use groq::GroqClient;
pub use types::ChatCompletion;

/// Incremental text fragments of one streamed completion
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, ProviderError>> + Send>>;

/// Errors that can occur while talking to the provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Provider returned no choices")]
    EmptyResponse,

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Streamed completion. Failures before the first byte are returned
    /// directly, later ones as an `Err` item of the stream.
    async fn stream_chat(
        &self,
        model: &str,
        messages: &[ChatTurn],
    ) -> Result<ChunkStream, ProviderError>;

    /// Vision analysis of one image
    async fn analyze_image(
        &self,
        image: &UploadedImage,
        prompt: &str,
    ) -> Result<ChatCompletion, ProviderError>;
}
