//! Structured logging helpers
//!
//! Provides consistent, contextual logging across the application.
//! Every helper tags its event with an `operation` field so log lines can be
//! filtered per concern (`RUST_LOG` still controls verbosity).

/// Operations that emit log events
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    Session,
    Relay,
    ProviderRequest,
    ImageAnalysis,
    PageRender,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::Session => "session",
            LogOperation::Relay => "relay",
            LogOperation::ProviderRequest => "provider_request",
            LogOperation::ImageAnalysis => "image_analysis",
            LogOperation::PageRender => "page_render",
        }
    }
}

/// Log creation of a new browser session
pub fn log_session_created(session_id: &str) {
    tracing::info!(
        operation = LogOperation::Session.as_str(),
        session_id = session_id,
        "Created new chat session"
    );
}

/// Log relay start
pub fn log_relay_start(session_id: &str, model: &str, transcript_len: usize) {
    tracing::info!(
        operation = LogOperation::Relay.as_str(),
        session_id = session_id,
        model = model,
        transcript_len = transcript_len,
        "Starting chat relay"
    );
}

/// Log relay completion
pub fn log_relay_complete(session_id: &str, chunk_count: usize, response_len: usize) {
    tracing::info!(
        operation = LogOperation::Relay.as_str(),
        session_id = session_id,
        chunk_count = chunk_count,
        response_len = response_len,
        "Chat relay completed"
    );
}

/// Log relay failure (provider error before or during streaming)
pub fn log_relay_error(session_id: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::Relay.as_str(),
        session_id = session_id,
        error = error,
        "Chat relay failed"
    );
}

/// Log client disconnect mid-stream
pub fn log_relay_disconnected(session_id: &str, chunk_count: usize) {
    tracing::debug!(
        operation = LogOperation::Relay.as_str(),
        session_id = session_id,
        chunk_count = chunk_count,
        "Client disconnected, relay stopped"
    );
}

/// Log an outgoing provider request
pub fn log_provider_request(endpoint: &str, model: &str, stream: bool) {
    tracing::debug!(
        operation = LogOperation::ProviderRequest.as_str(),
        endpoint = endpoint,
        model = model,
        stream = stream,
        "Sending provider request"
    );
}

/// Log a non-success provider response
pub fn log_provider_status(endpoint: &str, status: u16) {
    tracing::warn!(
        operation = LogOperation::ProviderRequest.as_str(),
        endpoint = endpoint,
        status = status,
        "Provider returned error status"
    );
}

/// Log image analysis request
pub fn log_image_analysis_start(filename: &str, content_type: &str, size: usize) {
    tracing::info!(
        operation = LogOperation::ImageAnalysis.as_str(),
        filename = filename,
        content_type = content_type,
        size = size,
        "Analyzing uploaded image"
    );
}

/// Log image analysis failure (rendered inline, not returned as an error)
pub fn log_image_analysis_error(error: &str) {
    tracing::warn!(
        operation = LogOperation::ImageAnalysis.as_str(),
        error = error,
        "Image analysis failed"
    );
}

/// Log page render
pub fn log_page_render(session_id: &str, turn_count: usize, has_analysis: bool) {
    tracing::trace!(
        operation = LogOperation::PageRender.as_str(),
        session_id = session_id,
        turn_count = turn_count,
        has_analysis = has_analysis,
        "Rendering chat page"
    );
}
