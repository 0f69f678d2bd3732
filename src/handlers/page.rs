use axum::{
    Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};

use super::state::AppState;
use crate::app::{PageView, render_page};
use crate::infrastructure::session::ResolvedSession;
use crate::shared::logging::log_page_render;

/// GET /
/// Render the page with the session's transcript
pub async fn index_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    let session = ResolvedSession::from_headers(&headers);
    let transcript = state.session(session.id).transcript().await;

    log_page_render(&session.id.to_string(), transcript.len(), false);
    let mut response = Html(render_page(&PageView::chat(&transcript))).into_response();
    session.apply(response.headers_mut());
    response
}

/// GET /health
pub async fn health_handler() -> &'static str {
    "ok"
}
