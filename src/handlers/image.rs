use axum::response::{Html, IntoResponse, Response};

use super::state::AppState;
use crate::app::{PageView, render_page};
use crate::domain::models::ImageAnalysisRequest;
use crate::domain::services::analyze_image;
use crate::infrastructure::session::SessionId;
use crate::shared::logging::log_page_render;

/// Analyze the upload and re-render the page with the result under the image form
pub async fn image_response(
    state: &AppState,
    session_id: SessionId,
    request: ImageAnalysisRequest,
) -> Response {
    let analysis = analyze_image(state.provider.as_ref(), &request).await;
    let transcript = state.session(session_id).transcript().await;

    log_page_render(&session_id.to_string(), transcript.len(), true);
    Html(render_page(&PageView::with_analysis(&transcript, &analysis))).into_response()
}
