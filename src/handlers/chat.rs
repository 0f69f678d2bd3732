//! POST / : chat relay over SSE, or image analysis, depending on the form

use std::convert::Infallible;

use axum::{
    Extension,
    extract::Request,
    http::{HeaderName, HeaderValue, header},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::StreamExt;

use super::form::{Submission, read_submission};
use super::image::image_response;
use super::state::AppState;
use crate::domain::models::ModelSelection;
use crate::infrastructure::session::{ResolvedSession, SessionId};
use crate::shared::errors::Result;

/// Disables response buffering in nginx-style reverse proxies
const ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// POST /
/// Chat submissions stream `text/event-stream`; image submissions re-render the page
pub async fn submit_handler(
    Extension(state): Extension<AppState>,
    request: Request,
) -> Result<Response> {
    let session = ResolvedSession::from_headers(request.headers());
    let submission = read_submission(request).await?;

    let mut response = match submission {
        Submission::Chat { message, model } => {
            relay_response(&state, session.id, message, model).await
        }
        Submission::Image(analysis_request) => {
            image_response(&state, session.id, analysis_request).await
        }
    };

    session.apply(response.headers_mut());
    Ok(response)
}

async fn relay_response(
    state: &AppState,
    session_id: SessionId,
    message: String,
    model: ModelSelection,
) -> Response {
    let events = state
        .relay
        .start(state.session(session_id), message, model)
        .await
        .map(|event| Ok::<_, Infallible>(Event::default().data(event.data())));

    let mut response = Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response();

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(ACCEL_BUFFERING, HeaderValue::from_static("no"));
    response
}
