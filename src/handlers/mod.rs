/// Shared handler state
pub mod state;

/// POST form decoding (chat vs image submission)
pub mod form;

/// Chat relay over SSE
pub mod chat;

/// Image analysis page re-render
pub mod image;

/// Page and health endpoints
pub mod page;

use axum::{Extension, Router, extract::DefaultBodyLimit, routing::get};

use crate::domain::models::MAX_IMAGE_SIZE;

pub use chat::submit_handler;
pub use page::{health_handler, index_handler};
pub use state::AppState;

/// Room for the multipart framing and text fields around a full-size image
const FORM_OVERHEAD: usize = 64 * 1024;

/// Transport cap on request bodies. Oversized images below it are reported
/// inline by the image analysis instead of a bare 413.
pub const MAX_REQUEST_SIZE: usize = MAX_IMAGE_SIZE + FORM_OVERHEAD;

/// Single page route, method-dispatched, plus a health probe
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE))
        .layer(Extension(state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::domain::models::ChatTurn;
    use crate::infrastructure::provider::testing::{ScriptedProvider, StreamScript};
    use crate::infrastructure::session::{InMemorySessionStore, SESSION_COOKIE, SessionId, SessionStore};
    use crate::shared::utils::{ConsumerState, RelayConsumer};

    const BOUNDARY: &str = "----relaytestboundary";

    fn app(provider: ScriptedProvider) -> (Router, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let state = AppState::new(Arc::new(provider), store.clone());
        (build_router(state), store)
    }

    fn session_cookie(response: &Response) -> Option<SessionId> {
        let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
        let pair = value.split(';').next()?;
        let (name, id) = pair.split_once('=')?;
        if name == SESSION_COOKIE { SessionId::parse(id) } else { None }
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn urlencoded(body: &str, session: Option<SessionId>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(id) = session {
            builder = builder.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, id));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    /// Build a multipart body; `file` is (field, filename, content type, bytes)
    fn multipart(fields: &[(&str, &str)], file: Option<(&str, &str, &str, &[u8])>) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if let Some((name, filename, content_type, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    BOUNDARY, name, filename, content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_sets_session_cookie() {
        let (router, _) = app(ScriptedProvider::streaming(&[]));
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_some());
        let html = body_text(response).await;
        assert!(html.contains("<form id=\"chat-form\""));
        assert!(html.contains("llama3-8b-8192"));
    }

    #[tokio::test]
    async fn test_index_renders_existing_transcript() {
        let (router, store) = app(ScriptedProvider::streaming(&[]));
        let id = SessionId::generate();
        store.append(&id, ChatTurn::user("Earlier question")).await;
        store.append(&id, ChatTurn::assistant("Earlier answer")).await;

        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, id))
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert!(session_cookie(&response).is_none());
        let html = body_text(response).await;
        assert!(html.contains("Earlier question"));
        assert!(html.contains("Earlier answer"));
    }

    #[tokio::test]
    async fn test_chat_relay_over_sse() {
        let (router, store) = app(ScriptedProvider::streaming(&["Hi", " there"]));
        let id = SessionId::generate();

        let response = router
            .oneshot(urlencoded("message=Hello&model=m1", Some(id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/event-stream")
        );
        assert_eq!(response.headers()["x-accel-buffering"], "no");

        let body = body_text(response).await;
        assert_eq!(
            body,
            "data: {\"content\":\"Hi\"}\n\ndata: {\"content\":\" there\"}\n\ndata: [DONE]\n\n"
        );

        let mut consumer = RelayConsumer::new();
        consumer.feed(body.as_bytes());
        assert_eq!(consumer.state(), ConsumerState::Done);
        assert_eq!(consumer.assistant_text(), "Hi there");

        assert_eq!(
            store.transcript(&id).await.turns(),
            &[ChatTurn::user("Hello"), ChatTurn::assistant("Hi there")]
        );
    }

    #[tokio::test]
    async fn test_chat_relay_from_multipart_form_data() {
        let (router, store) = app(ScriptedProvider::streaming(&["Bonjour"]));

        let response = router
            .oneshot(multipart(&[("model", "gemma-7b-it"), ("message", "Salut")], None))
            .await
            .unwrap();
        let id = session_cookie(&response).expect("new session cookie");
        let body = body_text(response).await;

        assert!(body.ends_with("data: [DONE]\n\n"));
        assert_eq!(
            store.transcript(&id).await.turns(),
            &[ChatTurn::user("Salut"), ChatTurn::assistant("Bonjour")]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_emits_single_error_event() {
        let provider = ScriptedProvider::with_stream(StreamScript::Reject("rate limited".into()));
        let (router, store) = app(provider);
        let id = SessionId::generate();

        let response = router
            .oneshot(urlencoded("message=Hello&model=m1", Some(id)))
            .await
            .unwrap();
        let body = body_text(response).await;

        assert_eq!(body, "data: {\"error\":\"API error: rate limited\"}\n\n");
        assert!(!body.contains("[DONE]"));
        assert_eq!(store.transcript(&id).await.turns(), &[ChatTurn::user("Hello")]);
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let (router, store) = app(ScriptedProvider::streaming(&["unused"]));

        let response = router
            .clone()
            .oneshot(urlencoded("message=Hello", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router.clone().oneshot(urlencoded("model=m1", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"message\":\"Hello\"}"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn test_image_analysis_renders_result() {
        let provider = ScriptedProvider::streaming(&[]).with_analysis(Ok("A red <square>."));
        let (router, store) = app(provider);

        let response = router
            .oneshot(multipart(
                &[("image_prompt", "What shape?")],
                Some(("image", "square.png", "image/png", &b"\x89PNG\r\n"[..])),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Image Analysis Result:"));
        assert!(html.contains("A red &lt;square&gt;."));
        assert!(html.contains("<div id=\"imageTab\" class=\"tab-content active\">"));
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_image_is_reported_inline() {
        let (router, _) = app(ScriptedProvider::streaming(&[]).with_analysis(Ok("unused")));

        let response = router
            .oneshot(multipart(
                &[("image_prompt", "What is it?")],
                Some(("image", "empty.png", "image/png", &b""[..])),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Error analyzing image"));
    }

    #[tokio::test]
    async fn test_full_size_image_is_analyzed() {
        let provider = ScriptedProvider::streaming(&[]).with_analysis(Ok("A blank canvas."));
        let (router, _) = app(provider);
        let image = vec![0u8; MAX_IMAGE_SIZE];

        let response = router
            .oneshot(multipart(
                &[("image_prompt", "What is it?")],
                Some(("image", "blank.png", "image/png", &image[..])),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Image Analysis Result:"));
        assert!(html.contains("A blank canvas."));
    }

    #[tokio::test]
    async fn test_oversized_image_is_reported_inline() {
        let provider = ScriptedProvider::streaming(&[]).with_analysis(Ok("unused"));
        let (router, _) = app(provider);
        let image = vec![0u8; MAX_IMAGE_SIZE + 1];

        let response = router
            .oneshot(multipart(
                &[("image_prompt", "What is it?")],
                Some(("image", "blank.png", "image/png", &image[..])),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Error analyzing image: "));
        assert!(html.contains("file too large"));
        assert!(!html.contains("unused"));
    }

    #[tokio::test]
    async fn test_body_over_request_limit_is_rejected() {
        let (router, _) = app(ScriptedProvider::streaming(&[]));
        let image = vec![0u8; MAX_REQUEST_SIZE + 1];

        let response = router
            .oneshot(multipart(
                &[("image_prompt", "What is it?")],
                Some(("image", "huge.png", "image/png", &image[..])),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _) = app(ScriptedProvider::streaming(&[]));
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }
}
