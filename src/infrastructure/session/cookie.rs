//! Session cookie handling

use axum::http::{HeaderMap, HeaderValue, header};

use super::store::SessionId;
use crate::shared::logging::log_session_created;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "chat_session";

/// Session resolved for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSession {
    pub id: SessionId,
    /// No valid cookie was sent; the response must set one
    pub is_new: bool,
}

impl ResolvedSession {
    /// Read the session cookie, or start a new session
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match session_from_headers(headers) {
            Some(id) => Self { id, is_new: false },
            None => {
                let id = SessionId::generate();
                log_session_created(&id.to_string());
                Self { id, is_new: true }
            }
        }
    }

    /// Attach `Set-Cookie` to a response when the session is new
    pub fn apply(&self, headers: &mut HeaderMap) {
        if !self.is_new {
            return;
        }
        if let Ok(value) = HeaderValue::from_str(&set_cookie_value(&self.id)) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}

/// Find a valid session id among the request's `Cookie` headers
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == SESSION_COOKIE)
        .find_map(|(_, value)| SessionId::parse(value))
}

pub fn set_cookie_value(id: &SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_session_among_other_cookies() {
        let id = SessionId::generate();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}; lang=en", SESSION_COOKIE, id)).unwrap(),
        );

        let resolved = ResolvedSession::from_headers(&headers);
        assert_eq!(resolved, ResolvedSession { id, is_new: false });

        let mut response_headers = HeaderMap::new();
        resolved.apply(&mut response_headers);
        assert!(response_headers.get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn test_invalid_cookie_starts_new_session() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("chat_session=garbage"));

        let resolved = ResolvedSession::from_headers(&headers);
        assert!(resolved.is_new);

        let mut response_headers = HeaderMap::new();
        resolved.apply(&mut response_headers);
        let cookie = response_headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert_eq!(cookie, set_cookie_value(&resolved.id));
        assert!(cookie.starts_with("chat_session="));
        assert!(cookie.contains("HttpOnly"));
    }
}
