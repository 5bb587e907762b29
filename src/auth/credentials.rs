//! Credential extraction from inbound requests.

use axum::http::header::{ACCEPT, AUTHORIZATION};
use axum::http::{HeaderMap, Uri};

use crate::locale::cookie::read_cookie;

/// How the client is expected to handle a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// A browser page load; rejections redirect to sign-in.
    Navigation,
    /// A programmatic call; rejections are a plain 401.
    Api,
}

/// Everything a verifier may look at for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Token from `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// Token from the session cookie.
    pub session: Option<String>,
    pub kind: RequestKind,
    /// Original path and query, used as the post-sign-in return target.
    pub path_and_query: String,
}

impl Credentials {
    pub fn from_request(headers: &HeaderMap, uri: &Uri, session_cookie: &str) -> Self {
        let session = read_cookie(headers, session_cookie)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            bearer: extract_bearer_token(headers),
            session,
            kind: request_kind(headers, uri.path()),
            path_and_query: uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string()),
        }
    }

    /// The token to verify: bearer first, then the session cookie.
    pub fn token(&self) -> Option<&str> {
        self.bearer.as_deref().or(self.session.as_deref())
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let (scheme, token) = trimmed.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn request_kind(headers: &HeaderMap, path: &str) -> RequestKind {
    if path == "/api" || path.starts_with("/api/") {
        return RequestKind::Api;
    }

    let navigate = headers
        .get("sec-fetch-mode")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("navigate"));
    let wants_html = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"));

    if navigate || wants_html {
        RequestKind::Navigation
    } else {
        RequestKind::Api
    }
}
