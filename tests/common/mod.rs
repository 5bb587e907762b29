//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{AUTHORIZATION, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

use edge_gate::auth::{Credentials, RejectionPolicy, Verdict, Verifier, VerifyError, VerifyFuture};
use edge_gate::config::{GatewayConfig, VerifierConfig};
use edge_gate::pipeline::ActiveLocale;

/// Token the fake verifier accepts in `Behaviour::TokenMatch`.
pub const GOOD_TOKEN: &str = "good-token";

/// How a [`FakeVerifier`] answers.
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Allow when the request carries [`GOOD_TOKEN`], deny otherwise.
    TokenMatch,
    /// Fail with a transport-style error.
    Unavailable,
    /// Never answer.
    Hang,
}

/// Deterministic verifier that counts its invocations.
pub struct FakeVerifier {
    behaviour: Behaviour,
    policy: RejectionPolicy,
    calls: AtomicUsize,
}

impl FakeVerifier {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            policy: RejectionPolicy::new("/sign-in"),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Verifier for FakeVerifier {
    fn verify<'a>(&'a self, credentials: &'a Credentials) -> VerifyFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            match self.behaviour {
                Behaviour::TokenMatch if credentials.token() == Some(GOOD_TOKEN) => {
                    Ok(Verdict::Allow)
                }
                Behaviour::TokenMatch => Ok(Verdict::Deny(self.policy.reject(credentials))),
                Behaviour::Unavailable => Err(VerifyError::Unavailable("fake outage".into())),
                Behaviour::Hang => {
                    std::future::pending::<()>().await;
                    Ok(Verdict::Allow)
                }
            }
        })
    }
}

/// Default config with a short verify timeout.
pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.verify_timeout_ms = 200;
    config.auth.verifier = VerifierConfig::StaticToken {
        token: GOOD_TOKEN.into(),
    };
    config
}

/// Downstream stand-in that records hits and echoes the active locale.
///
/// Responds with `path=<path> locale=<code|none> messages=<yes|no>` and sets
/// its own `theme=dark` cookie.
pub fn echo_downstream(hits: Arc<AtomicUsize>) -> Router {
    Router::new().fallback(move |request: Request| {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            let active = request.extensions().get::<ActiveLocale>();
            let locale = active.map_or("none".to_string(), |a| a.code.to_string());
            let messages = if active.is_some_and(|a| a.messages.is_some()) {
                "yes"
            } else {
                "no"
            };
            let body = format!("path={} locale={locale} messages={messages}", request.uri().path());
            ([(SET_COOKIE, "theme=dark")], body).into_response()
        }
    })
}

/// Start an upstream application on an ephemeral port.
pub async fn start_mock_upstream() -> SocketAddr {
    let app = Router::new().fallback(|request: Request| async move {
        let body = format!(
            "upstream {} {}",
            request.method(),
            request.uri().path_and_query().map_or("/", |pq| pq.as_str())
        );
        Response::builder()
            .header(SET_COOKIE, "theme=dark")
            .body(Body::from(body))
            .unwrap()
    });
    serve(app).await
}

/// Authorization headers received by [`start_mock_verifier`].
pub type SeenAuthorization = Arc<Mutex<Vec<String>>>;

/// Start a verification endpoint on an ephemeral port.
///
/// `Bearer allow` answers 200, `Bearer deny` 401, `Bearer forbid` 403 and
/// anything else 500. Every `Authorization` header is recorded.
pub async fn start_mock_verifier() -> (SocketAddr, SeenAuthorization) {
    let seen = SeenAuthorization::default();
    let recorded = seen.clone();
    let app = Router::new().fallback(move |request: Request| {
        let recorded = recorded.clone();
        async move {
            let authorization = request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let status = match authorization.as_str() {
                "Bearer allow" => StatusCode::OK,
                "Bearer deny" => StatusCode::UNAUTHORIZED,
                "Bearer forbid" => StatusCode::FORBIDDEN,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            recorded.lock().unwrap().push(authorization);
            status
        }
    });
    (serve(app).await, seen)
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Read a response body to a string.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Give a spawned server a moment to start accepting.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
