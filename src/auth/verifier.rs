//! The verification capability and its built-in implementations.
//!
//! # How verifiers are stored
//!
//! The gate holds a single `Arc<dyn Verifier>` chosen at startup. Trait
//! objects cannot have `async fn` methods, so `verify` returns a boxed
//! future instead:
//!
//! ```text
//! gate.check(..)
//!        ↓
//! verifier.verify(&credentials)      ← one vtable dispatch
//!        ↓
//! Box::pin(async move { .. })        ← VerifyFuture
//!        ↓ tokio::time::timeout
//! Verdict | VerifyError | elapsed
//! ```

use std::future::Future;
use std::pin::Pin;

use axum::http::StatusCode;
use thiserror::Error;
use url::Url;

use crate::auth::credentials::Credentials;
use crate::auth::rejection::{Rejection, RejectionPolicy};

/// What the verifier decided about a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(Rejection),
}

/// The verifier could not reach a decision.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("verification request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("verifier answered with unexpected status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("verifier unavailable: {0}")]
    Unavailable(String),
}

/// A boxed, `Send` future resolving to a verification result.
pub type VerifyFuture<'a> = Pin<Box<dyn Future<Output = Result<Verdict, VerifyError>> + Send + 'a>>;

/// External capability that authenticates a request.
pub trait Verifier: Send + Sync {
    fn verify<'a>(&'a self, credentials: &'a Credentials) -> VerifyFuture<'a>;
}

/// Verifies tokens against an HTTP endpoint.
///
/// The caller's token is forwarded as `Authorization: Bearer <token>`.
/// 2xx allows, 401/403 denies, anything else is a [`VerifyError`].
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
    client: reqwest::Client,
    endpoint: Url,
    policy: RejectionPolicy,
}

impl RemoteVerifier {
    pub fn new(endpoint: Url, policy: RejectionPolicy) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            policy,
        })
    }
}

impl Verifier for RemoteVerifier {
    fn verify<'a>(&'a self, credentials: &'a Credentials) -> VerifyFuture<'a> {
        Box::pin(async move {
            // No token means nothing to ask the endpoint about.
            let Some(token) = credentials.token() else {
                return Ok(Verdict::Deny(self.policy.reject(credentials)));
            };

            let response = self
                .client
                .get(self.endpoint.clone())
                .bearer_auth(token)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                Ok(Verdict::Allow)
            } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                Ok(Verdict::Deny(self.policy.reject(credentials)))
            } else {
                Err(VerifyError::UnexpectedStatus(status))
            }
        })
    }
}

/// Accepts exactly one shared token.
#[derive(Debug, Clone)]
pub struct StaticTokenVerifier {
    token: String,
    policy: RejectionPolicy,
}

impl StaticTokenVerifier {
    pub fn new(token: impl Into<String>, policy: RejectionPolicy) -> Self {
        Self {
            token: token.into(),
            policy,
        }
    }
}

impl Verifier for StaticTokenVerifier {
    fn verify<'a>(&'a self, credentials: &'a Credentials) -> VerifyFuture<'a> {
        let verdict = match credentials.token() {
            Some(token) if token == self.token => Verdict::Allow,
            _ => Verdict::Deny(self.policy.reject(credentials)),
        };
        Box::pin(async move { Ok(verdict) })
    }
}
