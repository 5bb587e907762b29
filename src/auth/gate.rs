//! The auth gate: runs the verifier for protected paths.
//!
//! # Responsibilities
//! - Extract credentials and invoke the verifier once per request
//! - Bound the call with a timeout
//! - Turn timeouts and verifier errors into rejections (fail closed)
//!
//! # Design Decisions
//! - No retries and no caching of outcomes across requests
//! - The verifier decides the rejection shape; the gate only falls back
//!   to its own policy when the verifier produced no decision

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{HeaderMap, Uri};

use crate::auth::credentials::Credentials;
use crate::auth::rejection::{Rejection, RejectionPolicy};
use crate::auth::verifier::{Verdict, Verifier};
use crate::observability::metrics;

/// Why a request failed the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The verifier denied the credentials.
    Denied,
    /// The verifier did not answer in time.
    Timeout,
    /// The verifier failed to reach a decision.
    Transport,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Denied => "denied",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
        }
    }
}

/// Result of running the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Allowed,
    Rejected {
        rejection: Rejection,
        reason: FailureReason,
    },
}

/// Invokes the verifier for protected requests.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn Verifier>,
    timeout: Duration,
    policy: RejectionPolicy,
    session_cookie: String,
}

impl AuthGate {
    pub fn new(
        verifier: Arc<dyn Verifier>,
        timeout: Duration,
        policy: RejectionPolicy,
        session_cookie: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            timeout,
            policy,
            session_cookie: session_cookie.into(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Verify the request, awaiting the verifier for at most `timeout`.
    pub async fn check(&self, headers: &HeaderMap, uri: &Uri) -> GateOutcome {
        let credentials = Credentials::from_request(headers, uri, &self.session_cookie);
        let start = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.verifier.verify(&credentials)).await;
        metrics::record_verify_duration(start);

        let (rejection, reason) = match result {
            Ok(Ok(Verdict::Allow)) => return GateOutcome::Allowed,
            Ok(Ok(Verdict::Deny(rejection))) => (rejection, FailureReason::Denied),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, path = %uri.path(), "Verifier failed, rejecting request");
                (self.policy.reject(&credentials), FailureReason::Transport)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    path = %uri.path(),
                    "Verifier timed out, rejecting request"
                );
                (self.policy.reject(&credentials), FailureReason::Timeout)
            }
        };

        metrics::record_auth_failure(reason.as_str());
        GateOutcome::Rejected { rejection, reason }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .field("session_cookie", &self.session_cookie)
            .finish_non_exhaustive()
    }
}
