//! The per-request edge pipeline.
//!
//! # Data Flow
//! ```text
//! Request
//!     → RouteClassifier (public?)
//!     → AuthGate (protected paths only; may short-circuit with a Rejection)
//!     → LocaleResolver (skipped on exempt paths)
//!     → downstream service
//!     → composer.rs (append Set-Cookie when the resolver asks for it)
//! ```
//!
//! # Design Decisions
//! - Built once from an immutable config and shared via `Arc`
//! - No mutable state: the only cross-request state is the client's cookie
//! - The gate is awaited before any locale work happens

pub mod composer;
pub mod middleware;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, Uri};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::auth::{
    AuthGate, GateOutcome, Rejection, RejectionPolicy, RemoteVerifier, StaticTokenVerifier,
    Verifier,
};
use crate::config::{GatewayConfig, VerifierConfig};
use crate::locale::{
    BundleError, LocaleCode, LocaleResolver, LocaleSetError, LocaleSource, MessageBundles,
    Resolution,
};
use crate::observability::metrics;
use crate::routing::{is_canonical, Classification, PatternError, RouteClassifier};

pub use middleware::edge_pipeline;

/// Errors assembling a pipeline from config.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("locale: {0}")]
    Locale(#[from] LocaleSetError),

    #[error("routes: {0}")]
    Pattern(#[from] PatternError),

    #[error("message bundles: {0}")]
    Bundles(#[from] BundleError),

    #[error("verifier endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("verifier client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("upstream address: {0}")]
    Upstream(#[from] axum::http::uri::InvalidUri),
}

/// What the pipeline decided before the downstream service runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The path is not canonical; answered with 400 before classification.
    InvalidPath,
    /// Stop here; the downstream service must not run.
    Reject(Rejection),
    /// Continue. `None` when the path is exempt from locale resolution.
    Proceed(Option<Resolution>),
}

/// The locale attached to request extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct ActiveLocale {
    pub code: LocaleCode,
    pub source: LocaleSource,
    /// Message bundle for `code`, when bundles are configured.
    pub messages: Option<Arc<Value>>,
}

/// Route classifier, auth gate and locale resolver wired together.
#[derive(Debug)]
pub struct Pipeline {
    classifier: RouteClassifier,
    gate: AuthGate,
    resolver: LocaleResolver,
    bundles: Option<MessageBundles>,
}

impl Pipeline {
    pub fn new(
        classifier: RouteClassifier,
        gate: AuthGate,
        resolver: LocaleResolver,
        bundles: Option<MessageBundles>,
    ) -> Self {
        Self {
            classifier,
            gate,
            resolver,
            bundles,
        }
    }

    /// Build the pipeline with the verifier named in config.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, BuildError> {
        let policy = RejectionPolicy::new(&config.auth.sign_in_path);
        let verifier: Arc<dyn Verifier> = match &config.auth.verifier {
            VerifierConfig::Remote { endpoint } => {
                Arc::new(RemoteVerifier::new(Url::parse(endpoint)?, policy)?)
            }
            VerifierConfig::StaticToken { token } => {
                Arc::new(StaticTokenVerifier::new(token, policy))
            }
        };
        Self::with_verifier(config, verifier)
    }

    /// Build the pipeline around a caller-supplied verifier.
    pub fn with_verifier(
        config: &GatewayConfig,
        verifier: Arc<dyn Verifier>,
    ) -> Result<Self, BuildError> {
        let resolver = LocaleResolver::from_config(&config.locale)?;
        let classifier = RouteClassifier::from_config(&config.routes, resolver.locales())?;
        let gate = AuthGate::new(
            verifier,
            Duration::from_millis(config.auth.verify_timeout_ms),
            RejectionPolicy::new(&config.auth.sign_in_path),
            &config.auth.session_cookie,
        );
        let bundles = config
            .locale
            .messages_dir
            .as_deref()
            .map(|dir| MessageBundles::load(Path::new(dir), resolver.locales()))
            .transpose()?;

        tracing::info!(
            public_patterns = classifier.patterns().len(),
            locales = resolver.locales().len(),
            default_locale = %resolver.locales().default_locale(),
            bundles = bundles.as_ref().map_or(0, MessageBundles::len),
            locale_cookie = resolver.cookie().name(),
            verify_timeout_ms = gate.timeout().as_millis() as u64,
            "Pipeline ready"
        );

        Ok(Self::new(classifier, gate, resolver, bundles))
    }

    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    pub fn bundles(&self) -> Option<&MessageBundles> {
        self.bundles.as_ref()
    }

    /// Run the classifier, the gate and the resolver for one request.
    pub async fn decide(&self, headers: &HeaderMap, uri: &Uri) -> Decision {
        let path = uri.path();

        if !is_canonical(path) {
            tracing::debug!(path = %path, "Non-canonical path");
            metrics::record_decision("invalid_path");
            return Decision::InvalidPath;
        }

        match self.classifier.classify(path) {
            Classification::Public(pattern) => {
                tracing::debug!(path = %path, pattern = %pattern, "Public route, skipping auth");
                metrics::record_decision("public");
            }
            Classification::Protected => match self.gate.check(headers, uri).await {
                GateOutcome::Allowed => metrics::record_decision("allowed"),
                GateOutcome::Rejected { rejection, reason } => {
                    tracing::debug!(path = %path, reason = reason.as_str(), "Auth gate failed");
                    metrics::record_decision("rejected");
                    return Decision::Reject(rejection);
                }
            },
        }

        if !self.resolver.applies_to(path) {
            return Decision::Proceed(None);
        }

        let resolution = self.resolver.resolve(headers);
        metrics::record_locale(resolution.source.as_str());
        Decision::Proceed(Some(resolution))
    }

    /// The request extension handed to downstream handlers.
    pub fn active_locale(&self, resolution: &Resolution) -> ActiveLocale {
        ActiveLocale {
            code: resolution.locale.clone(),
            source: resolution.source,
            messages: self
                .bundles
                .as_ref()
                .and_then(|b| b.bundle(&resolution.locale)),
        }
    }
}
