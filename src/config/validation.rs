//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges
//! - Compile route patterns and the locale set once to surface their errors
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, VerifierConfig};
use crate::locale::{LocaleSet, LocaleSetError};
use crate::routing::{PathPattern, PatternError};

/// A single semantic problem in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.address '{0}' is not a valid host:port")]
    UpstreamAddress(String),

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("routes.public: {0}")]
    Pattern(#[from] PatternError),

    #[error("locale: {0}")]
    Locale(#[from] LocaleSetError),

    #[error("{field} '{value}' is not a valid cookie name")]
    CookieName { field: &'static str, value: String },

    #[error("{field} '{value}' must start with '/'")]
    NotAbsolutePath { field: &'static str, value: String },

    #[error("auth.verifier.endpoint '{0}' must be an http(s) URL")]
    VerifierEndpoint(String),

    #[error("auth.verifier.token must not be empty")]
    EmptyToken,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if SocketAddr::from_str(&config.listener.bind_address).is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if Authority::from_str(&config.upstream.address).is_err()
        || config.upstream.address.contains('/')
    {
        errors.push(ValidationError::UpstreamAddress(config.upstream.address.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }

    for pattern in &config.routes.public {
        if let Err(e) = PathPattern::parse(pattern) {
            errors.push(e.into());
        }
    }

    validate_auth(config, &mut errors);
    validate_locale(config, &mut errors);

    if config.observability.metrics_enabled
        && SocketAddr::from_str(&config.observability.metrics_address).is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_auth(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    let auth = &config.auth;

    if auth.verify_timeout_ms == 0 {
        errors.push(ValidationError::Zero { field: "auth.verify_timeout_ms" });
    }
    if !auth.sign_in_path.starts_with('/') {
        errors.push(ValidationError::NotAbsolutePath {
            field: "auth.sign_in_path",
            value: auth.sign_in_path.clone(),
        });
    }
    if !is_cookie_name(&auth.session_cookie) {
        errors.push(ValidationError::CookieName {
            field: "auth.session_cookie",
            value: auth.session_cookie.clone(),
        });
    }

    match &auth.verifier {
        VerifierConfig::Remote { endpoint } => {
            let valid = Url::parse(endpoint)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                errors.push(ValidationError::VerifierEndpoint(endpoint.clone()));
            }
        }
        VerifierConfig::StaticToken { token } => {
            if token.trim().is_empty() {
                errors.push(ValidationError::EmptyToken);
            }
        }
    }
}

fn validate_locale(config: &GatewayConfig, errors: &mut Vec<ValidationError>) {
    let locale = &config.locale;

    if let Err(e) = LocaleSet::new(&locale.supported, &locale.default) {
        errors.push(e.into());
    }
    if !is_cookie_name(&locale.cookie_name) {
        errors.push(ValidationError::CookieName {
            field: "locale.cookie_name",
            value: locale.cookie_name.clone(),
        });
    }
    if locale.cookie_max_age_secs == 0 {
        errors.push(ValidationError::Zero { field: "locale.cookie_max_age_secs" });
    }
    for prefix in &locale.exempt_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::NotAbsolutePath {
                field: "locale.exempt_prefixes",
                value: prefix.clone(),
            });
        }
    }
}

/// RFC 6265 cookie-name: a non-empty HTTP token.
fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
