//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream application that passed-through requests are forwarded to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Public (unauthenticated) route patterns.
    pub routes: RoutesConfig,

    /// Authentication gate settings.
    pub auth: AuthConfig,

    /// Locale negotiation settings.
    pub locale: LocaleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Route classification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Paths that bypass authentication. A trailing `*` matches any suffix.
    pub public: Vec<String>,

    /// Also match public patterns after stripping a leading `/{locale}` segment.
    pub match_locale_prefix: bool,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            public: vec![
                "/".to_string(),
                "/health".to_string(),
                "/sign-in*".to_string(),
                "/sign-up*".to_string(),
                "/api/webhooks*".to_string(),
            ],
            match_locale_prefix: true,
        }
    }
}

/// Which verifier backs the auth gate.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerifierConfig {
    /// Call an HTTP verification endpoint with the caller's token.
    Remote {
        /// Verification endpoint URL.
        endpoint: String,
    },
    /// Compare the caller's token against a shared secret.
    StaticToken {
        /// Expected token.
        token: String,
    },
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self::Remote {
            endpoint: "http://127.0.0.1:4000/verify".to_string(),
        }
    }
}

/// Authentication gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Verifier backing the gate.
    pub verifier: VerifierConfig,

    /// Upper bound on a single verification call in milliseconds.
    /// Exceeding it counts as a verification failure.
    pub verify_timeout_ms: u64,

    /// Where browser navigations are redirected on failure.
    pub sign_in_path: String,

    /// Cookie carrying the session token for browser requests.
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            verifier: VerifierConfig::default(),
            verify_timeout_ms: 5_000,
            sign_in_path: "/sign-in".to_string(),
            session_cookie: "__session".to_string(),
        }
    }
}

/// Locale negotiation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locale codes.
    pub supported: Vec<String>,

    /// Locale used when nothing else matches. Must be in `supported`.
    pub default: String,

    /// Name of the cookie that persists the resolved locale.
    pub cookie_name: String,

    /// Cookie lifetime in seconds.
    pub cookie_max_age_secs: u64,

    /// Directory holding `<code>.json` message bundles.
    pub messages_dir: Option<String>,

    /// Path prefixes the resolver never runs on.
    pub exempt_prefixes: Vec<String>,

    /// Skip the resolver for paths that look like static files.
    pub skip_static_assets: bool,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string(), "es".to_string()],
            default: "en".to_string(),
            cookie_name: "NEXT_LOCALE".to_string(),
            cookie_max_age_secs: 60 * 60 * 24 * 365,
            messages_dir: None,
            exempt_prefixes: vec!["/api".to_string(), "/_next".to_string()],
            skip_static_assets: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.locale.cookie_name, "NEXT_LOCALE");
        assert_eq!(config.locale.cookie_max_age_secs, 31_536_000);
        assert_eq!(config.auth.verify_timeout_ms, 5_000);
        assert!(config.routes.public.contains(&"/health".to_string()));
    }

    #[test]
    fn test_verifier_kind_tag() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [auth.verifier]
            kind = "static_token"
            token = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.auth.verifier,
            VerifierConfig::StaticToken { token: "s3cret".into() }
        );
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [locale]
            supported = ["en", "es", "pt"]
            "#,
        )
        .unwrap();
        assert_eq!(config.locale.supported.len(), 3);
        assert_eq!(config.locale.default, "en");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }
}
