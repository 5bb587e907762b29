//! Locale resolution state machine.
//!
//! # Responsibilities
//! - Trust a valid locale cookie from a previous request
//! - Otherwise negotiate from `Accept-Language`, falling back to the default
//! - Report whether the response must persist the result as a cookie
//! - Skip API and static-asset paths entirely
//!
//! # Design Decisions
//! - Branches evaluated in strict priority: cookie, header, default
//! - Write-once cookie: a valid cookie is never rewritten, so its expiry
//!   is not refreshed
//! - Pure function of the request headers; no state between requests

use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::HeaderMap;

use crate::config::LocaleConfig;
use crate::locale::code::{LocaleCode, LocaleSet, LocaleSetError};
use crate::locale::cookie::LocaleCookie;
use crate::locale::negotiation::negotiate;

/// Where the resolved locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    /// A valid cookie from a previous response.
    Cookie,
    /// Negotiated from `Accept-Language`.
    Header,
    /// Nothing usable was sent.
    Default,
}

impl LocaleSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::Header => "header",
            Self::Default => "default",
        }
    }
}

/// The resolver's decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub locale: LocaleCode,
    pub source: LocaleSource,
}

impl Resolution {
    /// True when the locale must be written back as a cookie.
    pub fn needs_cookie(&self) -> bool {
        self.source != LocaleSource::Cookie
    }
}

/// Resolves the active locale for a request.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    locales: LocaleSet,
    cookie: LocaleCookie,
    exempt_prefixes: Vec<String>,
    skip_static_assets: bool,
}

impl LocaleResolver {
    pub fn new(locales: LocaleSet, cookie: LocaleCookie) -> Self {
        Self {
            locales,
            cookie,
            exempt_prefixes: Vec::new(),
            skip_static_assets: false,
        }
    }

    pub fn from_config(config: &LocaleConfig) -> Result<Self, LocaleSetError> {
        let locales = LocaleSet::new(&config.supported, &config.default)?;
        Ok(Self {
            locales,
            cookie: LocaleCookie::new(&config.cookie_name, config.cookie_max_age_secs),
            exempt_prefixes: config.exempt_prefixes.clone(),
            skip_static_assets: config.skip_static_assets,
        })
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn cookie(&self) -> &LocaleCookie {
        &self.cookie
    }

    /// Returns false for paths the resolver never runs on.
    pub fn applies_to(&self, path: &str) -> bool {
        if self.exempt_prefixes.iter().any(|p| has_segment_prefix(path, p)) {
            return false;
        }
        if self.skip_static_assets && is_static_asset(path) {
            return false;
        }
        true
    }

    /// Resolve the locale from request headers.
    pub fn resolve(&self, headers: &HeaderMap) -> Resolution {
        if let Some(locale) = self.cookie.read(headers).and_then(|v| self.locales.parse(v)) {
            return Resolution {
                locale,
                source: LocaleSource::Cookie,
            };
        }

        let negotiated = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| negotiate(v, &self.locales));

        match negotiated {
            Some(locale) => Resolution {
                locale,
                source: LocaleSource::Header,
            },
            None => Resolution {
                locale: self.locales.default_locale().clone(),
                source: LocaleSource::Default,
            },
        }
    }
}

/// `/api` covers `/api` and `/api/...` but not `/apiary`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.is_empty(),
        None => false,
    }
}

/// A last segment containing a dot looks like a file (`/favicon.ico`).
fn is_static_asset(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}
