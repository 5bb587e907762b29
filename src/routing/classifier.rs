//! Public route classification.
//!
//! # Responsibilities
//! - Decide whether a path bypasses the auth gate
//! - Accept locale-prefixed variants (`/es/sign-in`) of public paths
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) pattern scan (acceptable for typical pattern counts)
//! - Deterministic: first pattern in declaration order wins

use crate::config::RoutesConfig;
use crate::locale::LocaleSet;
use crate::routing::matcher::{PathPattern, PatternError};

/// Outcome of classifying a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Reachable without authentication; carries the pattern that matched.
    Public(&'a PathPattern),
    /// Must pass the auth gate.
    Protected,
}

impl Classification<'_> {
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public(_))
    }
}

/// Ordered set of public path patterns.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    patterns: Vec<PathPattern>,
    locale_prefixes: Option<LocaleSet>,
}

impl RouteClassifier {
    /// Compile the public patterns from config.
    ///
    /// `locales` is consulted only when `match_locale_prefix` is enabled.
    pub fn from_config(config: &RoutesConfig, locales: &LocaleSet) -> Result<Self, PatternError> {
        let patterns = config
            .public
            .iter()
            .map(|raw| PathPattern::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            locale_prefixes: config.match_locale_prefix.then(|| locales.clone()),
        })
    }

    pub fn new(patterns: Vec<PathPattern>, locale_prefixes: Option<LocaleSet>) -> Self {
        Self { patterns, locale_prefixes }
    }

    /// Classify a request path.
    pub fn classify(&self, path: &str) -> Classification<'_> {
        if let Some(pattern) = self.first_match(path) {
            return Classification::Public(pattern);
        }

        if let Some(stripped) = self.strip_locale_prefix(path) {
            if let Some(pattern) = self.first_match(stripped) {
                return Classification::Public(pattern);
            }
        }

        Classification::Protected
    }

    /// Returns true if the path bypasses authentication.
    pub fn is_public(&self, path: &str) -> bool {
        self.classify(path).is_public()
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }

    fn first_match(&self, path: &str) -> Option<&PathPattern> {
        self.patterns.iter().find(|p| p.matches(path))
    }

    fn strip_locale_prefix<'p>(&self, path: &'p str) -> Option<&'p str> {
        let locales = self.locale_prefixes.as_ref()?;
        let rest = path.strip_prefix('/')?;
        let (segment, remainder) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };
        locales.parse(segment).map(|_| remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RouteClassifier {
        let locales = LocaleSet::new(&["en".into(), "es".into()], "en").unwrap();
        RouteClassifier::from_config(&RoutesConfig::default(), &locales).unwrap()
    }

    #[test]
    fn test_default_public_paths() {
        let c = classifier();
        for path in ["/", "/health", "/sign-in", "/sign-up/verify", "/api/webhooks/clerk"] {
            assert!(c.is_public(path), "{path} should be public");
        }
    }

    #[test]
    fn test_protected_paths() {
        let c = classifier();
        for path in ["/dashboard", "/dashboard/properties/1", "/api/graphql", "/healthz"] {
            assert_eq!(c.classify(path), Classification::Protected, "{path}");
        }
    }

    #[test]
    fn test_locale_prefixed_variants() {
        let c = classifier();
        assert!(c.is_public("/es/sign-in"));
        assert!(c.is_public("/en/sign-up/sso-callback"));
        assert!(c.is_public("/es"));
        assert!(!c.is_public("/fr/sign-in"));
        assert!(!c.is_public("/es/dashboard"));
    }

    #[test]
    fn test_locale_prefix_disabled() {
        let config = RoutesConfig {
            match_locale_prefix: false,
            ..RoutesConfig::default()
        };
        let locales = LocaleSet::new(&["en".into(), "es".into()], "en").unwrap();
        let c = RouteClassifier::from_config(&config, &locales).unwrap();
        assert!(!c.is_public("/es/sign-in"));
        assert!(c.is_public("/sign-in"));
    }

    #[test]
    fn test_reports_first_matching_pattern() {
        let c = RouteClassifier::new(
            vec![
                PathPattern::parse("/api/*").unwrap(),
                PathPattern::parse("/api/webhooks*").unwrap(),
            ],
            None,
        );
        match c.classify("/api/webhooks/clerk") {
            Classification::Public(p) => assert_eq!(p.to_string(), "/api/*"),
            Classification::Protected => panic!("expected public"),
        }
    }
}
