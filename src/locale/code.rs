//! Locale codes and the closed set of supported locales.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors building a [`LocaleSet`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleSetError {
    #[error("supported locale list is empty")]
    Empty,

    #[error("'{0}' is not a locale code (1-8 ASCII letters or digits)")]
    InvalidCode(String),

    #[error("locale '{0}' is listed more than once")]
    Duplicate(String),

    #[error("default locale '{0}' is not in the supported list")]
    UnknownDefault(String),
}

/// A locale code known to be a member of a [`LocaleSet`].
///
/// There is no public constructor: the only way to obtain one is through
/// [`LocaleSet::parse`], [`LocaleSet::match_base`] or [`LocaleSet::default_locale`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleCode(Arc<str>);

impl LocaleCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Closed set of supported locales with one designated default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    codes: Vec<LocaleCode>,
    default: LocaleCode,
}

impl LocaleSet {
    /// Build the set, validating every code and the default.
    pub fn new(supported: &[String], default: &str) -> Result<Self, LocaleSetError> {
        if supported.is_empty() {
            return Err(LocaleSetError::Empty);
        }

        let mut codes: Vec<LocaleCode> = Vec::with_capacity(supported.len());
        for raw in supported {
            if !is_locale_code(raw) {
                return Err(LocaleSetError::InvalidCode(raw.clone()));
            }
            if codes.iter().any(|c| c.as_str().eq_ignore_ascii_case(raw)) {
                return Err(LocaleSetError::Duplicate(raw.clone()));
            }
            codes.push(LocaleCode(Arc::from(raw.as_str())));
        }

        let default = codes
            .iter()
            .find(|c| c.as_str() == default)
            .cloned()
            .ok_or_else(|| LocaleSetError::UnknownDefault(default.to_string()))?;

        Ok(Self { codes, default })
    }

    /// Exact membership check, used for values this service wrote itself.
    pub fn parse(&self, value: &str) -> Option<LocaleCode> {
        self.codes.iter().find(|c| c.as_str() == value).cloned()
    }

    /// Case-insensitive membership check for client-supplied language subtags.
    pub fn match_base(&self, base: &str) -> Option<LocaleCode> {
        if base.is_empty() {
            return None;
        }
        self.codes
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(base))
            .cloned()
    }

    pub fn default_locale(&self) -> &LocaleCode {
        &self.default
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleCode> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn is_locale_code(raw: &str) -> bool {
    (1..=8).contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> LocaleSet {
        LocaleSet::new(&["en".into(), "es".into()], "en").unwrap()
    }

    #[test]
    fn test_parse_is_exact() {
        let set = set();
        assert_eq!(set.parse("es").unwrap().as_str(), "es");
        assert!(set.parse("ES").is_none());
        assert!(set.parse("fr").is_none());
        assert!(set.parse("").is_none());
    }

    #[test]
    fn test_match_base_ignores_case() {
        let set = set();
        assert_eq!(set.match_base("ES").unwrap().as_str(), "es");
        assert_eq!(set.match_base("En").unwrap().as_str(), "en");
        assert!(set.match_base("").is_none());
        assert!(set.match_base("*").is_none());
    }

    #[test]
    fn test_default_must_be_member() {
        assert_eq!(
            LocaleSet::new(&["en".into()], "es"),
            Err(LocaleSetError::UnknownDefault("es".into()))
        );
    }

    #[test]
    fn test_rejects_bad_lists() {
        assert_eq!(LocaleSet::new(&[], "en"), Err(LocaleSetError::Empty));
        assert_eq!(
            LocaleSet::new(&["en".into(), "EN".into()], "en"),
            Err(LocaleSetError::Duplicate("EN".into()))
        );
        assert_eq!(
            LocaleSet::new(&["en-US".into()], "en-US"),
            Err(LocaleSetError::InvalidCode("en-US".into()))
        );
    }

    #[test]
    fn test_default_locale() {
        let set = LocaleSet::new(&["en".into(), "es".into()], "es").unwrap();
        assert_eq!(set.default_locale().as_str(), "es");
        assert_eq!(set.len(), 2);
    }
}
