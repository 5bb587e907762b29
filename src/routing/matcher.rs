//! Path pattern matching.
//!
//! # Responsibilities
//! - Match request paths against exact literals
//! - Match request paths against a literal prefix with a trailing `*`
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - At most one wildcard, and only as the final character
//! - No regex to guarantee O(n) matching

use std::fmt;

use thiserror::Error;

/// Reasons a pattern string is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("pattern '{0}' may only use '*' as its final character")]
    MisplacedWildcard(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches exactly this path.
    Exact(String),
    /// Matches any path starting with this literal.
    Prefix(String),
}

impl PathPattern {
    /// Compile a pattern such as `/health` or `/sign-in*`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::NotAbsolute(raw.to_string()));
        }

        match raw.find('*') {
            None => Ok(Self::Exact(raw.to_string())),
            Some(idx) if idx == raw.len() - 1 => Ok(Self::Prefix(raw[..idx].to_string())),
            Some(_) => Err(PatternError::MisplacedWildcard(raw.to_string())),
        }
    }

    /// Returns true if the path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(literal) => path == literal,
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(literal) => f.write_str(literal),
            Self::Prefix(prefix) => write!(f, "{prefix}*"),
        }
    }
}
