//! Locale cookie reading and writing.

use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::{HeaderMap, HeaderValue};

use crate::locale::code::LocaleCode;

/// Find a cookie value by name across every `Cookie` header.
///
/// HTTP/2 clients may split cookies over several headers, so all of them are
/// scanned. The first pair with a matching name wins.
pub fn read_cookie<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| val.trim())
        })
}

/// Attributes of the cookie that persists the resolved locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCookie {
    name: String,
    max_age_secs: u64,
}

impl LocaleCookie {
    pub fn new(name: impl Into<String>, max_age_secs: u64) -> Self {
        Self {
            name: name.into(),
            max_age_secs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw cookie value from the request, if any. Not validated.
    pub fn read<'h>(&self, headers: &'h HeaderMap) -> Option<&'h str> {
        read_cookie(headers, &self.name)
    }

    /// Build the `Set-Cookie` value persisting `locale`.
    pub fn set_cookie(&self, locale: &LocaleCode) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; Max-Age={}",
            self.name, locale, self.max_age_secs
        ))
    }
}
