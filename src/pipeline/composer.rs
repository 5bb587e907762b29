//! Response composition.
//!
//! The downstream response passes through untouched apart from the locale
//! cookie. Rejections never reach this point with downstream content.

use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::Response;

use crate::locale::{LocaleCookie, Resolution};

/// The `Set-Cookie` value owed for this resolution, if any.
pub fn locale_cookie(resolution: Option<&Resolution>, cookie: &LocaleCookie) -> Option<HeaderValue> {
    let resolution = resolution.filter(|r| r.needs_cookie())?;
    match cookie.set_cookie(&resolution.locale) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, locale = %resolution.locale, "Skipping invalid locale cookie");
            None
        }
    }
}

/// Attach the locale cookie to the downstream response.
///
/// Appended rather than inserted so cookies set downstream survive.
pub fn compose(mut response: Response, set_cookie: Option<HeaderValue>) -> Response {
    if let Some(value) = set_cookie {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}
