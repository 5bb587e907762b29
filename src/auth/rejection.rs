//! Authentication failure responses.

use axum::http::header::{LOCATION, WWW_AUTHENTICATE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use url::form_urlencoded;

use crate::auth::credentials::{Credentials, RequestKind};

/// The response surfaced when the gate rejects a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Browser navigation: send the user to sign in, then back.
    RedirectToSignIn { location: String },
    /// API call: plain 401.
    Unauthorized,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::RedirectToSignIn { location } => {
                (StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]).into_response()
            }
            Rejection::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, "Bearer")],
                "Unauthorized",
            )
                .into_response(),
        }
    }
}

/// Chooses the rejection shape for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionPolicy {
    sign_in_path: String,
}

impl RejectionPolicy {
    pub fn new(sign_in_path: impl Into<String>) -> Self {
        Self {
            sign_in_path: sign_in_path.into(),
        }
    }

    pub fn reject(&self, credentials: &Credentials) -> Rejection {
        match credentials.kind {
            RequestKind::Navigation => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("redirect_url", &credentials.path_and_query)
                    .finish();
                Rejection::RedirectToSignIn {
                    location: format!("{}?{}", self.sign_in_path, query),
                }
            }
            RequestKind::Api => Rejection::Unauthorized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(kind: RequestKind, path_and_query: &str) -> Credentials {
        Credentials {
            bearer: None,
            session: None,
            kind,
            path_and_query: path_and_query.to_string(),
        }
    }

    #[test]
    fn test_navigation_redirects_with_return_target() {
        let policy = RejectionPolicy::new("/sign-in");
        let rejection = policy.reject(&credentials(RequestKind::Navigation, "/dashboard?tab=a&b=1"));
        assert_eq!(
            rejection,
            Rejection::RedirectToSignIn {
                location: "/sign-in?redirect_url=%2Fdashboard%3Ftab%3Da%26b%3D1".into()
            }
        );

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(response.headers()[LOCATION]
            .to_str()
            .unwrap()
            .starts_with("/sign-in?redirect_url="));
    }

    #[test]
    fn test_api_is_unauthorized() {
        let policy = RejectionPolicy::new("/sign-in");
        let rejection = policy.reject(&credentials(RequestKind::Api, "/api/graphql"));
        assert_eq!(rejection, Rejection::Unauthorized);

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    }
}
