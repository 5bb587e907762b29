//! Axum middleware running the pipeline around the downstream service.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::pipeline::{composer, Decision, Pipeline};

/// Classify, gate, resolve, then compose the downstream response.
pub async fn edge_pipeline(
    State(pipeline): State<Arc<Pipeline>>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = request_id(request.headers()).to_string();

    let resolution = match pipeline.decide(request.headers(), request.uri()).await {
        Decision::InvalidPath => {
            tracing::info!(
                request_id = %request_id,
                path = %request.uri().path(),
                "Rejected non-canonical path"
            );
            return (StatusCode::BAD_REQUEST, "Invalid request path").into_response();
        }
        Decision::Reject(rejection) => {
            tracing::info!(
                request_id = %request_id,
                path = %request.uri().path(),
                "Request rejected by auth gate"
            );
            return rejection.into_response();
        }
        Decision::Proceed(resolution) => resolution,
    };

    if let Some(resolution) = &resolution {
        tracing::debug!(
            request_id = %request_id,
            locale = %resolution.locale,
            source = resolution.source.as_str(),
            "Locale resolved"
        );
        request
            .extensions_mut()
            .insert(pipeline.active_locale(resolution));
    }

    let set_cookie = composer::locale_cookie(resolution.as_ref(), pipeline.resolver().cookie());
    let response = next.run(request).await;
    composer::compose(response, set_cookie)
}
