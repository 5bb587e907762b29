//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the upstream proxy handler
//! - Wire up middleware (request ID, tracing, timeout, edge pipeline)
//! - Bind server to listener
//! - Forward passed-through requests to the upstream application

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        HeaderMap, StatusCode, Uri, Version,
    },
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, TimeoutConfig};
use crate::http::request::{request_id, MakeRequestUuid};
use crate::lifecycle::{os_shutdown_signal, ShutdownSignal};
use crate::pipeline::{edge_pipeline, BuildError, Pipeline};

/// Hop-by-hop headers, meaningful only for a single connection.
const HOP_BY_HOP: [header::HeaderName; 6] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
];

/// Application state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

/// HTTP server for the edge gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, BuildError> {
        let pipeline = Arc::new(Pipeline::from_config(&config)?);
        Self::with_pipeline(config, pipeline)
    }

    /// Create a server around an already-built pipeline.
    pub fn with_pipeline(config: GatewayConfig, pipeline: Arc<Pipeline>) -> Result<Self, BuildError> {
        let upstream = Authority::from_str(&config.upstream.address)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState { client, upstream };
        let downstream = Router::new().fallback(proxy_handler).with_state(state);
        let router = build_app(pipeline, downstream, &config.timeouts);

        Ok(Self { router, config })
    }

    /// Run the server until an OS signal or `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = os_shutdown_signal() => {},
                    _ = shutdown.recv() => {},
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Layer the edge pipeline and the ambient middleware over `downstream`.
///
/// Outermost first: request ID, tracing, timeout, then the pipeline
/// directly around the downstream service.
#[allow(deprecated)]
pub fn build_app(pipeline: Arc<Pipeline>, downstream: Router, timeouts: &TimeoutConfig) -> Router {
    downstream.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(pipeline, edge_pipeline)),
    )
}

/// Forward a passed-through request to the upstream and relay its response.
async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    let request_id = request_id(request.headers()).to_string();
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };
    // The upstream connection is always HTTP/1.1, whatever the client spoke.
    parts.version = Version::HTTP_11;
    strip_hop_by_hop(&mut parts.headers);

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        uri = %parts.uri,
        "Forwarding to upstream"
    );

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (mut parts, body) = response.into_parts();
            strip_hop_by_hop(&mut parts.headers);
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}
