//! Edge request pipeline: route classification, authentication gating,
//! locale resolution and response composition in front of a web application.

// Core subsystems
pub mod config;
pub mod http;
pub mod pipeline;
pub mod routing;

// Pipeline stages
pub mod auth;
pub mod locale;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::Pipeline;
