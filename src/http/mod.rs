//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower layers)
//!     → request.rs (assign request ID)
//!     → pipeline (classify, gate, resolve locale)
//!     → server.rs proxy_handler (forward to upstream)
//!     → pipeline composer (append locale cookie)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use server::{build_app, AppState, HttpServer};
