//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Protected request
//!     → credentials.rs (bearer token, session cookie, navigation vs API)
//!     → gate.rs (timeout-bounded call)
//!     → verifier.rs (Verifier::verify → Allow | Deny(Rejection))
//!     → rejection.rs (307 to sign-in, or 401)
//! ```
//!
//! # Design Decisions
//! - Fail closed: timeouts and verifier errors reject the request
//! - The pipeline never validates credentials itself
//! - Verifier is a trait object so tests can inject deterministic fakes

pub mod credentials;
pub mod gate;
pub mod rejection;
pub mod verifier;

pub use credentials::{Credentials, RequestKind};
pub use gate::{AuthGate, FailureReason, GateOutcome};
pub use rejection::{Rejection, RejectionPolicy};
pub use verifier::{
    RemoteVerifier, StaticTokenVerifier, Verdict, Verifier, VerifyError, VerifyFuture,
};
