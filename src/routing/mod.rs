//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → path.rs (reject dot segments and encoded separators)
//!     → classifier.rs (public pattern lookup, locale-prefix stripping)
//!     → matcher.rs (evaluate exact / trailing-wildcard patterns)
//!     → Return: Public(pattern) or Protected
//!
//! Pattern Compilation (at startup):
//!     routes.public[]
//!     → Parse and validate each pattern
//!     → Freeze as immutable RouteClassifier
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at startup, immutable at runtime
//! - Pure predicate over the path: never reads headers, body or external state
//! - Deterministic: same input always yields the same classification
//! - Evaluated before any verifier call

pub mod classifier;
pub mod matcher;
pub mod path;

pub use classifier::{Classification, RouteClassifier};
pub use matcher::{PathPattern, PatternError};
pub use path::is_canonical;
