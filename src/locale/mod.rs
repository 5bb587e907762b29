//! Locale subsystem.
//!
//! # Data Flow
//! ```text
//! Request headers
//!     → cookie.rs (read NEXT_LOCALE)
//!     → code.rs (validate against the supported set)
//!     → negotiation.rs (Accept-Language, only if the cookie was unusable)
//!     → resolver.rs (Resolution { locale, source })
//!     → cookie.rs (Set-Cookie when source != Cookie)
//!
//! Startup:
//!     locale config → LocaleSet → bundles.rs (one bundle per locale)
//! ```
//!
//! # Design Decisions
//! - Client-supplied values become `LocaleCode` only after a set lookup
//! - Unsupported values are dropped, never propagated
//! - Missing bundles fail startup instead of surfacing per request

pub mod bundles;
pub mod code;
pub mod cookie;
pub mod negotiation;
pub mod resolver;

pub use bundles::{BundleError, MessageBundles};
pub use code::{LocaleCode, LocaleSet, LocaleSetError};
pub use cookie::LocaleCookie;
pub use negotiation::{negotiate, parse_accept_language, LanguagePreference};
pub use resolver::{LocaleResolver, LocaleSource, Resolution};
