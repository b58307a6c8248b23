#![forbid(unsafe_code)]

//! Logging facade.
//!
//! Re-exports the `tracing` macros used by the engine when the `tracing`
//! feature is enabled. Without the feature the same macro names expand to
//! nothing, so call sites never need their own `cfg` gates.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

// The no-op macros are exported at the crate root via #[macro_export].
#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace};
