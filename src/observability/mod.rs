//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (group/route registration, build)
//! http (dispatch, misses, recovered panics, per-request trace)
//!     → tracing events
//!     → logging.rs (subscriber: EnvFilter + fmt, pretty or JSON)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
