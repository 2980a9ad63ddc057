//! Error handling.
//!
//! Errors are split by the stage that produces them:
//! - **Initialization**: logger setup
//! - **Configuration**: reading and validating the config file
//! - **Resolution**: the shared deadline of a resolution pass
//! - **Probe**: TCP/TLS failures for a single address
//!
//! Per-hostname lookup failures are deliberately not part of this taxonomy as
//! returned errors: the resolution engine logs and absorbs them.

mod types;

// Re-export public API
pub use types::{
    ConfigError, DurationError, HostnameError, InitializationError, ProbeError, ResolutionError,
};
