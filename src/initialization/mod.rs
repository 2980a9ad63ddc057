//! Process-wide setup.
//!
//! - Logger (plain or JSON lines)
//! - DNS resolver bound to one upstream server
//! - `ring` as the rustls crypto provider

mod logger;
mod resolver;

use rustls::crypto::{ring, CryptoProvider};

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Installs `ring` as the process-wide rustls crypto provider.
///
/// Call once before the first TLS probe. Returns `false` if a provider was
/// already installed, in which case the existing one stays in place.
pub fn init_crypto_provider() -> bool {
    CryptoProvider::install_default(ring::default_provider()).is_ok()
}
