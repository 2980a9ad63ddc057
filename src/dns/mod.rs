//! DNS resolution.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - Forward (A/AAAA) and reverse (PTR) lookups behind the `NameLookup` trait
//! - Concurrent resolution of a hostname set under one shared deadline

mod lookup;
mod resolution;

// Re-export public API
pub use lookup::NameLookup;
pub use resolution::{resolve, NameAddressMapping};
