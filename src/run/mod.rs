//! Scan cycles.
//!
//! A scan cycle resolves every configured hostname and then probes each
//! resolved address for its certificate chain. The periodic trigger repeats
//! cycles until shutdown is requested.

mod scan;
mod schedule;

// Re-export public API
pub use scan::{scan_once, scan_with, ScanReport};
pub use schedule::run_periodically;
