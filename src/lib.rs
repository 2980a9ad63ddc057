//! cert_tracker library: periodic TLS certificate fingerprinting
//!
//! This library resolves a configured set of hostnames through a chosen DNS
//! server, connects to every address it gets back on port 443, and logs the
//! SHA-256 fingerprint of each certificate the server presents. Certificates
//! are never validated, so expired and self-signed chains are logged too.
//!
//! # Example
//!
//! ```no_run
//! use cert_tracker::config::load_config;
//! use cert_tracker::scan_once;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = load_config(Path::new("config.json"))?;
//! let report = scan_once(&params).await;
//! println!(
//!     "Probed {} addresses: {} certificates logged, {} failures",
//!     report.addresses_probed, report.certificates_logged, report.probe_failures
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
mod run;
pub mod tls;

// Re-export public API
pub use config::{Hostname, LogFormat, LogLevel, Opt, Params};
pub use dns::{resolve, NameAddressMapping, NameLookup};
pub use run::{run_periodically, scan_once, scan_with, ScanReport};
pub use tls::{probe_certificates, CertificateDetails};
