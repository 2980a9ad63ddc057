//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (ports, defaults, limits)
//! - The configuration file schema and its loader
//! - Validated hostname and duration types
//! - CLI option types and parsing

mod constants;
pub mod duration;
mod hostname;
mod types;

use std::path::Path;

use crate::error_handling::ConfigError;

// Re-export all constants
pub use constants::*;
pub use duration::{format_duration, parse_duration};
pub use hostname::Hostname;
pub use types::{LogFormat, LogLevel, Opt, Params};

/// Parses and validates configuration from a JSON string.
///
/// # Errors
///
/// Returns `ConfigError::Parse` for malformed JSON or an invalid field
/// (hostname, duration, IP address), `ConfigError::NoResolvers` when
/// `dnsResolvers` is empty, and `ConfigError::NonPositiveDuration` when
/// `timeout` or `scanInterval` is zero.
pub fn parse_config(json: &str) -> Result<Params, ConfigError> {
    let params: Params = serde_json::from_str(json)?;

    if params.dns_resolvers.is_empty() {
        return Err(ConfigError::NoResolvers);
    }
    if params.timeout.is_zero() {
        return Err(ConfigError::NonPositiveDuration { field: "timeout" });
    }
    if params.scan_interval.is_zero() {
        return Err(ConfigError::NonPositiveDuration {
            field: "scanInterval",
        });
    }
    Ok(params)
}

/// Reads and validates the configuration file at `path`.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file cannot be read, otherwise any error
/// from [`parse_config`].
pub fn load_config(path: &Path) -> Result<Params, ConfigError> {
    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&data)
}
