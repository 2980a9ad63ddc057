//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON or a field failed validation.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// `dnsResolvers` was empty.
    #[error("configuration must list at least one DNS resolver")]
    NoResolvers,

    /// A duration field was zero.
    #[error("{field} must be a positive duration")]
    NonPositiveDuration {
        /// Name of the offending field (as spelled in the file)
        field: &'static str,
    },
}

/// Reasons a string is rejected as a hostname.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostnameError {
    /// Empty input.
    #[error("hostname is empty")]
    Empty,

    /// Longer than 253 characters.
    #[error("hostname is {0} characters long (maximum 253)")]
    TooLong(usize),

    /// An IPv4 or IPv6 literal was given instead of a name.
    #[error("IP address literals are not hostnames: {0}")]
    IpLiteral(String),

    /// A label is empty, too long, or contains characters outside `[A-Za-z0-9-]`,
    /// or starts/ends with a hyphen.
    #[error("invalid RFC 1123 hostname: {0:?}")]
    InvalidLabel(String),
}

/// Reasons a duration string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// Empty input.
    #[error("duration is empty")]
    Empty,

    /// A number without a unit (only "0" may omit it).
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// Anything that does not match `<number><unit>` repeated.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// The value does not fit in a `Duration`.
    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// Error returned by a resolution pass.
///
/// Individual lookup failures never surface here; they are logged and absorbed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The shared deadline elapsed before every hostname reported an outcome.
    #[error("context deadline exceeded: resolution pass did not finish within {timeout:?}")]
    DeadlineExceeded {
        /// The timeout the pass was started with
        timeout: Duration,
    },
}

/// Error types for a single TLS probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The hostname could not be used as a TLS server name (SNI).
    #[error("invalid server name {hostname}: {reason}")]
    InvalidServerName {
        /// Hostname that was rejected
        hostname: String,
        /// Reason given by rustls
        reason: String,
    },

    /// TCP connect failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// Address dialed
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// TCP connect did not finish in time.
    #[error("TCP connection timeout for {addr} ({timeout:?})")]
    ConnectTimeout {
        /// Address dialed
        addr: SocketAddr,
        /// Timeout applied
        timeout: Duration,
    },

    /// The TLS handshake failed.
    #[error("TLS handshake failed for {addr}: {source}")]
    Handshake {
        /// Address dialed
        addr: SocketAddr,
        /// Underlying error reported by rustls
        #[source]
        source: io::Error,
    },

    /// The TLS handshake did not finish in time.
    #[error("TLS handshake timeout for {addr} ({timeout:?})")]
    HandshakeTimeout {
        /// Address dialed
        addr: SocketAddr,
        /// Timeout applied
        timeout: Duration,
    },
}
