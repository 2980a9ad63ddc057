//! Configuration constants.
//!
//! This module defines the fixed operational parameters: well-known ports,
//! defaults, and hostname limits.

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Port every upstream DNS server is dialed on (UDP and TCP).
pub const DNS_PORT: u16 = 53;

/// Port certificates are collected from.
pub const HTTPS_PORT: u16 = 443;

/// Maximum length of a hostname in its textual form (RFC 1035 §2.3.4).
pub const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum length of a single hostname label.
pub const MAX_LABEL_LEN: usize = 63;

/// Log label for the certificate at chain index 0.
pub const LEAF_LABEL: &str = "leaf";

/// Log label for every certificate after index 0.
pub const INTERMEDIATE_LABEL: &str = "intermediate";
