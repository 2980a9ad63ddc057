//! Validated hostnames.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::constants::{MAX_HOSTNAME_LEN, MAX_LABEL_LEN};
use crate::error_handling::HostnameError;

/// One RFC 1123 label: alphanumeric at both ends, hyphens allowed inside.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$").expect("valid label regex")
});

/// A domain name in RFC 1123 host syntax.
///
/// Bare IP literals, whitespace, empty labels, and labels starting or ending
/// with a hyphen are rejected. A single trailing dot (fully-qualified form) is
/// accepted and kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Returns the hostname as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(name: &str) -> Result<(), HostnameError> {
    if name.is_empty() {
        return Err(HostnameError::Empty);
    }
    if name.len() > MAX_HOSTNAME_LEN {
        return Err(HostnameError::TooLong(name.len()));
    }
    if name.parse::<IpAddr>().is_ok() {
        return Err(HostnameError::IpLiteral(name.to_string()));
    }

    let relative = name.strip_suffix('.').unwrap_or(name);
    for label in relative.split('.') {
        if label.len() > MAX_LABEL_LEN || !LABEL_RE.is_match(label) {
            return Err(HostnameError::InvalidLabel(name.to_string()));
        }
    }
    Ok(())
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl FromStr for Hostname {
    type Err = HostnameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl From<Hostname> for String {
    fn from(h: Hostname) -> Self {
        h.0
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
