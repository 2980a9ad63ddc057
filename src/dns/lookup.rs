//! Forward and reverse lookups.
//!
//! The resolution engine talks to DNS through [`NameLookup`] so that every
//! worker can share one client, and so tests can substitute an in-process one.

use std::net::IpAddr;

use anyhow::{Error, Result};
use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

/// A DNS client that can be queried from many tasks at once.
#[async_trait]
pub trait NameLookup: Send + Sync {
    /// Resolves `host` to its A and AAAA addresses, in the order the server
    /// returned them.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or no address records exist.
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>>;

    /// Returns the PTR names for `ip`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or no PTR records exist.
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>>;
}

#[async_trait]
impl NameLookup for TokioAsyncResolver {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>> {
        let response = TokioAsyncResolver::lookup_ip(self, host)
            .await
            .map_err(Error::new)?;
        Ok(response.iter().collect())
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>> {
        let response = TokioAsyncResolver::reverse_lookup(self, ip)
            .await
            .map_err(Error::new)?;
        Ok(response.iter().map(|name| name.to_utf8()).collect())
    }
}
