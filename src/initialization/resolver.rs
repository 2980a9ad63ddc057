//! DNS resolver initialization.
//!
//! This module builds the resolver the scan uses: hickory's own DNS client,
//! pinned to a single upstream server.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts,
};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_PORT;

/// Builds the resolver options for a single upstream with the given timeout.
pub(crate) fn resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    // Queries go to the configured server only, never to /etc/hosts.
    opts.use_hosts_file = false;
    // Names are looked up as written; no search domain is ever appended.
    opts.ndots = 0;
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts.cache_size = 0;
    opts
}

/// Initializes a DNS resolver bound to one upstream server.
///
/// Every query is sent by hickory itself (UDP, falling back to TCP) to
/// `dns_server` on port 53; the operating system resolver and hosts file are
/// never consulted. Each query attempt is bounded by `timeout`.
///
/// Construction does not touch the network: an unreachable or wrong address
/// only shows up as lookup failures later.
///
/// # Arguments
///
/// * `dns_server` - Address of the upstream DNS server
/// * `timeout` - Per-query timeout
///
/// # Returns
///
/// A `TokioAsyncResolver`; it is cheap to clone and safe to share across tasks.
pub fn init_resolver(dns_server: IpAddr, timeout: Duration) -> TokioAsyncResolver {
    let name_servers = NameServerConfigGroup::from_ips_clear(&[dns_server], DNS_PORT, true);
    let config = ResolverConfig::from_parts(None, vec![], name_servers);

    TokioAsyncResolver::tokio(config, resolver_opts(timeout))
}
