//! One scan cycle: resolve, then probe every resolved address.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use crate::config::{Hostname, Params, HTTPS_PORT};
use crate::dns::{resolve, NameLookup};
use crate::initialization::init_resolver;
use crate::tls::{log_certificate_chain, probe_certificates};

/// Counters for one scan cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Hostnames that resolved to at least one address
    pub hostnames_resolved: usize,
    /// Addresses a TLS probe was attempted against
    pub addresses_probed: usize,
    /// Probes that failed to connect or complete the handshake
    pub probe_failures: usize,
    /// Certificates fingerprinted and logged
    pub certificates_logged: usize,
}

/// Runs one scan cycle using the first configured DNS resolver.
///
/// # Arguments
///
/// * `params` - Loaded configuration; must list at least one resolver
///
/// # Returns
///
/// Counters for the cycle. Failures are logged, never returned.
pub async fn scan_once(params: &Params) -> ScanReport {
    let Some(&dns_server) = params.dns_resolvers.first() else {
        warn!("no DNS resolvers configured");
        return ScanReport::default();
    };
    let resolver = Arc::new(init_resolver(dns_server, params.timeout));
    scan_with(resolver, &params.hostnames, params.timeout, HTTPS_PORT).await
}

/// Runs one scan cycle against an explicit resolver and port.
///
/// Addresses are probed one after another in mapping order. A failed probe
/// is logged and the cycle moves on to the next address.
pub async fn scan_with(
    resolver: Arc<dyn NameLookup>,
    hostnames: &[Hostname],
    timeout: Duration,
    port: u16,
) -> ScanReport {
    let mut report = ScanReport::default();

    let mappings = match resolve(hostnames, resolver, timeout).await {
        Ok(mappings) => mappings,
        Err(e) => {
            warn!(error:% = e; "cannot resolve IP addresses");
            return report;
        }
    };

    if mappings.is_empty() {
        warn!("no name to address mappings");
        return report;
    }

    info!(addresses:serde = mappings; "resolved IP addresses");
    report.hostnames_resolved = mappings.len();

    for mapping in &mappings {
        for &ip in &mapping.ip_addresses {
            report.addresses_probed += 1;
            match probe_certificates(&mapping.hostname, ip, port, timeout).await {
                Ok(chain) => {
                    report.certificates_logged +=
                        log_certificate_chain(&mapping.hostname, ip, &chain);
                }
                Err(e) => {
                    report.probe_failures += 1;
                    error!(
                        hostname:% = mapping.hostname,
                        ipAddress:% = ip,
                        error:% = e;
                        "connection error"
                    );
                }
            }
        }
    }

    report
}
