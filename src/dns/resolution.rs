//! Concurrent hostname resolution under one shared deadline.
//!
//! One task per hostname performs the forward lookup and, for observability,
//! a reverse lookup of every address it got back. Outcomes are gathered over
//! a channel until every hostname has reported or the deadline fires.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, timeout_at, Instant};

use crate::config::Hostname;
use crate::dns::lookup::NameLookup;
use crate::error_handling::ResolutionError;

/// A hostname and the addresses it resolved to in one pass.
///
/// Addresses keep the resolver's order and are neither sorted nor deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAddressMapping {
    /// Hostname that was looked up
    pub hostname: Hostname,
    /// IPv4 and IPv6 addresses returned for it
    pub ip_addresses: Vec<IpAddr>,
}

/// A forward lookup that did not produce addresses.
#[derive(Debug)]
pub(crate) struct LookupFailure {
    pub(crate) hostname: Hostname,
    pub(crate) error: anyhow::Error,
}

type LookupOutcome = Result<NameAddressMapping, LookupFailure>;

// Used when `now + timeout` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Resolves one hostname and reverse-resolves each of its addresses.
///
/// Reverse lookup results are only logged; a failed reverse lookup never
/// turns the outcome into a failure.
async fn resolve_one(
    hostname: Hostname,
    resolver: Arc<dyn NameLookup>,
    deadline: Instant,
) -> LookupOutcome {
    let addresses = match timeout_at(deadline, resolver.lookup_ip(hostname.as_str())).await {
        Ok(Ok(addresses)) => addresses,
        Ok(Err(error)) => return Err(LookupFailure { hostname, error }),
        Err(_) => {
            return Err(LookupFailure {
                hostname,
                error: anyhow!("lookup did not finish before the pass deadline"),
            })
        }
    };

    // Reverse lookups share the pass deadline. An error is only logged, but a
    // reverse lookup still pending at the deadline holds back this outcome, so
    // the pass as a whole reports DeadlineExceeded.
    for ip in &addresses {
        match timeout_at(deadline, resolver.reverse_lookup(*ip)).await {
            Ok(Ok(names)) => {
                for ptr in names {
                    info!(addr:% = ip, ptr = ptr.as_str(); "reverse DNS lookup");
                }
            }
            Ok(Err(e)) => warn!(addr:% = ip, error:% = e; "reverse lookup error"),
            Err(_) => warn!(addr:% = ip, error = "deadline exceeded"; "reverse lookup error"),
        }
    }

    Ok(NameAddressMapping {
        hostname,
        ip_addresses: addresses,
    })
}

/// Resolves every hostname concurrently against `resolver`.
///
/// All lookups share one deadline, `now + timeout`. Each hostname gets its own
/// task; there is no concurrency limit. Duplicate hostnames are resolved once
/// per occurrence.
///
/// Hostnames whose forward lookup fails are left out of the result. When
/// every lookup fails the first error is logged at warn level and each error
/// at debug level; the caller still gets `Ok` with no mappings and is expected
/// to try again on its next cycle.
///
/// # Arguments
///
/// * `hostnames` - Hostnames to resolve (an empty slice returns at once)
/// * `resolver` - Shared DNS client
/// * `timeout` - Bound for the whole pass
///
/// # Returns
///
/// One mapping per successful lookup, in completion order.
///
/// # Errors
///
/// Returns `ResolutionError::DeadlineExceeded` if the deadline fires before
/// every hostname has reported. No partial mappings are returned in that case.
pub async fn resolve(
    hostnames: &[Hostname],
    resolver: Arc<dyn NameLookup>,
    timeout: Duration,
) -> Result<Vec<NameAddressMapping>, ResolutionError> {
    if hostnames.is_empty() {
        return Ok(Vec::new());
    }

    let start = Instant::now();
    let deadline = start
        .checked_add(timeout)
        .unwrap_or_else(|| start + FAR_FUTURE);

    // One slot per worker: a send never waits for the collector.
    let (tx, mut rx) = mpsc::channel::<LookupOutcome>(hostnames.len());
    for hostname in hostnames {
        let tx = tx.clone();
        let resolver = Arc::clone(&resolver);
        let hostname = hostname.clone();
        tokio::spawn(async move {
            let outcome = resolve_one(hostname, resolver, deadline).await;
            // The receiver is gone if the pass was abandoned at the deadline.
            let _ = tx.send(outcome).await;
        });
    }
    drop(tx);

    let sleep = sleep_until(deadline);
    tokio::pin!(sleep);

    let mut mappings = Vec::with_capacity(hostnames.len());
    let mut failures = Vec::new();
    for _ in 0..hostnames.len() {
        tokio::select! {
            biased;
            _ = &mut sleep => {
                return Err(ResolutionError::DeadlineExceeded { timeout });
            }
            outcome = rx.recv() => {
                // The timer has millisecond granularity; an outcome that
                // arrives after the deadline does not count.
                if Instant::now() >= deadline {
                    return Err(ResolutionError::DeadlineExceeded { timeout });
                }
                match outcome {
                    Some(Ok(mapping)) => mappings.push(mapping),
                    Some(Err(failure)) => failures.push(failure),
                    // Every sender is gone: a worker panicked before reporting.
                    None => break,
                }
            }
        }
    }

    if mappings.is_empty() {
        if let Some(first) = failures.first() {
            warn!(
                hostname:% = first.hostname,
                error:% = first.error,
                failed = failures.len();
                "all DNS lookups failed; logging only first error"
            );
            for failure in &failures {
                debug!(
                    hostname:% = failure.hostname,
                    error:% = failure.error;
                    "debug logging all DNS lookup errors"
                );
            }
        }
    }

    Ok(mappings)
}
