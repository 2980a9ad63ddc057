//! Periodic scan trigger.

use log::{debug, info};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::{format_duration, Params};

use super::scan::scan_once;

/// Runs a scan cycle immediately and then once per `scanInterval`.
///
/// A cycle that overruns the interval delays the next one instead of
/// triggering a burst of catch-up cycles. Returns once `cancel` fires; a
/// cycle in progress is dropped at its next await point.
pub async fn run_periodically(params: &Params, cancel: CancellationToken) {
    let mut ticker = interval(params.scan_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        interval:% = format_duration(params.scan_interval),
        hostnames = params.hostnames.len();
        "starting periodic scans"
    );

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            report = scan_once(params) => {
                debug!(
                    hostnamesResolved = report.hostnames_resolved,
                    addressesProbed = report.addresses_probed,
                    probeFailures = report.probe_failures,
                    certificatesLogged = report.certificates_logged;
                    "scan cycle finished"
                );
            }
        }
    }

    info!("periodic scans stopped");
}
