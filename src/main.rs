//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cert_tracker` library that handles:
//! - Command-line argument parsing
//! - Configuration loading
//! - Logger initialization
//! - Ctrl-C shutdown
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::process;
use tokio_util::sync::CancellationToken;

use cert_tracker::config::load_config;
use cert_tracker::initialization::{init_crypto_provider, init_logger_with};
use cert_tracker::{run_periodically, scan_once, LogLevel, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    let params = match load_config(&opt.config) {
        Ok(params) => params,
        Err(e) => {
            // No file-level settings yet: report through a logger built from
            // the command line so log consumers see the failure too.
            let level = opt.log_level.unwrap_or(LogLevel::Info);
            if init_logger_with(level.into(), opt.log_format, false).is_ok() {
                error!(
                    path:% = opt.config.display(),
                    error:% = e;
                    "failed to load configuration parameters"
                );
            } else {
                eprintln!("cert_tracker error: {:#}", e);
            }
            process::exit(1);
        }
    };

    // The command line wins over the file for the level
    let log_level = opt.log_level.unwrap_or(params.log_level);
    init_logger_with(log_level.into(), opt.log_format, params.log_add_source)
        .context("Failed to initialize logger")?;

    init_crypto_provider();

    info!(config:serde = params; "application configuration loaded");

    if opt.once {
        let report = scan_once(&params).await;
        info!(
            hostnamesResolved = report.hostnames_resolved,
            addressesProbed = report.addresses_probed,
            probeFailures = report.probe_failures,
            certificatesLogged = report.certificates_logged;
            "scan finished"
        );
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                signal_cancel.cancel();
            }
            Err(e) => warn!(error:% = e; "cannot listen for Ctrl-C"),
        }
    });

    run_periodically(&params, cancel).await;
    Ok(())
}
