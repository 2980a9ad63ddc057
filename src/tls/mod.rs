//! TLS certificate collection.
//!
//! This module connects to an address, completes a TLS handshake without
//! verifying the server, and hands back the certificate chain the server
//! presented:
//! - Connection and handshake are each bounded by the configured timeout
//! - The hostname is sent as SNI so virtual hosts answer with their own chain
//! - Every certificate is logged with its chain position and SHA-256 fingerprint
//!
//! Uses `tokio-rustls` for async TLS connections.

mod certificate;
mod verifier;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rustls::pki_types::{CertificateDer, ServerName};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::TlsConnector;

use crate::config::Hostname;
use crate::error_handling::ProbeError;

pub use certificate::{
    certificate_details, log_certificate_chain, sha256_fingerprint, CertificateDetails,
    ChainPosition,
};

use verifier::AcceptAnyCertificate;

/// Client configuration that accepts any server certificate.
fn insecure_client_config() -> ClientConfig {
    ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate::new()))
        .with_no_client_auth()
}

/// Connects to `ip:port` and returns the certificate chain the server presents.
///
/// Certificate verification is disabled: expired, self-signed, and mismatched
/// chains are returned like any other.
///
/// # Arguments
///
/// * `hostname` - Name sent as SNI
/// * `ip` - Address to connect to
/// * `port` - TCP port (443 in production)
/// * `timeout` - Bound for the TCP connect and, separately, the TLS handshake
///
/// # Returns
///
/// The presented chain, leaf first. It may be empty.
///
/// # Errors
///
/// Returns a `ProbeError` if the hostname is not a valid server name, or if
/// the connection or handshake fails or times out.
pub async fn probe_certificates(
    hostname: &Hostname,
    ip: IpAddr,
    port: u16,
    timeout: Duration,
) -> Result<Vec<CertificateDer<'static>>, ProbeError> {
    let addr = SocketAddr::new(ip, port);

    let server_name = ServerName::try_from(hostname.to_string()).map_err(|e| {
        ProbeError::InvalidServerName {
            hostname: hostname.to_string(),
            reason: e.to_string(),
        }
    })?;

    debug!(hostname:% = hostname, addr:% = addr; "connecting");
    let sock = match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(sock)) => sock,
        Ok(Err(source)) => return Err(ProbeError::Connect { addr, source }),
        Err(_) => return Err(ProbeError::ConnectTimeout { addr, timeout }),
    };

    let connector = TlsConnector::from(Arc::new(insecure_client_config()));
    let mut tls_stream =
        match tokio::time::timeout(timeout, connector.connect(server_name, sock)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(ProbeError::Handshake { addr, source }),
            Err(_) => return Err(ProbeError::HandshakeTimeout { addr, timeout }),
        };

    let chain = tls_stream
        .get_ref()
        .1
        .peer_certificates()
        .map(|certs| certs.to_vec())
        .unwrap_or_default();
    debug!(hostname:% = hostname, addr:% = addr, certificates = chain.len(); "handshake complete");

    // Best effort close_notify; the chain is already in hand.
    let _ = tokio::time::timeout(timeout, tls_stream.shutdown()).await;

    Ok(chain)
}
