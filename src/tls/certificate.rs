//! Per-certificate details and logging.

use std::net::IpAddr;

use log::{info, warn};
use rustls::pki_types::CertificateDer;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::{Hostname, INTERMEDIATE_LABEL, LEAF_LABEL};

/// Where a certificate sits in the presented chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainPosition {
    /// Index 0, the end-entity certificate
    Leaf,
    /// Any later index
    Intermediate,
}

impl ChainPosition {
    /// Position of the certificate at `index`.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Leaf
        } else {
            Self::Intermediate
        }
    }

    /// Label written to the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leaf => LEAF_LABEL,
            Self::Intermediate => INTERMEDIATE_LABEL,
        }
    }
}

/// The fields logged for one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetails {
    /// Hostname sent as SNI
    pub hostname: Hostname,
    /// Address the certificate was collected from
    pub ip_address: IpAddr,
    /// Index within the presented chain
    pub index: usize,
    /// `leaf` or `intermediate`
    pub target: ChainPosition,
    /// Lowercase hex SHA-256 of the DER encoding
    pub sha256_fingerprint: String,
}

/// Lowercase hex SHA-256 of `der`.
pub fn sha256_fingerprint(der: &[u8]) -> String {
    hex::encode(Sha256::digest(der))
}

/// Builds the logged details of the certificate at `index`.
pub fn certificate_details(
    der: &CertificateDer<'_>,
    index: usize,
    hostname: &Hostname,
    ip_address: IpAddr,
) -> CertificateDetails {
    CertificateDetails {
        hostname: hostname.clone(),
        ip_address,
        index,
        target: ChainPosition::from_index(index),
        sha256_fingerprint: sha256_fingerprint(der.as_ref()),
    }
}

/// Logs every certificate of a presented chain.
///
/// An empty chain is logged as a warning.
///
/// # Returns
///
/// The number of certificates logged.
pub fn log_certificate_chain(
    hostname: &Hostname,
    ip_address: IpAddr,
    chain: &[CertificateDer<'_>],
) -> usize {
    if chain.is_empty() {
        warn!(hostname:% = hostname, ipAddress:% = ip_address; "no certificates");
        return 0;
    }

    for (index, der) in chain.iter().enumerate() {
        let details = certificate_details(der, index, hostname, ip_address);
        info!(
            hostname:% = details.hostname,
            ipAddress:% = details.ip_address,
            index = details.index,
            target = details.target.as_str(),
            sha256Fingerprint = details.sha256_fingerprint.as_str();
            "certificate scanned"
        );
    }
    chain.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_fingerprint_known_vector() {
        assert_eq!(
            sha256_fingerprint(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(sha256_fingerprint(&[]).len(), 64);
    }

    #[test]
    fn test_chain_position_labels() {
        assert_eq!(ChainPosition::from_index(0), ChainPosition::Leaf);
        assert_eq!(ChainPosition::from_index(1), ChainPosition::Intermediate);
        assert_eq!(ChainPosition::from_index(7), ChainPosition::Intermediate);
        assert_eq!(ChainPosition::Leaf.as_str(), "leaf");
        assert_eq!(ChainPosition::Intermediate.as_str(), "intermediate");
    }

    #[test]
    fn test_certificate_details() {
        let der = CertificateDer::from(b"abc".to_vec());
        let hostname: Hostname = "example.com".parse().unwrap();
        let ip: IpAddr = "192.168.1.1".parse().unwrap();

        let leaf = certificate_details(&der, 0, &hostname, ip);
        assert_eq!(leaf.target, ChainPosition::Leaf);
        assert_eq!(leaf.index, 0);
        assert_eq!(leaf.ip_address, ip);
        assert_eq!(leaf.sha256_fingerprint, sha256_fingerprint(b"abc"));

        let intermediate = certificate_details(&der, 1, &hostname, ip);
        assert_eq!(intermediate.target, ChainPosition::Intermediate);
    }

    #[test]
    fn test_certificate_details_serialize() {
        let der = CertificateDer::from(vec![1u8, 2, 3]);
        let details = certificate_details(
            &der,
            1,
            &"test.com".parse().unwrap(),
            "10.0.0.1".parse().unwrap(),
        );
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["hostname"], "test.com");
        assert_eq!(json["ipAddress"], "10.0.0.1");
        assert_eq!(json["index"], 1);
        assert_eq!(json["target"], "intermediate");
        assert_eq!(json["sha256Fingerprint"], sha256_fingerprint(&[1, 2, 3]));
    }

    #[test]
    fn test_log_certificate_chain_counts() {
        let hostname: Hostname = "example.com".parse().unwrap();
        let ip: IpAddr = "192.0.2.1".parse().unwrap();
        let chain = vec![
            CertificateDer::from(vec![1u8]),
            CertificateDer::from(vec![2u8]),
        ];

        assert_eq!(log_certificate_chain(&hostname, ip, &chain), 2);
        assert_eq!(log_certificate_chain(&hostname, ip, &[]), 0);
    }
}
