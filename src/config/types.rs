//! Configuration types and CLI options.
//!
//! This module defines the configuration file schema (`Params`), the logging
//! enums shared by the file and the command line, and the CLI options (`Opt`).

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_CONFIG_PATH;
use crate::config::duration;
use crate::config::hostname::Hostname;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). In the configuration file the level is matched without
/// regard to case, and `warning` is accepted for `warn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "unknown log level `{value}`, expected one of error, warn, info, debug, trace"
            )),
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Json`: one JSON object per line, for log shippers (default)
/// - `Plain`: human-readable format with colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Parameters loaded from the configuration file.
///
/// Passed by reference into the scan driver and resolver factory; there is no
/// process-wide configuration state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// Upstream DNS servers. Only the first one is queried.
    pub dns_resolvers: Vec<IpAddr>,

    /// Hostnames to scan on every cycle.
    pub hostnames: Vec<Hostname>,

    /// Bound for a whole resolution pass, and for each TCP connect and TLS
    /// handshake.
    #[serde(
        deserialize_with = "duration::deserialize",
        serialize_with = "duration::serialize"
    )]
    pub timeout: Duration,

    /// Time between the start of two scan cycles.
    #[serde(
        deserialize_with = "duration::deserialize",
        serialize_with = "duration::serialize"
    )]
    pub scan_interval: Duration,

    /// Minimum level written to the log.
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    /// Add the source file and line to every log line.
    #[serde(default)]
    pub log_add_source: bool,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cert_tracker",
    about = "Resolves hostnames on a fixed interval and logs every TLS certificate their addresses present"
)]
pub struct Opt {
    /// Path to the JSON configuration file
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// Override the log level from the configuration file
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Run a single scan cycle and exit
    #[arg(long)]
    pub once: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_level_deserialize_aliases() {
        for (input, expected) in [
            (r#""info""#, LogLevel::Info),
            (r#""INFO""#, LogLevel::Info),
            (r#""warn""#, LogLevel::Warn),
            (r#""WARNING""#, LogLevel::Warn),
            (r#""debug""#, LogLevel::Debug),
            (r#""error""#, LogLevel::Error),
            (r#""Info""#, LogLevel::Info),
            (r#""Warn""#, LogLevel::Warn),
            (r#""Debug""#, LogLevel::Debug),
            (r#""Warning""#, LogLevel::Warn),
            (r#""tRaCe""#, LogLevel::Trace),
        ] {
            let level: LogLevel = serde_json::from_str(input).unwrap();
            assert_eq!(level, expected, "input {input}");
        }
        let err = serde_json::from_str::<LogLevel>(r#""verbose""#).unwrap_err();
        assert!(err.to_string().contains("unknown log level `verbose`"));
    }

    #[test]
    fn test_params_deserialize() {
        let params: Params = serde_json::from_str(
            r#"{
                "dnsResolvers": ["8.8.8.8", "1.1.1.1"],
                "hostnames": ["example.com", "test.com"],
                "timeout": "30s",
                "scanInterval": "5m",
                "logLevel": "info",
                "logAddSource": true
            }"#,
        )
        .unwrap();

        assert_eq!(
            params.dns_resolvers,
            vec![
                "8.8.8.8".parse::<IpAddr>().unwrap(),
                "1.1.1.1".parse::<IpAddr>().unwrap()
            ]
        );
        assert_eq!(params.hostnames.len(), 2);
        assert_eq!(params.hostnames[1].as_str(), "test.com");
        assert_eq!(params.timeout, Duration::from_secs(30));
        assert_eq!(params.scan_interval, Duration::from_secs(300));
        assert_eq!(params.log_level, LogLevel::Info);
        assert!(params.log_add_source);
    }

    #[test]
    fn test_params_defaults_for_logging_fields() {
        let params: Params = serde_json::from_str(
            r#"{
                "dnsResolvers": ["9.9.9.9"],
                "hostnames": [],
                "timeout": "1s",
                "scanInterval": "1m"
            }"#,
        )
        .unwrap();
        assert_eq!(params.log_level, LogLevel::Info);
        assert!(!params.log_add_source);
    }

    #[test]
    fn test_params_rejects_invalid_fields() {
        let bad_hostname = r#"{
            "dnsResolvers": ["8.8.8.8"],
            "hostnames": ["192.168.1.1"],
            "timeout": "30s",
            "scanInterval": "5m"
        }"#;
        assert!(serde_json::from_str::<Params>(bad_hostname).is_err());

        let bad_duration = r#"{
            "dnsResolvers": ["8.8.8.8"],
            "hostnames": ["example.com"],
            "timeout": "invalid",
            "scanInterval": "5m"
        }"#;
        assert!(serde_json::from_str::<Params>(bad_duration).is_err());

        let bad_resolver = r#"{
            "dnsResolvers": ["dns.google"],
            "hostnames": ["example.com"],
            "timeout": "30s",
            "scanInterval": "5m"
        }"#;
        assert!(serde_json::from_str::<Params>(bad_resolver).is_err());
    }

    #[test]
    fn test_params_serialize_uses_file_notation() {
        let params = Params {
            dns_resolvers: vec!["8.8.8.8".parse().unwrap()],
            hostnames: vec!["example.com".parse().unwrap()],
            timeout: Duration::from_secs(30),
            scan_interval: Duration::from_secs(300),
            log_level: LogLevel::Debug,
            log_add_source: false,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["timeout"], "30s");
        assert_eq!(json["scanInterval"], "5m0s");
        assert_eq!(json["logLevel"], "debug");
        assert_eq!(json["dnsResolvers"][0], "8.8.8.8");
    }

    #[test]
    fn test_opt_defaults() {
        let opt = Opt::try_parse_from(["cert_tracker"]).unwrap();
        assert_eq!(opt.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(opt.log_format, LogFormat::Json);
        assert_eq!(opt.log_level, None);
        assert!(!opt.once);
    }

    #[test]
    fn test_opt_overrides() {
        let opt = Opt::try_parse_from([
            "cert_tracker",
            "--config",
            "/etc/cert_tracker.json",
            "--log-format",
            "plain",
            "--log-level",
            "debug",
            "--once",
        ])
        .unwrap();
        assert_eq!(opt.config, PathBuf::from("/etc/cert_tracker.json"));
        assert_eq!(opt.log_format, LogFormat::Plain);
        assert_eq!(opt.log_level, Some(LogLevel::Debug));
        assert!(opt.once);
    }
}
