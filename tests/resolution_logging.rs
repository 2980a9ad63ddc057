//! Log records emitted by a resolution pass.
//!
//! This file runs as its own test binary so it can install a recording
//! logger as the global `log` backend.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use cert_tracker::{resolve, Hostname, NameLookup};
use log::kv::Key;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

const ALL_FAILED: &str = "all DNS lookups failed; logging only first error";
const EACH_FAILURE: &str = "debug logging all DNS lookup errors";

#[derive(Debug, Clone)]
struct Entry {
    level: Level,
    message: String,
    hostname: Option<String>,
}

struct RecordingLogger {
    entries: Mutex<Vec<Entry>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let hostname = record
            .key_values()
            .get(Key::from_str("hostname"))
            .map(|v| v.to_string());
        self.entries.lock().unwrap().push(Entry {
            level: record.level(),
            message: record.args().to_string(),
            hostname,
        });
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
    entries: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

fn install_logger() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in this binary");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Entries that mention one of `hostnames`. Tests run concurrently, so each
/// test looks only at its own names.
fn entries_for(hostnames: &[&str]) -> Vec<Entry> {
    let wanted: HashSet<&str> = hostnames.iter().copied().collect();
    LOGGER
        .entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.hostname.as_deref().is_some_and(|h| wanted.contains(h)))
        .cloned()
        .collect()
}

/// Resolves `*.ok.test` names to one address and fails everything else.
struct SuffixLookup;

#[async_trait]
impl NameLookup for SuffixLookup {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>> {
        if host.ends_with(".ok.test") {
            Ok(vec!["192.0.2.1".parse()?])
        } else {
            Err(anyhow!("SERVFAIL for {host}"))
        }
    }

    async fn reverse_lookup(&self, _ip: IpAddr) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

fn hostnames(names: &[&str]) -> Vec<Hostname> {
    names.iter().map(|n| n.parse().unwrap()).collect()
}

#[tokio::test]
async fn test_all_failed_logs_first_error_and_every_error() {
    install_logger();
    let names = ["one.allfail.test", "two.allfail.test", "three.allfail.test"];

    let mappings = resolve(&hostnames(&names), Arc::new(SuffixLookup), Duration::from_secs(5))
        .await
        .unwrap();
    assert!(mappings.is_empty());

    let entries = entries_for(&names);
    let warnings: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.level == Level::Warn && e.message == ALL_FAILED)
        .collect();
    assert_eq!(warnings.len(), 1);

    let per_failure: HashSet<String> = entries
        .iter()
        .filter(|e| e.level == Level::Debug && e.message == EACH_FAILURE)
        .filter_map(|e| e.hostname.clone())
        .collect();
    let expected: HashSet<String> = names.iter().map(|n| n.to_string()).collect();
    assert_eq!(per_failure, expected);
    assert_eq!(
        entries
            .iter()
            .filter(|e| e.message == EACH_FAILURE)
            .count(),
        3
    );
}

#[tokio::test]
async fn test_mixed_outcome_does_not_log_failures() {
    install_logger();
    let names = ["good.mixed.ok.test", "bad.mixed.test", "worse.mixed.test"];

    let mappings = resolve(&hostnames(&names), Arc::new(SuffixLookup), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(mappings.len(), 1);

    let entries = entries_for(&names);
    assert!(
        entries.is_empty(),
        "failures in a mixed pass must not be logged: {entries:?}"
    );
}
