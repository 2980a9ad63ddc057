//! Duration strings in the `30s` / `5m` / `1h30m45s` notation.
//!
//! Accepted units: `ns`, `us` (also `µs`, `μs`), `ms`, `s`, `m`, `h`. Each
//! component may carry a decimal fraction (`1.5s`). A leading `+` is allowed;
//! negative durations are not. A bare `0` is the only number allowed without a
//! unit.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error_handling::DurationError;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|μs|ms|s|m|h))+$")
        .expect("valid duration regex")
});

static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<int>\d*)(?:\.(?P<frac>\d*))?(?P<unit>ns|us|µs|μs|ms|s|m|h)")
        .expect("valid component regex")
});

// Fraction digits beyond this cannot change the nanosecond result.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> u128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        _ => 3_600 * 1_000_000_000,
    }
}

/// Parses a duration string such as `"30s"` or `"1h30m45s"`.
///
/// # Errors
///
/// Returns a [`DurationError`] for empty input, a number without a unit,
/// malformed input, or a value larger than `u64::MAX` nanoseconds.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let s = input.strip_prefix('+').unwrap_or(input);
    if s.is_empty() {
        return Err(DurationError::Empty);
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if !DURATION_RE.is_match(s) {
        if s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        return Err(DurationError::Invalid(input.to_string()));
    }

    let overflow = || DurationError::Overflow(input.to_string());
    let mut total: u128 = 0;
    for caps in COMPONENT_RE.captures_iter(s) {
        let unit = unit_nanos(&caps["unit"]);

        let int = &caps["int"];
        let whole: u128 = if int.is_empty() {
            0
        } else {
            int.parse().map_err(|_| overflow())?
        };
        total = whole
            .checked_mul(unit)
            .and_then(|n| total.checked_add(n))
            .ok_or_else(overflow)?;

        if let Some(frac) = caps.name("frac").map(|m| m.as_str()) {
            let digits = &frac[..frac.len().min(MAX_FRACTION_DIGITS)];
            if !digits.is_empty() {
                let value: u128 = digits.parse().map_err(|_| overflow())?;
                let scale = 10u128.pow(digits.len() as u32);
                total = total.checked_add(value * unit / scale).ok_or_else(overflow)?;
            }
        }
    }

    let nanos = u64::try_from(total).map_err(|_| overflow())?;
    Ok(Duration::from_nanos(nanos))
}

fn decimal(whole: u128, remainder: u128, digits: usize) -> String {
    if remainder == 0 {
        return whole.to_string();
    }
    let frac = format!("{remainder:0digits$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Formats a duration in the notation [`parse_duration`] accepts.
///
/// Sub-second values use the largest fitting unit (`1.5ms`); longer values are
/// written as hours, minutes and seconds (`5m0s`, `1h30m45s`).
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    match nanos {
        0 => return "0s".to_string(),
        n if n < 1_000 => return format!("{n}ns"),
        n if n < 1_000_000 => return format!("{}µs", decimal(n / 1_000, n % 1_000, 3)),
        n if n < 1_000_000_000 => {
            return format!("{}ms", decimal(n / 1_000_000, n % 1_000_000, 6))
        }
        _ => {}
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = decimal(
        u128::from(total_secs % 60),
        u128::from(d.subsec_nanos()),
        9,
    );
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// `deserialize_with` helper for duration fields.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

/// `serialize_with` helper for duration fields.
pub(crate) fn serialize<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(*d))
}
