//! Reference "now" for triage.
//!
//! Callers should send the requester's local wall-clock time. When they
//! don't, server time is used instead, which can shift buckets by a day
//! for users far from the server's timezone. Existing callers rely on the
//! fallback, so it stays.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::error::TriageError;
use crate::types::ReferenceSource;

/// The reference day plus where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTime {
    pub date: NaiveDate,
    pub source: ReferenceSource,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 reference time into the requester's calendar day.
///
/// The offset, when present, is not converted: the wall-clock date the
/// requester saw is the reference.
pub fn parse_reference(raw: &str) -> Result<NaiveDate, TriageError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TriageError::InvalidReferenceTime("empty".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TriageError::InvalidReferenceTime(raw.to_string()))
}

/// Resolve the reference day, falling back to server time.
pub fn resolve_reference(raw: Option<&str>) -> ReferenceTime {
    if let Some(raw) = raw {
        match parse_reference(raw) {
            Ok(date) => {
                return ReferenceTime {
                    date,
                    source: ReferenceSource::Client,
                }
            }
            Err(e) => log::warn!("{}; using server time", e),
        }
    } else {
        log::debug!("No client reference time; using server time");
    }

    ReferenceTime {
        date: Local::now().date_naive(),
        source: ReferenceSource::Server,
    }
}
