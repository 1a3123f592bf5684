use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;
use crate::types::UpdateStatus;
use crate::{Error, Result};

/// Elapsed seconds below which the collector counts as live.
pub const LIVE_WITHIN_SECS: i64 = 5 * 60;
/// Elapsed seconds below which the collector counts as delayed.
pub const DELAYED_WITHIN_SECS: i64 = 30 * 60;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Live,
    Delayed,
    Offline,
}

impl Freshness {
    pub fn label(&self) -> &'static str {
        match self {
            Freshness::Live => "Live",
            Freshness::Delayed => "Delayed",
            Freshness::Offline => "Offline",
        }
    }
}

pub fn classify(last_update: DateTime<Utc>, now: DateTime<Utc>) -> Freshness {
    let elapsed = now - last_update;
    if elapsed < Duration::zero() {
        warn!("Last update {} is ahead of now {}, treating as offline", last_update, now);
        Freshness::Offline
    } else if elapsed < Duration::seconds(LIVE_WITHIN_SECS) {
        Freshness::Live
    } else if elapsed < Duration::seconds(DELAYED_WITHIN_SECS) {
        Freshness::Delayed
    } else {
        Freshness::Offline
    }
}

/// Parses an ISO-8601 timestamp. Values without an offset are local time.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| Error::Timestamp(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub freshness: Freshness,
    pub last_update: Option<DateTime<Utc>>,
    pub diagnostic: Option<String>,
}

/// Classifies a status record. An unreadable timestamp reports offline.
pub fn assess(status: &UpdateStatus, now: DateTime<Utc>) -> StatusReport {
    match parse_timestamp(&status.last_update) {
        Ok(last_update) => StatusReport {
            freshness: classify(last_update, now),
            last_update: Some(last_update),
            diagnostic: None,
        },
        Err(e) => {
            warn!("Could not read last update time: {}", e);
            StatusReport {
                freshness: Freshness::Offline,
                last_update: None,
                diagnostic: Some(format!("Could not read last update time: {}", e)),
            }
        }
    }
}
