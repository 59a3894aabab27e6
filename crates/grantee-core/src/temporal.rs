//! # Store Timestamps
//!
//! `Timestamp` records when the off-chain store persisted a content record.
//! It is informational only and never part of a commitment.
//!
//! The store is a JavaScript service and reports `storedAt` either as an
//! RFC 3339 string or as `Date.now()` epoch milliseconds. Both are accepted;
//! values are normalized to UTC at second precision and always written back
//! as `YYYY-MM-DDTHH:MM:SSZ`.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GranteeError;

/// A UTC instant at second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(whole_seconds(Utc::now()))
    }

    /// Parse RFC 3339 with any offset.
    pub fn parse(s: &str) -> Result<Self, GranteeError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| GranteeError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self(whole_seconds(dt.with_timezone(&Utc))))
    }

    /// From JavaScript epoch milliseconds.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, GranteeError> {
        DateTime::from_timestamp_millis(millis)
            .map(|dt| Self(whole_seconds(dt)))
            .ok_or_else(|| GranteeError::InvalidTimestamp(format!("epoch millis {millis}")))
    }

    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Millis(i64),
            Text(String),
        }
        match Wire::deserialize(deserializer)? {
            Wire::Millis(ms) => Self::from_epoch_millis(ms),
            Wire::Text(s) => Self::parse(&s),
        }
        .map_err(serde::de::Error::custom)
    }
}

fn whole_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
