//! Bar timestamps and granularity.

use std::fmt;

use chrono::{DateTime, NaiveDate, Timelike};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque, totally ordered bar timestamp (unix seconds).
///
/// Daily bars sit at midnight UTC, intraday bars at their open instant.
/// The wire format is either an integer timestamp or a `YYYY-MM-DD` date
/// string, matching what the data layer delivers for intraday vs daily
/// ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeValue(i64);

impl TimeValue {
    /// Create from a unix timestamp in seconds.
    pub const fn from_timestamp(secs: i64) -> Self {
        Self(secs)
    }

    /// Create from a calendar date (midnight UTC). Returns `None` for an
    /// invalid date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let dt = date.and_hms_opt(0, 0, 0)?;
        Some(Self(dt.and_utc().timestamp()))
    }

    /// Unix timestamp in seconds.
    pub const fn timestamp(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.0, 0) {
            Some(dt) if dt.num_seconds_from_midnight() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimeVisitor;

        impl Visitor<'_> for TimeVisitor {
            type Value = TimeValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a unix timestamp or a YYYY-MM-DD date string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TimeValue, E> {
                Ok(TimeValue(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TimeValue, E> {
                Ok(TimeValue(v as i64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TimeValue, E> {
                let date = NaiveDate::parse_from_str(v, "%Y-%m-%d")
                    .map_err(|_| E::custom(format!("invalid date: {v}")))?;
                let dt = date
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| E::custom(format!("invalid date: {v}")))?;
                Ok(TimeValue(dt.and_utc().timestamp()))
            }
        }

        deserializer.deserialize_any(TimeVisitor)
    }
}

/// Bar granularity the data layer delivers for a given display range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Min5,
    Min15,
    Hour1,
    #[default]
    Day,
    Week,
    Month,
}

impl Interval {
    /// Duration of one bar in seconds (calendar months approximated).
    pub fn seconds(&self) -> i64 {
        match self {
            Interval::Min5 => 60 * 5,
            Interval::Min15 => 60 * 15,
            Interval::Hour1 => 60 * 60,
            Interval::Day => 60 * 60 * 24,
            Interval::Week => 60 * 60 * 24 * 7,
            Interval::Month => 60 * 60 * 24 * 30,
        }
    }

    /// Short label for this interval.
    pub fn label(&self) -> &'static str {
        match self {
            Interval::Min5 => "5m",
            Interval::Min15 => "15m",
            Interval::Hour1 => "1h",
            Interval::Day => "1d",
            Interval::Week => "1wk",
            Interval::Month => "1mo",
        }
    }

    /// Whether bars at this granularity carry an intraday instant rather
    /// than a calendar date.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Interval::Min5 | Interval::Min15 | Interval::Hour1)
    }

    /// All intervals in ascending duration order.
    pub fn all() -> &'static [Interval] {
        &[
            Interval::Min5,
            Interval::Min15,
            Interval::Hour1,
            Interval::Day,
            Interval::Week,
            Interval::Month,
        ]
    }
}
