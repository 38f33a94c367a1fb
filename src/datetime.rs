//! UTC timestamps as used by VOResource and UWS
//!
//! IVOA documents write instants as ISO-8601 strings in UTC. Several
//! lexical variants are accepted on input:
//!
//! - `2023-03-15T18:27:18.758` (UTC assumed, `T` separator)
//! - `2023-03-15 18:27:18.758` (UTC assumed, space separator)
//! - `2023-03-15T18:27:18.758Z` / `2023-03-15 18:27:18.758Z`
//! - `2023-03-15T18:27:18.758+00:00` / `2023-03-15 18:27:18.758+00:00`
//!
//! Output is always `YYYY-MM-DDTHH:MM:SS.mmmZ`, so years are limited to
//! `0000..=9999`.

use crate::error::{Error, Result};
use crate::model::XmlValue;
use chrono::{Datelike, DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

static UTC_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i)(\d{4})-(\d\d)-(\d\d)[T ](\d\d):(\d\d):(\d\d)(?:\.(\d+))?(Z|[+-]\d\d:\d\d)?$",
    )
    .unwrap()
});

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const YEARS: RangeInclusive<i32> = 0..=9999;

/// An instant in UTC with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcTimestamp(DateTime<Utc>);

/// Older name for [`UtcTimestamp`]
pub type VoDateTime = UtcTimestamp;

impl UtcTimestamp {
    /// Parse one of the accepted lexical forms
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::Value(format!("Invalid VOResource ISO-8601 date format: {:?}", value));
        let caps = UTC_TIMESTAMP.captures(value.trim()).ok_or_else(invalid)?;

        if let Some(offset) = caps.get(8).map(|m| m.as_str()) {
            if !matches!(offset, "Z" | "z" | "+00:00") {
                return Err(Error::Value(format!(
                    "only UTC timestamps are supported, found offset {} in {:?}",
                    offset, value
                )));
            }
        }

        let field = |i: usize| -> u32 {
            caps.get(i)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or_default()
        };
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let nanos = caps
            .get(7)
            .map(|m| {
                let digits: String = m.as_str().chars().chain("000000000".chars()).take(9).collect();
                digits.parse::<u32>().unwrap_or_default()
            })
            .unwrap_or_default();

        let date = NaiveDate::from_ymd_opt(year, field(2), field(3)).ok_or_else(invalid)?;
        let time = NaiveTime::from_hms_nano_opt(field(4), field(5), field(6), nanos)
            .ok_or_else(invalid)?;
        Self::from_naive(NaiveDateTime::new(date, time))
    }

    /// Convert any timezone-aware datetime to UTC
    ///
    /// Fails when the UTC year is outside `0000..=9999`.
    pub fn from_datetime<Tz: TimeZone>(value: DateTime<Tz>) -> Result<Self> {
        let value = value.with_timezone(&Utc);
        if !YEARS.contains(&value.year()) {
            return Err(Error::Value(format!(
                "year {} cannot be written as a four-digit timestamp",
                value.year()
            )));
        }
        Ok(Self::truncated(value))
    }

    /// Interpret a naive datetime as UTC
    pub fn from_naive(value: NaiveDateTime) -> Result<Self> {
        Self::from_datetime(Utc.from_utc_datetime(&value))
    }

    /// Build from calendar fields; `None` if any field is out of range
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, min, sec)?;
        Self::from_naive(NaiveDateTime::new(date, time)).ok()
    }

    /// The current instant
    pub fn now() -> Self {
        Self::truncated(Utc::now())
    }

    /// The wrapped chrono value
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Canonical `YYYY-MM-DDTHH:MM:SS.mmmZ` form
    pub fn to_vo_string(&self) -> String {
        self.0.format(OUTPUT_FORMAT).to_string()
    }

    fn truncated(value: DateTime<Utc>) -> Self {
        let millis = value.nanosecond() / 1_000_000 * 1_000_000;
        Self(value.with_nanosecond(millis).unwrap_or(value))
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_vo_string())
    }
}

impl FromStr for UtcTimestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<DateTime<Utc>> for UtcTimestamp {
    type Error = Error;

    fn try_from(value: DateTime<Utc>) -> Result<Self> {
        Self::from_datetime(value)
    }
}

impl From<UtcTimestamp> for DateTime<Utc> {
    fn from(value: UtcTimestamp) -> Self {
        value.0
    }
}

impl XmlValue for UtcTimestamp {
    fn from_xml_text(text: &str) -> Result<Self> {
        Self::parse(text)
    }

    fn to_xml_text(&self) -> String {
        self.to_vo_string()
    }
}

impl serde::Serialize for UtcTimestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_vo_string())
    }
}
