use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("interval must be a whole number from 1 to {max} (got {0})", max = u32::MAX)]
    InvalidInterval(i64),
    #[error("unknown repeat unit '{0}' (expected one of days, weeks, months, years, days_of_month)")]
    UnknownUnit(String),
    #[error("invalid date '{0}' (expected YYYY-MM-DD or an ISO-8601 date-time)")]
    InvalidDate(String),
}

/// The calendar unit a rule advances by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatUnit {
    /// Plain day steps: Jan 31 + 1 = Feb 1.
    Days,
    /// Seven-day steps: Jan 31 + 1 = Feb 7.
    Weeks,
    /// Calendar months, clamped to the month's last day: Jan 31 + 1 = Feb 28/29.
    Months,
    /// Calendar years, Feb 29 clamps to Feb 28 in common years.
    Years,
    /// Calendar months on the start's exact day of month. Months too short
    /// to hold that day are skipped: Jan 31 + 1 = Mar 31.
    DaysOfMonth,
}

impl RepeatUnit {
    pub const ALL: [RepeatUnit; 5] = [
        RepeatUnit::Days,
        RepeatUnit::Weeks,
        RepeatUnit::Months,
        RepeatUnit::Years,
        RepeatUnit::DaysOfMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatUnit::Days => "days",
            RepeatUnit::Weeks => "weeks",
            RepeatUnit::Months => "months",
            RepeatUnit::Years => "years",
            RepeatUnit::DaysOfMonth => "days_of_month",
        }
    }

    pub fn variants() -> &'static [(&'static str, &'static str)] {
        &[
            ("days", "every N days"),
            ("weeks", "every N weeks"),
            ("months", "every N months, clamped to the last day of short months"),
            ("years", "every N years, Feb 29 clamps to Feb 28"),
            ("days_of_month", "every N months on the same day, skipping short months"),
        ]
    }
}

impl fmt::Display for RepeatUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatUnit {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        RepeatUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == normalized)
            .ok_or_else(|| RecurrenceError::UnknownUnit(s.to_string()))
    }
}

/// A value that can be truncated to a calendar day.
///
/// The engine only reasons about whole days, so every reference date goes
/// through this before any comparison.
pub trait DayReference {
    fn calendar_day(&self) -> NaiveDate;
}

impl DayReference for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl DayReference for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> DayReference for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: DayReference + ?Sized> DayReference for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Parse a calendar day from `YYYY-MM-DD`, a naive ISO-8601 date-time, or an
/// RFC 3339 timestamp. Time-of-day components are dropped.
pub fn parse_day(raw: &str) -> Result<NaiveDate, RecurrenceError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(stamp.date());
        }
    }
    Err(RecurrenceError::InvalidDate(raw.to_string()))
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|raw| parse_day(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// Wire shape of a rule before validation.
#[derive(Deserialize)]
struct RecurrenceRuleRecord {
    #[serde(deserialize_with = "deserialize_day")]
    start: NaiveDate,
    unit: RepeatUnit,
    interval: i64,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    until: Option<NaiveDate>,
}

impl TryFrom<RecurrenceRuleRecord> for RecurrenceRule {
    type Error = RecurrenceError;

    fn try_from(record: RecurrenceRuleRecord) -> Result<Self, Self::Error> {
        let interval = u32::try_from(record.interval)
            .map_err(|_| RecurrenceError::InvalidInterval(record.interval))?;
        let rule = RecurrenceRule::new(record.start, record.unit, interval)?;
        Ok(match record.until {
            Some(until) => rule.until(until),
            None => rule,
        })
    }
}

/// How a task repeats: every `interval` `unit`s from `start`, stopping
/// before `until` when one is set.
///
/// Rules are plain values. Once built the start date never changes; the only
/// derived form is [`RecurrenceRule::until`], which returns a new rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecurrenceRuleRecord")]
pub struct RecurrenceRule {
    start: NaiveDate,
    unit: RepeatUnit,
    interval: u32,
    until: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(start: NaiveDate, unit: RepeatUnit, interval: u32) -> Result<Self, RecurrenceError> {
        if interval < 1 {
            debug!(%start, %unit, interval, "rejected recurrence rule with zero interval");
            return Err(RecurrenceError::InvalidInterval(i64::from(interval)));
        }
        Ok(Self {
            start,
            unit,
            interval,
            until: None,
        })
    }

    /// Same rule with an exclusive upper bound. An `until` on or before
    /// `start` is accepted and simply leaves the rule without occurrences.
    pub fn until(self, until: NaiveDate) -> Self {
        Self {
            until: Some(until),
            ..self
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn unit(&self) -> RepeatUnit {
        self.unit
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.until
    }

    /// True when `date` is before the exclusive upper bound (or there is none).
    pub fn admits(&self, date: NaiveDate) -> bool {
        self.until.is_none_or(|until| date < until)
    }

    /// False for rules whose `until` is not strictly after `start`.
    pub fn has_occurrences(&self) -> bool {
        self.admits(self.start)
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {} {} from {}", self.interval, self.unit, self.start)?;
        if let Some(until) = self.until {
            write!(f, " until {until}")?;
        }
        Ok(())
    }
}
