//! Data model for availability snapshots and booking windows.
//!
//! All types are read-only value objects: an [`Availability`] snapshot is
//! loaded fresh per validation call, a [`BookingWindow`] is immutable once
//! validation begins, and [`CommittedBooking`] records are only ever queried.
//! Serde representations follow the upstream scheduling service's JSON shape
//! (camelCase keys, weekday as a Sunday-based index, an empty `timeRanges`
//! array as the explicit-unavailability sentinel).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// A time-of-day range within a single day. Comparison is numeric on the
/// decomposed time, never lexicographic on the source string.
///
/// Within any one collection, ranges are non-overlapping and sorted
/// ascending by start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(rename = "startTime")]
    pub start: NaiveTime,
    #[serde(rename = "endTime")]
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> TimeRange {
        TimeRange { start, end }
    }

    /// Parse a range from `HH:MM` or `HH:MM:SS` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTimeOfDay`] if either bound fails to
    /// parse in both formats.
    pub fn parse(start: &str, end: &str) -> Result<TimeRange> {
        Ok(TimeRange {
            start: parse_time_of_day(start)?,
            end: parse_time_of_day(end)?,
        })
    }
}

/// Parse a `HH:MM[:SS]` time-of-day string.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|_| ScheduleError::InvalidTimeOfDay(text.to_string()))
}

/// Weekday index in the upstream convention: Sunday = 0 .. Saturday = 6.
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Inverse of [`weekday_index`].
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidWeekday`] for indices above 6.
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    let day = match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        _ => return Err(ScheduleError::InvalidWeekday(index)),
    };
    Ok(day)
}

mod sunday_indexed {
    //! Serde helpers keeping `Weekday` on the wire as a Sunday-based index.

    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::weekday_index(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        super::weekday_from_index(index).map_err(serde::de::Error::custom)
    }
}

/// The bookable windows recurring on one weekday.
///
/// An entry with empty `time_ranges` is functionally identical to the entry
/// being absent: the weekday is unavailable either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTime {
    #[serde(with = "sunday_indexed")]
    pub day: Weekday,
    #[serde(rename = "timeRanges")]
    pub time_ranges: Vec<TimeRange>,
}

/// Date-specific availability, replacing (never extending) the weekly
/// pattern for that date.
///
/// The upstream wire shape encodes "explicitly unavailable" as an empty
/// range array; here that sentinel is a proper variant so no code path can
/// confuse "no ranges yet" with "closed all day".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TimeRange>", into = "Vec<TimeRange>")]
pub enum OverrideRule {
    /// The host is unavailable for the whole date, whatever the weekly
    /// pattern says.
    Unavailable,
    /// The host is available only during these windows on this date.
    AvailableDuring(Vec<TimeRange>),
}

impl From<Vec<TimeRange>> for OverrideRule {
    fn from(ranges: Vec<TimeRange>) -> OverrideRule {
        if ranges.is_empty() {
            OverrideRule::Unavailable
        } else {
            OverrideRule::AvailableDuring(ranges)
        }
    }
}

impl From<OverrideRule> for Vec<TimeRange> {
    fn from(rule: OverrideRule) -> Vec<TimeRange> {
        match rule {
            OverrideRule::Unavailable => Vec::new(),
            OverrideRule::AvailableDuring(ranges) => ranges,
        }
    }
}

/// An override pinned to one calendar date (date-only semantics, interpreted
/// in the owning [`Availability`]'s timezone).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    #[serde(rename = "targetDate")]
    pub date: NaiveDate,
    #[serde(rename = "timeRanges")]
    pub rule: OverrideRule,
}

/// A host's resolved availability snapshot: weekly recurring pattern plus
/// date-specific overrides, all interpreted in `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub timezone: Tz,
    #[serde(rename = "availableTimes")]
    pub weekly: Vec<AvailableTime>,
    #[serde(default)]
    pub overrides: Vec<DateOverride>,
}

impl Availability {
    /// The weekly ranges for `day`, or `None` when the weekday has no entry
    /// or an empty one (both mean unavailable).
    pub fn weekly_ranges_for(&self, day: Weekday) -> Option<&[TimeRange]> {
        self.weekly
            .iter()
            .find(|entry| entry.day == day)
            .map(|entry| entry.time_ranges.as_slice())
            .filter(|ranges| !ranges.is_empty())
    }
}

/// A requested booking window in absolute instants.
///
/// Buffer bounds, when present, extend outward from the core meeting window
/// and become the effective bounds for past/ordering/conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    #[serde(rename = "startTimestamp")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTimestamp")]
    pub end: DateTime<Utc>,
    #[serde(rename = "bufferStartTimestamp", default, skip_serializing_if = "Option::is_none")]
    pub buffer_start: Option<DateTime<Utc>>,
    #[serde(rename = "bufferEndTimestamp", default, skip_serializing_if = "Option::is_none")]
    pub buffer_end: Option<DateTime<Utc>>,
}

impl BookingWindow {
    /// A window with no buffer; effective bounds equal the core bounds.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingWindow {
        BookingWindow {
            start,
            end,
            buffer_start: None,
            buffer_end: None,
        }
    }

    /// Buffer start when present, else the core start.
    pub fn effective_start(&self) -> DateTime<Utc> {
        self.buffer_start.unwrap_or(self.start)
    }

    /// Buffer end when present, else the core end.
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.buffer_end.unwrap_or(self.end)
    }
}

/// A previously committed booking supplied by a conflict source. Never
/// mutated by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedBooking {
    #[serde(rename = "startTimestamp")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTimestamp")]
    pub end: DateTime<Utc>,
    #[serde(rename = "bufferStartTimestamp", default, skip_serializing_if = "Option::is_none")]
    pub buffer_start: Option<DateTime<Utc>>,
    #[serde(rename = "bufferEndTimestamp", default, skip_serializing_if = "Option::is_none")]
    pub buffer_end: Option<DateTime<Utc>>,
}

impl CommittedBooking {
    /// Buffer start when present, else the core start.
    pub fn effective_start(&self) -> DateTime<Utc> {
        self.buffer_start.unwrap_or(self.start)
    }

    /// Buffer end when present, else the core end.
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.buffer_end.unwrap_or(self.end)
    }
}
