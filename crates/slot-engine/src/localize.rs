//! Timezone localization: wall-clock times to instants and back.
//!
//! Converts a (calendar date, timezone, time-of-day) triple into an absolute
//! instant using the zone's offset at that specific date — DST-correct, not
//! a fixed offset — and computes the weekday an instant falls on in a given
//! timezone. All functions are pure; the caller supplies every input.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimezone`] if the name is not a valid
/// IANA identifier.
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
}

/// The absolute instant of `time_of_day` on `date`'s calendar day in `tz`.
///
/// `day_override`, when given, substitutes the day-of-month before
/// resolving. This supports override entries anchored to a UTC-stored date
/// that must be reinterpreted in local terms.
///
/// Ambiguous wall-clock times (the repeated hour when clocks fall back)
/// resolve to the earliest occurrence. Nonexistent times (the skipped hour
/// when clocks spring forward) are an error rather than a guess.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDate`] when the day substitution produces
/// no real date, or [`ScheduleError::NonexistentLocalTime`] for wall-clock
/// times inside a DST gap.
pub fn to_instant(
    date: NaiveDate,
    tz: Tz,
    time_of_day: NaiveTime,
    day_override: Option<u32>,
) -> Result<DateTime<Utc>> {
    let date = match day_override {
        Some(day) => date.with_day(day).ok_or(ScheduleError::InvalidDate {
            year: date.year(),
            month: date.month(),
            day,
        })?,
        None => date,
    };

    let local = date.and_time(time_of_day);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(resolved) => Ok(resolved.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(ScheduleError::NonexistentLocalTime {
            local,
            timezone: tz,
        }),
    }
}

/// The weekday `instant` falls on in `tz`.
///
/// When localizing shifts the calendar date across midnight, the local
/// weekday is returned, not the UTC one: 23:30 UTC on a Monday is already
/// Tuesday in Asia/Seoul.
pub fn effective_weekday(instant: DateTime<Utc>, tz: Tz) -> Weekday {
    instant.with_timezone(&tz).weekday()
}

/// The time-of-day `instant` reads on a wall clock in `tz`.
pub fn local_time_of_day(instant: DateTime<Utc>, tz: Tz) -> NaiveTime {
    instant.with_timezone(&tz).time()
}

/// The `[00:00, 23:59]` window of `date`'s local calendar day in `tz`, as
/// instants. This is the window inside which a date override applies.
///
/// # Errors
///
/// Returns [`ScheduleError::NonexistentLocalTime`] in zones where either
/// boundary falls in a DST gap (midnight transitions exist, e.g. in
/// America/Santiago).
pub fn local_day_bounds(date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let close_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
    let open = to_instant(date, tz, NaiveTime::MIN, None)?;
    let close = to_instant(date, tz, close_of_day, None)?;
    Ok((open, close))
}
