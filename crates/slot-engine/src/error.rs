//! Error types for slot-engine operations.

use std::fmt;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a booking window was rejected by validation.
///
/// Callers typically map every variant to the same user-facing
/// "this slot is no longer available" message; the variant exists for
/// diagnostics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionReason {
    /// The effective window starts or ends before the supplied clock.
    Past,
    /// The effective end does not come after the effective start.
    Inverted,
    /// The window is not admitted by the override or weekly pattern.
    OutsideAvailability,
    /// An already-committed booking overlaps the effective window.
    Conflict,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectionReason::Past => "past",
            RejectionReason::Inverted => "inverted",
            RejectionReason::OutsideAvailability => "outside-availability",
            RejectionReason::Conflict => "conflict",
        };
        f.write_str(text)
    }
}

/// Failure reported by a conflict-source adapter.
///
/// Adapters own retries; the validator makes exactly one attempt per source
/// and converts any error into [`ScheduleError::ConflictSourceUnavailable`].
#[derive(Error, Debug)]
pub enum SourceError {
    /// The lookup did not complete within the caller-supplied deadline.
    #[error("lookup timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Transport or backend failure described by the adapter.
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Availabilities in different timezones are never combined.
    #[error("cannot intersect availabilities across timezones: {left} vs {right}")]
    TimezoneMismatch { left: Tz, right: Tz },

    /// The string is not a valid IANA timezone identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The string is not a valid `HH:MM` or `HH:MM:SS` time of day.
    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    /// Weekday indices run Sunday = 0 through Saturday = 6.
    #[error("Invalid weekday index: {0}")]
    InvalidWeekday(u8),

    /// Substituting a day-of-month produced a date that does not exist.
    #[error("no day {day} in {year}-{month:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The local wall-clock time falls in a DST gap and has no instant.
    #[error("local time {local} does not exist in {timezone}")]
    NonexistentLocalTime { local: NaiveDateTime, timezone: Tz },

    /// The booking window was rejected; see [`RejectionReason`].
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(RejectionReason),

    /// A conflict source failed or timed out. Validation fails closed —
    /// an unreachable source is never treated as "no conflict".
    #[error("conflict source {source_id} unavailable: {detail}")]
    ConflictSourceUnavailable { source_id: String, detail: String },
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, ScheduleError>;
