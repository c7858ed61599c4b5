//! Date-override resolution and permission.
//!
//! An override supersedes the weekly pattern for its date entirely, whether
//! it is more or less permissive. This module finds the override applicable
//! to a requested window and evaluates whether the window is permitted under
//! it; the validator enforces the precedence over the weekly pattern.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::localize::{local_day_bounds, to_instant};
use crate::model::{DateOverride, OverrideRule};

/// Find the override (if any) applicable to the requested window.
///
/// An override applies when the request's start or end instant falls within
/// `[00:00, 23:59]` of the override's date, localized in `tz`.
///
/// # Errors
///
/// Propagates localization failures for override dates whose day boundaries
/// fall in a DST gap.
pub fn find_applicable<'a>(
    tz: Tz,
    overrides: &'a [DateOverride],
    request_start: DateTime<Utc>,
    request_end: DateTime<Utc>,
) -> Result<Option<&'a DateOverride>> {
    for entry in overrides {
        let (open, close) = local_day_bounds(entry.date, tz)?;
        let in_day = |instant: DateTime<Utc>| open <= instant && instant <= close;
        if in_day(request_start) || in_day(request_end) {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

/// Whether the requested window is permitted under `entry`.
///
/// An explicitly unavailable date permits nothing. Otherwise the window is
/// permitted only when a single override range, localized in `tz`, fully
/// contains both request instants — partial overlap rejects. Callers that
/// want buffers honored pass buffer-extended bounds.
///
/// # Errors
///
/// Propagates localization failures for override ranges whose bounds fall in
/// a DST gap.
pub fn is_permitted(
    tz: Tz,
    entry: &DateOverride,
    request_start: DateTime<Utc>,
    request_end: DateTime<Utc>,
) -> Result<bool> {
    match &entry.rule {
        OverrideRule::Unavailable => Ok(false),
        OverrideRule::AvailableDuring(ranges) => {
            for range in ranges {
                let open = to_instant(entry.date, tz, range.start, None)?;
                let close = to_instant(entry.date, tz, range.end, None)?;
                if open <= request_start && request_end <= close {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}
