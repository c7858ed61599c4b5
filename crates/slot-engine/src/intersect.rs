//! Pairwise availability intersection for multi-host bookings.
//!
//! Combines two availability snapshots into the availability common to both:
//! weekly patterns intersect per weekday, date overrides intersect only
//! where both sides explicitly define bookable windows for the same date.
//! Override-dominates-weekly precedence is the validator's concern, not
//! this combinator's.

use chrono::Weekday;

use crate::error::{Result, ScheduleError};
use crate::model::{AvailableTime, Availability, DateOverride, OverrideRule};
use crate::range::intersect_ranges;

/// Weekdays in the upstream index order (Sunday = 0).
const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Intersect two availability snapshots sharing a timezone.
///
/// Weekly patterns: a weekday survives only when present with non-empty
/// ranges on both sides and the range intersection is non-empty; weekdays
/// missing from either side are dropped (no entry means unavailable).
///
/// Overrides: only `(date, date)` pairs where both sides define bookable
/// windows intersect, and only non-empty intersections are emitted. Dates
/// present on one side only, and dates either side marks explicitly
/// unavailable, do not appear in the output.
///
/// The operation is commutative.
///
/// # Errors
///
/// Returns [`ScheduleError::TimezoneMismatch`] when the snapshots disagree
/// on timezone. Cross-timezone combination is never coerced.
pub fn intersect_availability(a: &Availability, b: &Availability) -> Result<Availability> {
    if a.timezone != b.timezone {
        return Err(ScheduleError::TimezoneMismatch {
            left: a.timezone,
            right: b.timezone,
        });
    }

    let mut weekly = Vec::new();
    for day in WEEK {
        let (Some(ranges_a), Some(ranges_b)) = (a.weekly_ranges_for(day), b.weekly_ranges_for(day))
        else {
            continue;
        };
        let common = intersect_ranges(ranges_a, ranges_b);
        if !common.is_empty() {
            weekly.push(AvailableTime {
                day,
                time_ranges: common,
            });
        }
    }

    let mut overrides = Vec::new();
    for entry_a in &a.overrides {
        let OverrideRule::AvailableDuring(ranges_a) = &entry_a.rule else {
            continue;
        };
        for entry_b in &b.overrides {
            if entry_b.date != entry_a.date {
                continue;
            }
            let OverrideRule::AvailableDuring(ranges_b) = &entry_b.rule else {
                continue;
            };
            let common = intersect_ranges(ranges_a, ranges_b);
            if !common.is_empty() {
                overrides.push(DateOverride {
                    date: entry_a.date,
                    rule: OverrideRule::AvailableDuring(common),
                });
            }
        }
    }
    overrides.sort_by_key(|entry| entry.date);

    Ok(Availability {
        timezone: a.timezone,
        weekly,
        overrides,
    })
}
