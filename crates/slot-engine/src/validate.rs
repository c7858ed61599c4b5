//! Booking conflict validation.
//!
//! A pure decision function over a requested window, a host's availability
//! snapshot, and the committed bookings held by any number of calendar
//! sources. Checks run in strict order — past, ordering, availability,
//! conflicts — short-circuiting on the first failure. Nothing is mutated;
//! persisting an admitted booking is the caller's concern, as is closing
//! the check-then-commit race with an external serialization mechanism.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use log::{debug, trace};

use crate::error::{RejectionReason, Result, ScheduleError, SourceError};
use crate::localize::{effective_weekday, local_time_of_day};
use crate::model::{Availability, BookingWindow, CommittedBooking};
use crate::overrides;
use crate::range::covers_instant;

/// A store of committed bookings for one host and calendar source — the
/// native database or a linked vendor calendar.
///
/// The validator makes exactly one `find_overlapping` attempt per source per
/// validation, bounded by the caller-supplied timeout. Retrying a slow
/// backend is the adapter's job, behind this trait.
pub trait ConflictSource {
    /// Opaque identifier for diagnostics (e.g. `"native"`, `"google:work"`).
    fn source_id(&self) -> &str;

    /// All committed bookings that may overlap `[start, end]`.
    ///
    /// Returning a superset is fine — the validator re-checks each candidate
    /// against the precise overlap relations. An `Err` fails the validation
    /// closed; it is never treated as "no conflict".
    fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timeout: StdDuration,
    ) -> std::result::Result<Vec<CommittedBooking>, SourceError>;
}

/// Whether an existing booking conflicts with the window `[start, end]`.
///
/// Any of these relations is a conflict: the booking fully contains the
/// window, the window fully contains the booking, or any of the booking's
/// four bounds (buffer start/end, core start/end) falls within the window.
/// Bounds are inclusive; the caller has already nudged the window one second
/// inward, so back-to-back bookings touch without matching.
fn conflicts_with(existing: &CommittedBooking, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    let within = |instant: DateTime<Utc>| start <= instant && instant <= end;

    (existing.start <= start && end <= existing.end)
        || (start <= existing.start && existing.end <= end)
        || existing.buffer_start.is_some_and(within)
        || existing.buffer_end.is_some_and(within)
        || within(existing.start)
        || within(existing.end)
}

/// Validate a requested booking window against availability and committed
/// bookings.
///
/// Checks run in strict order, short-circuiting on first failure:
///
/// 1. **Past** — effective bounds (buffer bounds when present, else core
///    bounds) must not precede `now`.
/// 2. **Ordering** — the effective end must come after the effective start.
///    Both the core and effective bounds are then nudged one second inward,
///    making every later comparison exclusive at the exact boundary instant
///    so back-to-back bookings do not collide.
/// 3. **Availability** — if an override applies to the requested date it
///    decides alone and the weekly pattern is ignored entirely. Otherwise
///    the start and end instants' local times-of-day must each fall inside
///    some range of their own weekday's pattern, and both weekdays need an
///    entry. Buffers take no part in admission.
/// 4. **Conflicts** — every source is queried once over the effective
///    window; any overlapping committed booking rejects. The scan stops at
///    the first conflict. A failing or timed-out source fails the
///    validation closed.
///
/// On success the window is returned unchanged.
///
/// `now` is injected so callers (and tests) control the clock; this crate
/// never reads one ambiently.
///
/// # Errors
///
/// [`ScheduleError::InvalidTimeRange`] carrying the [`RejectionReason`] for
/// states 1–4, or [`ScheduleError::ConflictSourceUnavailable`] when a
/// source lookup fails.
pub fn validate_booking(
    window: &BookingWindow,
    timezone: Tz,
    availability: &Availability,
    sources: &[&dyn ConflictSource],
    now: DateTime<Utc>,
    source_timeout: StdDuration,
) -> Result<BookingWindow> {
    let effective_start = window.effective_start();
    let effective_end = window.effective_end();

    if effective_start < now || effective_end < now {
        debug!("rejecting window starting {effective_start}: in the past");
        return Err(ScheduleError::InvalidTimeRange(RejectionReason::Past));
    }

    if effective_end <= effective_start {
        debug!("rejecting window starting {effective_start}: inverted bounds");
        return Err(ScheduleError::InvalidTimeRange(RejectionReason::Inverted));
    }

    // One-second inward nudge so boundary-touching comparisons below are
    // effectively exclusive.
    let second = Duration::seconds(1);
    let admit_start = window.start + second;
    let admit_end = window.end - second;
    let conflict_start = effective_start + second;
    let conflict_end = effective_end - second;

    match overrides::find_applicable(timezone, &availability.overrides, admit_start, admit_end)? {
        Some(entry) => {
            if !overrides::is_permitted(timezone, entry, admit_start, admit_end)? {
                debug!(
                    "rejecting window starting {effective_start}: outside override for {}",
                    entry.date
                );
                return Err(ScheduleError::InvalidTimeRange(
                    RejectionReason::OutsideAvailability,
                ));
            }
        }
        None => {
            let start_day = effective_weekday(admit_start, timezone);
            let end_day = effective_weekday(admit_end, timezone);

            let (Some(start_ranges), Some(end_ranges)) = (
                availability.weekly_ranges_for(start_day),
                availability.weekly_ranges_for(end_day),
            ) else {
                debug!("rejecting window starting {effective_start}: weekday has no pattern");
                return Err(ScheduleError::InvalidTimeRange(
                    RejectionReason::OutsideAvailability,
                ));
            };

            // Two independent point checks, not joint containment: the
            // window's middle is allowed to cross a gap in the pattern.
            let start_admitted =
                covers_instant(local_time_of_day(admit_start, timezone), start_ranges);
            let end_admitted = covers_instant(local_time_of_day(admit_end, timezone), end_ranges);
            if !(start_admitted && end_admitted) {
                debug!("rejecting window starting {effective_start}: outside weekly pattern");
                return Err(ScheduleError::InvalidTimeRange(
                    RejectionReason::OutsideAvailability,
                ));
            }
        }
    }

    for source in sources {
        trace!("querying conflict source {}", source.source_id());
        let candidates = source
            .find_overlapping(conflict_start, conflict_end, source_timeout)
            .map_err(|err| ScheduleError::ConflictSourceUnavailable {
                source_id: source.source_id().to_string(),
                detail: err.to_string(),
            })?;

        if let Some(existing) = candidates
            .iter()
            .find(|booking| conflicts_with(booking, conflict_start, conflict_end))
        {
            debug!(
                "rejecting window starting {effective_start}: conflicts with booking {}..{} from {}",
                existing.start,
                existing.end,
                source.source_id()
            );
            return Err(ScheduleError::InvalidTimeRange(RejectionReason::Conflict));
        }
    }

    Ok(*window)
}
