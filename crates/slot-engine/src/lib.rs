//! # slot-engine
//!
//! Deterministic availability intersection and booking conflict validation
//! for scheduling backends.
//!
//! The engine answers two questions the surrounding service cannot afford
//! to get wrong: *when are all required hosts available at once*, and *may
//! this requested window be booked* given a host's weekly pattern, their
//! date overrides, an optional outward buffer, and every booking already
//! committed across the host's linked calendar sources. All interval math
//! runs under DST-correct timezone conversion via `chrono-tz`; overrides
//! always supersede the weekly pattern for their date.
//!
//! Everything here is a pure function of its inputs — the clock is an
//! explicit argument and the only I/O boundary is the [`ConflictSource`]
//! trait — so any number of validations may run concurrently.
//!
//! ## Modules
//!
//! - [`model`] — availability snapshots, booking windows, committed bookings
//! - [`range`] — interval-set operations on time-of-day ranges
//! - [`localize`] — wall-clock ↔ instant conversion, effective weekdays
//! - [`intersect`] — pairwise multi-host availability intersection
//! - [`overrides`] — date-override resolution and permission
//! - [`validate`] — the booking validation state machine
//! - [`error`] — error types

pub mod error;
pub mod intersect;
pub mod localize;
pub mod model;
pub mod overrides;
pub mod range;
pub mod validate;

pub use error::{RejectionReason, ScheduleError, SourceError};
pub use intersect::intersect_availability;
pub use model::{
    Availability, AvailableTime, BookingWindow, CommittedBooking, DateOverride, OverrideRule,
    TimeRange,
};
pub use validate::{validate_booking, ConflictSource};
