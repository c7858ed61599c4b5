//! Tests for wall-clock to instant conversion and weekday localization.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use slot_engine::error::ScheduleError;
use slot_engine::localize::{
    effective_weekday, local_day_bounds, local_time_of_day, parse_tz, to_instant,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(text: &str) -> NaiveTime {
    text.parse().unwrap()
}

fn tz(name: &str) -> Tz {
    parse_tz(name).unwrap()
}

#[test]
fn parse_valid_timezone() {
    assert_eq!(tz("Europe/Berlin").to_string(), "Europe/Berlin");
}

#[test]
fn parse_invalid_timezone() {
    let result = parse_tz("Mars/Olympus_Mons");
    match result {
        Err(ScheduleError::InvalidTimezone(name)) => assert_eq!(name, "Mars/Olympus_Mons"),
        other => panic!("expected InvalidTimezone, got {other:?}"),
    }
}

#[test]
fn offset_tracks_dst_across_the_year() {
    let berlin = tz("Europe/Berlin");

    // Winter: CET, UTC+1.
    let winter = to_instant(date(2026, 3, 28), berlin, time("12:00:00"), None).unwrap();
    assert_eq!(winter, Utc.with_ymd_and_hms(2026, 3, 28, 11, 0, 0).unwrap());

    // Summer: CEST, UTC+2. A fixed-offset conversion would get this wrong.
    let summer = to_instant(date(2026, 7, 1), berlin, time("12:00:00"), None).unwrap();
    assert_eq!(summer, Utc.with_ymd_and_hms(2026, 7, 1, 10, 0, 0).unwrap());
}

#[test]
fn spring_forward_gap_is_an_error() {
    // Berlin skips 02:00-03:00 on 2026-03-29.
    let result = to_instant(date(2026, 3, 29), tz("Europe/Berlin"), time("02:30:00"), None);
    assert!(
        matches!(result, Err(ScheduleError::NonexistentLocalTime { .. })),
        "gap time must not resolve to a guessed instant"
    );
}

#[test]
fn fall_back_ambiguity_resolves_to_earliest() {
    // Berlin repeats 02:00-03:00 on 2026-10-25; the first pass is CEST (+2).
    let instant = to_instant(date(2026, 10, 25), tz("Europe/Berlin"), time("02:30:00"), None)
        .unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 10, 25, 0, 30, 0).unwrap());
}

#[test]
fn day_override_substitutes_day_of_month() {
    let instant = to_instant(date(2024, 3, 15), tz("UTC"), time("10:00:00"), Some(1)).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
}

#[test]
fn day_override_to_nonexistent_date_is_an_error() {
    let result = to_instant(date(2024, 2, 10), tz("UTC"), time("10:00:00"), Some(30));
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidDate {
            year: 2024,
            month: 2,
            day: 30
        })
    ));
}

#[test]
fn weekday_shifts_forward_across_the_date_line_side() {
    // 23:30 UTC on Monday 2024-03-18 is already 08:30 Tuesday in Seoul.
    let instant = Utc.with_ymd_and_hms(2024, 3, 18, 23, 30, 0).unwrap();
    assert_eq!(effective_weekday(instant, tz("Asia/Seoul")), Weekday::Tue);
    assert_eq!(local_time_of_day(instant, tz("Asia/Seoul")), time("08:30:00"));
}

#[test]
fn weekday_shifts_backward_west_of_utc() {
    // 02:00 UTC on Monday 2024-03-18 is still 19:00 Sunday in Los Angeles.
    let instant = Utc.with_ymd_and_hms(2024, 3, 18, 2, 0, 0).unwrap();
    assert_eq!(
        effective_weekday(instant, tz("America/Los_Angeles")),
        Weekday::Sun
    );
}

#[test]
fn weekday_unchanged_when_no_date_shift() {
    let instant = Utc.with_ymd_and_hms(2024, 3, 18, 12, 0, 0).unwrap();
    assert_eq!(effective_weekday(instant, tz("Europe/Berlin")), Weekday::Mon);
}

#[test]
fn day_bounds_span_a_dst_transition_day() {
    // 2026-03-29 in Berlin is only 23 hours long: opens at 23:00 UTC the
    // previous day (CET) and closes 23:59 CEST = 21:59 UTC.
    let (open, close) = local_day_bounds(date(2026, 3, 29), tz("Europe/Berlin")).unwrap();
    assert_eq!(open, Utc.with_ymd_and_hms(2026, 3, 28, 23, 0, 0).unwrap());
    assert_eq!(close, Utc.with_ymd_and_hms(2026, 3, 29, 21, 59, 0).unwrap());
}
