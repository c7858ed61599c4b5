//! Tests for time-of-day interval intersection and point membership.

use chrono::NaiveTime;
use slot_engine::model::TimeRange;
use slot_engine::range::{covers_instant, intersect_ranges};

fn range(start: &str, end: &str) -> TimeRange {
    TimeRange::parse(start, end).unwrap()
}

fn time(text: &str) -> NaiveTime {
    text.parse().unwrap()
}

#[test]
fn sweep_drops_zero_length_overlap() {
    // One wide range against three narrow ones; the third only touches the
    // wide range's end, so its overlap is zero-length and must vanish.
    let a = vec![range("10:00", "19:30")];
    let b = vec![
        range("10:30", "12:30"),
        range("13:30", "18:00"),
        range("19:30", "20:00"),
    ];

    let common = intersect_ranges(&a, &b);

    assert_eq!(
        common,
        vec![range("10:30", "12:30"), range("13:30", "18:00")],
        "touching boundary must not produce output"
    );
}

#[test]
fn intersection_is_commutative() {
    let a = vec![range("09:00", "12:00"), range("14:00", "18:00")];
    let b = vec![range("10:00", "15:00")];

    assert_eq!(intersect_ranges(&a, &b), intersect_ranges(&b, &a));
    assert_eq!(
        intersect_ranges(&a, &b),
        vec![range("10:00", "12:00"), range("14:00", "15:00")]
    );
}

#[test]
fn disjoint_ranges_produce_nothing() {
    let a = vec![range("09:00", "10:00")];
    let b = vec![range("11:00", "12:00")];

    assert!(intersect_ranges(&a, &b).is_empty());
}

#[test]
fn adjacent_ranges_produce_nothing() {
    // 10:00 is both an end and a start; strict comparison drops it.
    let a = vec![range("09:00", "10:00")];
    let b = vec![range("10:00", "11:00")];

    assert!(intersect_ranges(&a, &b).is_empty());
}

#[test]
fn empty_input_produces_nothing() {
    let a = vec![range("09:00", "10:00")];

    assert!(intersect_ranges(&a, &[]).is_empty());
    assert!(intersect_ranges(&[], &a).is_empty());
}

#[test]
fn identical_collections_intersect_to_themselves() {
    let a = vec![range("08:00", "09:30"), range("10:00", "12:00")];

    assert_eq!(intersect_ranges(&a, &a), a);
}

#[test]
fn double_digit_hours_compare_numerically() {
    // A lexicographic comparison would order "9:00" after "10:00"; the
    // decomposed comparison must not.
    let a = vec![range("09:00", "21:00")];
    let b = vec![range("10:00", "20:00")];

    assert_eq!(intersect_ranges(&a, &b), vec![range("10:00", "20:00")]);
}

#[test]
fn seconds_precision_is_honored() {
    let a = vec![range("10:00:30", "11:00:00")];
    let b = vec![range("10:00:00", "10:00:45")];

    assert_eq!(
        intersect_ranges(&a, &b),
        vec![range("10:00:30", "10:00:45")]
    );
}

#[test]
fn covers_instant_is_inclusive_at_both_bounds() {
    let ranges = vec![range("09:00", "10:00"), range("13:00", "14:00")];

    assert!(covers_instant(time("09:00:00"), &ranges));
    assert!(covers_instant(time("10:00:00"), &ranges));
    assert!(covers_instant(time("13:30:00"), &ranges));
    assert!(!covers_instant(time("12:00:00"), &ranges));
    assert!(!covers_instant(time("14:00:01"), &ranges));
}

#[test]
fn covers_instant_on_empty_ranges_is_false() {
    assert!(!covers_instant(time("09:00:00"), &[]));
}

#[test]
fn unparseable_time_of_day_is_rejected() {
    assert!(TimeRange::parse("25:00", "26:00").is_err());
    assert!(TimeRange::parse("nine", "10:00").is_err());
    // Both accepted formats parse.
    assert!(TimeRange::parse("09:00", "10:00:30").is_ok());
}
