//! Tests for the merged busy index.

use chrono::{TimeZone, Utc};
use slot_engine::conflict::is_free_for_all;
use slot_engine::{BusyIndex, BusyInterval, ParticipantCalendar, TimeRange};

fn busy(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> BusyInterval {
    BusyInterval::new(
        Utc.with_ymd_and_hms(2026, 3, 2, start_hour, start_min, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 2, end_hour, end_min, 0).unwrap(),
    )
}

fn slot(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeRange {
    let b = busy(start_hour, start_min, end_hour, end_min);
    TimeRange::new(b.start, b.end).unwrap()
}

fn one(busy: Vec<BusyInterval>) -> Vec<ParticipantCalendar> {
    vec![ParticipantCalendar::new("alice", busy)]
}

#[test]
fn overlapping_intervals_merge() {
    let index = BusyIndex::new(&one(vec![busy(10, 0, 11, 30), busy(11, 0, 12, 0)]));

    let merged: Vec<BusyInterval> = index.merged().collect();
    assert_eq!(merged, vec![busy(10, 0, 12, 0)]);
}

#[test]
fn touching_intervals_merge() {
    let index = BusyIndex::new(&one(vec![busy(10, 0, 11, 0), busy(9, 0, 10, 0)]));

    let merged: Vec<BusyInterval> = index.merged().collect();
    assert_eq!(merged, vec![busy(9, 0, 11, 0)]);
}

#[test]
fn intervals_from_different_participants_merge() {
    let calendars = vec![
        ParticipantCalendar::new("alice", vec![busy(9, 0, 10, 0), busy(15, 0, 16, 0)]),
        ParticipantCalendar::new("bob", vec![busy(9, 30, 11, 0)]),
    ];
    let index = BusyIndex::new(&calendars);

    let merged: Vec<BusyInterval> = index.merged().collect();
    assert_eq!(merged, vec![busy(9, 0, 11, 0), busy(15, 0, 16, 0)]);
}

#[test]
fn boundaries_follow_touching_rule() {
    let index = BusyIndex::new(&one(vec![busy(10, 0, 12, 0)]));

    assert!(!index.is_free(&slot(12, 0, 13, 0)), "starts as busy ends");
    assert!(!index.is_free(&slot(9, 0, 10, 0)), "ends as busy starts");
    assert!(index.is_free(&slot(12, 15, 13, 15)));
    assert!(index.is_free(&slot(8, 0, 9, 45)));
}

#[test]
fn slot_between_two_blocks() {
    let index = BusyIndex::new(&one(vec![busy(9, 0, 10, 0), busy(12, 0, 13, 0)]));

    assert!(index.is_free(&slot(10, 15, 11, 45)));
    assert!(!index.is_free(&slot(10, 15, 12, 0)));
    assert!(!index.is_free(&slot(10, 0, 11, 0)));
}

#[test]
fn inverted_interval_agrees_with_pairwise_rule() {
    // end before start: rejects only slots spanning the whole inverted range.
    let calendars = one(vec![busy(11, 0, 10, 0)]);
    let index = BusyIndex::new(&calendars);

    for candidate in [slot(10, 0, 11, 0), slot(10, 15, 10, 45), slot(9, 0, 12, 0)] {
        assert_eq!(
            index.is_free(&candidate),
            is_free_for_all(&candidate, &calendars),
            "disagreement for {:?}",
            candidate
        );
    }
    assert!(index.merged().next().is_none());
}

#[test]
fn empty_index_is_always_free() {
    let index = BusyIndex::new(&[]);
    assert!(index.is_empty());
    assert!(index.is_free(&slot(0, 0, 23, 59)));
}
