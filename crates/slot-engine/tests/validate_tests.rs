//! Tests for request validation: each check, and the order they run in.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::{
    validate, EngineConfig, FixedClock, RequestedWindow, ScheduleRequest, ValidationError,
};

fn at(month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, min, 0).unwrap()
}

/// "Now" for every test: 2026-03-01T00:00:00Z.
fn clock() -> FixedClock {
    FixedClock(at(3, 1, 0, 0))
}

fn request(ids: &[&str], duration: i64) -> ScheduleRequest {
    ScheduleRequest {
        participant_ids: ids.iter().map(|s| s.to_string()).collect(),
        duration_minutes: duration,
        time_range: RequestedWindow::new(at(3, 2, 9, 0), at(3, 2, 17, 0)),
        title: None,
    }
}

fn check(req: &ScheduleRequest) -> Result<(), ValidationError> {
    validate(req, &clock(), &EngineConfig::default()).map(|_| ())
}

// ── Success ─────────────────────────────────────────────────────────────────

#[test]
fn valid_request_produces_query() {
    let query = validate(&request(&["alice", "bob"], 60), &clock(), &EngineConfig::default())
        .expect("request should be valid");

    assert_eq!(query.range.start, at(3, 2, 9, 0));
    assert_eq!(query.range.end, at(3, 2, 17, 0));
    assert_eq!(query.duration_minutes, 60);
}

#[test]
fn duration_filling_the_whole_window_is_valid() {
    // 09:00-17:00 is exactly 480 minutes.
    assert_eq!(check(&request(&["alice"], 480)), Ok(()));
}

#[test]
fn start_equal_to_now_is_not_in_the_past() {
    let mut req = request(&["alice"], 30);
    req.time_range = RequestedWindow::new(at(3, 1, 0, 0), at(3, 1, 1, 0));
    assert_eq!(check(&req), Ok(()));
}

// ── Participants ────────────────────────────────────────────────────────────

#[test]
fn empty_participants_rejected() {
    assert_eq!(check(&request(&[], 60)), Err(ValidationError::EmptyParticipants));
}

#[test]
fn empty_participant_id_rejected() {
    assert_eq!(
        check(&request(&["alice", ""], 60)),
        Err(ValidationError::EmptyParticipantId)
    );
}

#[test]
fn duplicate_participant_rejected() {
    assert_eq!(
        check(&request(&["alice", "bob", "alice"], 60)),
        Err(ValidationError::DuplicateParticipant("alice".to_string()))
    );
}

// ── Duration ────────────────────────────────────────────────────────────────

#[test]
fn out_of_range_durations_rejected() {
    for duration in [0, -15, 481, 500] {
        assert_eq!(
            check(&request(&["alice"], duration)),
            Err(ValidationError::InvalidDuration {
                got: duration,
                max: 480
            }),
            "duration {} should be rejected",
            duration
        );
    }
}

#[test]
fn max_duration_is_configurable() {
    let config = EngineConfig {
        max_duration_minutes: 600,
        ..EngineConfig::default()
    };
    let mut req = request(&["alice"], 500);
    req.time_range = RequestedWindow::new(at(3, 2, 8, 0), at(3, 2, 18, 0));

    assert!(validate(&req, &clock(), &config).is_ok());
}

// ── Window ──────────────────────────────────────────────────────────────────

#[test]
fn missing_start_rejected() {
    let mut req = request(&["alice"], 60);
    req.time_range.start = None;
    assert_eq!(check(&req), Err(ValidationError::MissingStartTime));
}

#[test]
fn missing_end_rejected() {
    let mut req = request(&["alice"], 60);
    req.time_range.end = None;
    assert_eq!(check(&req), Err(ValidationError::MissingEndTime));
}

#[test]
fn missing_both_reports_start_first() {
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::default();
    assert_eq!(check(&req), Err(ValidationError::MissingStartTime));
}

#[test]
fn start_after_end_rejected() {
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::new(at(3, 2, 17, 0), at(3, 2, 9, 0));
    assert_eq!(check(&req), Err(ValidationError::StartAfterEnd));
}

#[test]
fn empty_window_rejected_as_start_after_end() {
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::new(at(3, 2, 9, 0), at(3, 2, 9, 0));
    assert_eq!(check(&req), Err(ValidationError::StartAfterEnd));
}

#[test]
fn start_in_past_rejected() {
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::new(at(2, 28, 9, 0), at(3, 2, 17, 0));
    assert_eq!(check(&req), Err(ValidationError::StartInPast));
}

#[test]
fn end_more_than_a_year_out_rejected() {
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::new(
        Utc.with_ymd_and_hms(2027, 2, 28, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 1).unwrap(),
    );
    assert_eq!(
        check(&req),
        Err(ValidationError::EndBeyondOneYear { months: 12 })
    );
}

#[test]
fn end_exactly_one_year_out_accepted() {
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::new(
        Utc.with_ymd_and_hms(2027, 2, 28, 23, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap(),
    );
    assert_eq!(check(&req), Ok(()));
}

#[test]
fn duration_longer_than_window_rejected() {
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::new(at(3, 2, 9, 0), at(3, 2, 9, 30));
    assert_eq!(check(&req), Err(ValidationError::DurationExceedsRange));
}

// ── Ordering ────────────────────────────────────────────────────────────────

#[test]
fn first_failing_check_wins() {
    // Empty participants beats a bad duration and a missing window.
    let mut req = request(&[], 500);
    req.time_range = RequestedWindow::default();
    assert_eq!(check(&req), Err(ValidationError::EmptyParticipants));

    // Bad duration beats a window in the past.
    let mut req = request(&["alice"], 500);
    req.time_range = RequestedWindow::new(at(1, 1, 9, 0), at(1, 1, 10, 0));
    assert!(matches!(
        check(&req),
        Err(ValidationError::InvalidDuration { got: 500, .. })
    ));

    // Start after end beats start in the past.
    let mut req = request(&["alice"], 60);
    req.time_range = RequestedWindow::new(at(1, 2, 9, 0), at(1, 1, 9, 0));
    assert_eq!(check(&req), Err(ValidationError::StartAfterEnd));
}

#[test]
fn requests_deserialize_from_camel_case_json() {
    let json = r#"{
        "participantIds": ["alice", "bob"],
        "durationMinutes": 45,
        "timeRange": {"start": "2026-03-02T09:00:00Z"}
    }"#;
    let req: ScheduleRequest = serde_json::from_str(json).unwrap();

    assert_eq!(req.participant_ids, vec!["alice", "bob"]);
    assert_eq!(req.duration_minutes, 45);
    assert_eq!(req.title, None);
    assert_eq!(check(&req), Err(ValidationError::MissingEndTime));
}
