//! Composite slot scoring.
//!
//! ```text
//! score = w_wh · working_hours + w_early · early_slot
//!       + w_gap · gap_minimization + w_buf · buffer_time
//! ```
//!
//! The two hour-based sub-scores look only at the candidate's start hour in
//! the policy time zone (minutes are ignored). The two gap-based sub-scores
//! fold over each participant's busy intervals separately and average the
//! per-participant results. Penalties within one participant multiply, so
//! several nearby events compound toward zero.

use chrono::{Duration, Timelike};

use crate::config::ScoringPolicy;
use crate::model::{BusyInterval, ParticipantCalendar, TimeRange};

/// Composite desirability of `candidate`. Higher is better.
pub fn score(candidate: &TimeRange, calendars: &[ParticipantCalendar], policy: &ScoringPolicy) -> f64 {
    let w = &policy.weights;
    w.working_hours * working_hours_score(candidate, policy)
        + w.early_slot * early_slot_score(candidate, policy)
        + w.gap_minimization * gap_minimization_score(candidate, calendars, policy)
        + w.buffer_time * buffer_time_score(candidate, calendars, policy)
}

fn start_hour(candidate: &TimeRange, policy: &ScoringPolicy) -> i64 {
    i64::from(candidate.start.with_timezone(&policy.timezone).hour())
}

/// 1.0 inside the working day, 0.5 in the hour either side of it, else 0.0.
pub fn working_hours_score(candidate: &TimeRange, policy: &ScoringPolicy) -> f64 {
    let hour = start_hour(candidate, policy);
    let day_start = i64::from(policy.work_day_start_hour);
    let day_end = i64::from(policy.work_day_end_hour);

    if (day_start..day_end).contains(&hour) {
        1.0
    } else if hour == day_start - 1 || hour == day_end {
        0.5
    } else {
        0.0
    }
}

/// Linear decay from 1.0 at the start of the working day to 0.0 at its end hour.
pub fn early_slot_score(candidate: &TimeRange, policy: &ScoringPolicy) -> f64 {
    let hour = start_hour(candidate, policy);
    let day_start = i64::from(policy.work_day_start_hour);
    let day_end = i64::from(policy.work_day_end_hour);

    if (day_start..=day_end).contains(&hour) {
        1.0 - (hour - day_start) as f64 / (day_end - day_start) as f64
    } else {
        0.0
    }
}

/// Average over participants of [`participant_gap_factor`]; 1.0 with no participants.
pub fn gap_minimization_score(
    candidate: &TimeRange,
    calendars: &[ParticipantCalendar],
    policy: &ScoringPolicy,
) -> f64 {
    average(calendars, |busy| participant_gap_factor(candidate, busy, policy))
}

/// Average over participants of [`participant_buffer_factor`]; 1.0 with no participants.
pub fn buffer_time_score(
    candidate: &TimeRange,
    calendars: &[ParticipantCalendar],
    policy: &ScoringPolicy,
) -> f64 {
    average(calendars, |busy| participant_buffer_factor(candidate, busy, policy))
}

/// Product over neighbouring gaps of: 0.5 below the buffer, 0.8 above the
/// large-gap threshold, 1.0 otherwise.
pub fn participant_gap_factor(
    candidate: &TimeRange,
    busy: &[BusyInterval],
    policy: &ScoringPolicy,
) -> f64 {
    let buffer = f64::from(policy.buffer_minutes);
    let large_gap = f64::from(policy.large_gap_minutes);

    neighbour_gaps(candidate, busy).fold(1.0, |acc, gap| {
        if gap < buffer {
            acc * 0.5
        } else if gap > large_gap {
            acc * 0.8
        } else {
            acc
        }
    })
}

/// Product over neighbouring gaps of `gap / buffer` for gaps below the buffer.
/// Longer gaps leave the factor unchanged.
pub fn participant_buffer_factor(
    candidate: &TimeRange,
    busy: &[BusyInterval],
    policy: &ScoringPolicy,
) -> f64 {
    let buffer = f64::from(policy.buffer_minutes);

    neighbour_gaps(candidate, busy).fold(1.0, |acc, gap| {
        if gap < buffer {
            acc * (gap / buffer)
        } else {
            acc
        }
    })
}

/// Gaps in minutes between `candidate` and every busy interval that ends
/// strictly before it starts or starts strictly after it ends.
fn neighbour_gaps<'a>(
    candidate: &'a TimeRange,
    busy: &'a [BusyInterval],
) -> impl Iterator<Item = f64> + 'a {
    busy.iter().flat_map(move |b| {
        let before = (b.end < candidate.start).then(|| minutes(candidate.start - b.end));
        let after = (b.start > candidate.end).then(|| minutes(b.start - candidate.end));
        before.into_iter().chain(after)
    })
}

fn minutes(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 60_000.0
}

fn average<F>(calendars: &[ParticipantCalendar], per_participant: F) -> f64
where
    F: Fn(&[BusyInterval]) -> f64,
{
    if calendars.is_empty() {
        return 1.0;
    }
    let total: f64 = calendars.iter().map(|c| per_participant(&c.busy)).sum();
    total / calendars.len() as f64
}
