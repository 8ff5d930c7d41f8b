//! The full search pipeline: validate, enumerate, score, select.

use tracing::debug;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::enumerate::enumerate;
use crate::error::ValidationError;
use crate::model::{CandidateSlot, ParticipantCalendar, ScheduleRequest, SlotQuery};
use crate::score::score;
use crate::select::{rank, select};
use crate::validate::validate;

/// Find the best slot for `req` given every participant's busy intervals.
///
/// Returns `Ok(None)` when the request is valid but no slot is free for all
/// participants. Validation failures are returned before any search runs.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use slot_engine::{find_optimal_slot, EngineConfig, FixedClock, RequestedWindow, ScheduleRequest};
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
/// let req = ScheduleRequest {
///     participant_ids: vec!["alice".to_string()],
///     duration_minutes: 60,
///     time_range: RequestedWindow::new(
///         Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
///         Utc.with_ymd_and_hms(2026, 3, 2, 17, 0, 0).unwrap(),
///     ),
///     title: None,
/// };
///
/// let slot = find_optimal_slot(&req, &[], &clock, &EngineConfig::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(slot.start, Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
/// ```
pub fn find_optimal_slot(
    req: &ScheduleRequest,
    calendars: &[ParticipantCalendar],
    clock: &dyn Clock,
    config: &EngineConfig,
) -> Result<Option<CandidateSlot>, ValidationError> {
    let query = validate(req, clock, config)?;
    let best = select(scored_candidates(&query, calendars, config));

    match &best {
        Some(slot) => debug!(start = %slot.start, end = %slot.end, score = slot.score, "selected slot"),
        None => debug!("no free slot in window"),
    }
    Ok(best)
}

/// Up to `limit` slots for `req`, best first.
pub fn rank_slots(
    req: &ScheduleRequest,
    calendars: &[ParticipantCalendar],
    clock: &dyn Clock,
    config: &EngineConfig,
    limit: usize,
) -> Result<Vec<CandidateSlot>, ValidationError> {
    let query = validate(req, clock, config)?;
    let mut ranked = rank(scored_candidates(&query, calendars, config));
    ranked.truncate(limit);
    Ok(ranked)
}

/// Every free slot for `query`, scored, in ascending start order.
pub fn scored_candidates(
    query: &SlotQuery,
    calendars: &[ParticipantCalendar],
    config: &EngineConfig,
) -> Vec<CandidateSlot> {
    let candidates: Vec<CandidateSlot> = enumerate(query, calendars, config.granularity_minutes)
        .map(|range| CandidateSlot::new(range, score(&range, calendars, &config.scoring)))
        .collect();

    debug!(
        window_start = %query.range.start,
        window_end = %query.range.end,
        duration_minutes = query.duration_minutes,
        participants = calendars.len(),
        candidates = candidates.len(),
        "enumerated free slots"
    );
    candidates
}
