//! Availability predicate for a candidate slot against busy intervals.
//!
//! Intervals are compared as closed ranges: a slot that ends exactly when a
//! busy interval starts, or starts exactly when one ends, IS a conflict.
//! Back-to-back meetings are never produced.

use serde::{Deserialize, Serialize};

use crate::model::{BusyInterval, ParticipantCalendar, TimeRange};

/// A busy interval that rules out a candidate slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub participant_id: String,
    pub busy: BusyInterval,
    /// Length of the shared span. Zero when the two only touch.
    pub overlap_minutes: i64,
}

/// Whether `candidate` is free with respect to a single busy interval.
///
/// Free iff `candidate.end < busy.start || candidate.start > busy.end`.
pub fn is_free(candidate: &TimeRange, busy: &BusyInterval) -> bool {
    candidate.end < busy.start || candidate.start > busy.end
}

/// Whether `candidate` is free for every participant.
///
/// Vacuously true when no participant has any busy interval.
pub fn is_free_for_all(candidate: &TimeRange, calendars: &[ParticipantCalendar]) -> bool {
    calendars
        .iter()
        .flat_map(|c| c.busy.iter())
        .all(|busy| is_free(candidate, busy))
}

/// List every busy interval, across all participants, that rejects `candidate`.
///
/// Conflicts are reported in calendar order, then in each calendar's interval order.
pub fn find_conflicts(candidate: &TimeRange, calendars: &[ParticipantCalendar]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for calendar in calendars {
        for busy in &calendar.busy {
            if !is_free(candidate, busy) {
                let overlap_start = candidate.start.max(busy.start);
                let overlap_end = candidate.end.min(busy.end);
                let overlap_minutes = (overlap_end - overlap_start).num_minutes().max(0);

                conflicts.push(Conflict {
                    participant_id: calendar.participant_id.clone(),
                    busy: *busy,
                    overlap_minutes,
                });
            }
        }
    }

    conflicts
}
