//! Candidate slot enumeration.
//!
//! Candidates start at the window start and advance by a fixed step. A
//! candidate is yielded only when it ends strictly before the window end and
//! is free for every participant. Output is in ascending start order, which
//! the selector relies on for tie-breaking.

use chrono::{DateTime, Duration, Utc};

use crate::freebusy::BusyIndex;
use crate::model::{ParticipantCalendar, SlotQuery, TimeRange};

/// Lazy iterator over free candidate slots for one query.
#[derive(Debug, Clone)]
pub struct SlotEnumerator {
    index: BusyIndex,
    current: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration: Duration,
    step: Duration,
}

/// Enumerate free slots for `query`, stepping by `granularity_minutes`.
///
/// `granularity_minutes` must be non-zero; [`EngineConfig::validate`](crate::config::EngineConfig::validate)
/// enforces this for configured values.
pub fn enumerate(
    query: &SlotQuery,
    calendars: &[ParticipantCalendar],
    granularity_minutes: u32,
) -> SlotEnumerator {
    SlotEnumerator {
        index: BusyIndex::new(calendars),
        current: query.range.start,
        window_end: query.range.end,
        duration: query.duration(),
        step: Duration::minutes(i64::from(granularity_minutes.max(1))),
    }
}

impl Iterator for SlotEnumerator {
    type Item = TimeRange;

    fn next(&mut self) -> Option<TimeRange> {
        while self.current < self.window_end {
            let start = self.current;
            let slot_end = start + self.duration;
            self.current = start + self.step;

            // Later candidates only end later.
            if slot_end >= self.window_end {
                self.current = self.window_end;
                return None;
            }

            let candidate = TimeRange {
                start,
                end: slot_end,
            };
            if self.index.is_free(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for SlotEnumerator {}
