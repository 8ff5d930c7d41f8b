//! Merged busy index across all participants.
//!
//! Every participant's busy intervals are flattened, sorted and merged into a
//! single list of disjoint closed intervals. A slot is free for everybody iff
//! it misses every merged interval, which a binary search answers in
//! `O(log n)` instead of a scan over every interval of every participant.
//!
//! Intervals are closed, so touching intervals merge too. This keeps the index
//! in exact agreement with [`conflict::is_free`](crate::conflict::is_free),
//! where touching counts as a conflict.

use chrono::{DateTime, Utc};

use crate::conflict;
use crate::model::{BusyInterval, ParticipantCalendar, TimeRange};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusyIndex {
    /// Sorted, disjoint, closed intervals.
    merged: Vec<(DateTime<Utc>, DateTime<Utc>)>,
    /// Intervals with `end < start`. Cannot be merged, checked pairwise.
    inverted: Vec<BusyInterval>,
}

impl BusyIndex {
    pub fn new(calendars: &[ParticipantCalendar]) -> Self {
        let (mut intervals, inverted): (Vec<BusyInterval>, Vec<BusyInterval>) = calendars
            .iter()
            .flat_map(|c| c.busy.iter().copied())
            .partition(|b| b.start <= b.end);

        intervals.sort_by_key(|b| (b.start, b.end));

        let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::with_capacity(intervals.len());
        for BusyInterval { start, end } in intervals {
            if let Some(last) = merged.last_mut() {
                if start <= last.1 {
                    last.1 = last.1.max(end);
                    continue;
                }
            }
            merged.push((start, end));
        }

        Self { merged, inverted }
    }

    /// Whether `candidate` misses every busy interval of every participant.
    pub fn is_free(&self, candidate: &TimeRange) -> bool {
        // First merged interval that does not end before the candidate starts.
        let idx = self.merged.partition_point(|&(_, end)| end < candidate.start);
        let clear_of_merged = match self.merged.get(idx) {
            Some(&(start, _)) => start > candidate.end,
            None => true,
        };

        clear_of_merged
            && self
                .inverted
                .iter()
                .all(|busy| conflict::is_free(candidate, busy))
    }

    /// Merged busy periods in ascending order.
    pub fn merged(&self) -> impl Iterator<Item = BusyInterval> + '_ {
        self.merged
            .iter()
            .map(|&(start, end)| BusyInterval::new(start, end))
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty() && self.inverted.is_empty()
    }
}
