//! Core data shapes shared by every stage of the search.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open span of time with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range, or `None` when `start` is not strictly before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// A range of `minutes` length beginning at `start`.
    pub fn starting_at(start: DateTime<Utc>, minutes: u32) -> Self {
        Self {
            start,
            end: start + Duration::minutes(i64::from(minutes)),
        }
    }
}

/// An existing commitment on a participant's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// One participant's busy intervals within the query window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantCalendar {
    pub participant_id: String,
    pub busy: Vec<BusyInterval>,
}

impl ParticipantCalendar {
    pub fn new(participant_id: impl Into<String>, busy: Vec<BusyInterval>) -> Self {
        Self {
            participant_id: participant_id.into(),
            busy,
        }
    }
}

/// The search window as received. Either bound may be missing in an
/// incoming request; validation turns it into a [`TimeRange`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedWindow {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl RequestedWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// A request to find a meeting slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub participant_ids: Vec<String>,
    pub duration_minutes: i64,
    #[serde(default)]
    pub time_range: RequestedWindow,
    /// Meeting title. Not used by the search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A request that passed validation: a well-formed window and a duration
/// that fits inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotQuery {
    pub range: TimeRange,
    pub duration_minutes: u32,
}

impl SlotQuery {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// A free slot together with its composite score (higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub score: f64,
}

impl CandidateSlot {
    pub fn new(range: TimeRange, score: f64) -> Self {
        Self {
            start: range.start,
            end: range.end,
            score,
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }
}
