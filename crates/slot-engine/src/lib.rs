//! # slot-engine
//!
//! Deterministic meeting slot search for a group of participants.
//!
//! Given a scheduling request and every participant's busy intervals, the
//! engine enumerates fixed-granularity candidate slots inside the requested
//! window, discards any slot that conflicts with a busy interval, scores the
//! survivors on working-hours, earliness, gap and buffer heuristics, and picks
//! a single winner. The engine performs no I/O; the caller supplies the
//! calendars and a [`Clock`] for the "now" anchor.
//!
//! ## Modules
//!
//! - [`model`] — Time ranges, busy intervals, requests and candidate slots
//! - [`clock`] — Injectable time source for validation
//! - [`config`] — Engine and scoring configuration
//! - [`validate`] — Request validation, fail-fast in a fixed order
//! - [`conflict`] — Pairwise availability predicate and conflict listing
//! - [`freebusy`] — Merged busy index for fast availability checks
//! - [`enumerate`] — Candidate slot enumeration
//! - [`score`] — Composite slot scoring
//! - [`select`] — Deterministic ranking and selection
//! - [`scheduler`] — The full validate → enumerate → score → select pipeline
//! - [`service`] — Booking flow over a pluggable calendar store
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod conflict;
pub mod enumerate;
pub mod error;
pub mod freebusy;
pub mod model;
pub mod scheduler;
pub mod score;
pub mod select;
pub mod service;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, ScoringPolicy, ScoringWeights};
pub use conflict::{find_conflicts, is_free, Conflict};
pub use enumerate::{enumerate, SlotEnumerator};
pub use error::{ConfigError, ServiceError, StoreError, ValidationError};
pub use freebusy::BusyIndex;
pub use model::{
    BusyInterval, CandidateSlot, ParticipantCalendar, RequestedWindow, ScheduleRequest,
    SlotQuery, TimeRange,
};
pub use scheduler::{find_optimal_slot, rank_slots};
pub use score::score;
pub use select::{rank, select};
pub use service::{
    CalendarEvent, CalendarStore, InMemoryCalendarStore, ScheduleResponse, SchedulerService, User,
};
pub use validate::validate;
