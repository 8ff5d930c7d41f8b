//! Booking flow over a pluggable calendar store.
//!
//! [`SchedulerService`] wraps the pure engine with the steps a booking needs:
//! it checks that every participant exists, collects their busy intervals from
//! a [`CalendarStore`], runs the slot search, and records the chosen
//! slot as one event per participant under a fresh meeting id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::{ServiceError, StoreError};
use crate::model::{BusyInterval, ParticipantCalendar, ScheduleRequest, TimeRange};
use crate::scheduler::scored_candidates;
use crate::select::select;
use crate::validate::validate;

/// Title used when a request does not carry one.
pub const DEFAULT_MEETING_TITLE: &str = "New Meeting";

/// A person who can be invited to meetings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// An event on one user's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        user_id: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            start_time,
            end_time,
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn busy_interval(&self) -> BusyInterval {
        BusyInterval::new(self.start_time, self.end_time)
    }
}

/// The booked meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub meeting_id: String,
    pub title: String,
    pub participant_ids: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Persistence for users and their calendar events.
pub trait CalendarStore {
    fn user(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Events of `user_id` that touch or overlap `[start, end]`.
    fn events_for(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, StoreError>;

    /// Record one event. Each call stands alone; the store offers no
    /// transaction spanning several inserts.
    fn insert_event(&mut self, event: CalendarEvent) -> Result<(), StoreError>;
}

/// A [`CalendarStore`] held in memory. Serializable so it can be kept in a
/// JSON file between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryCalendarStore {
    #[serde(default)]
    users: BTreeMap<String, User>,
    /// Events per user id, in insertion order.
    #[serde(default)]
    events: BTreeMap<String, Vec<CalendarEvent>>,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn events(&self, user_id: &str) -> &[CalendarEvent] {
        self.events.get(user_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl CalendarStore for InMemoryCalendarStore {
    fn user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(id).cloned())
    }

    fn events_for(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(self
            .events(user_id)
            .iter()
            .filter(|e| e.start_time <= end && e.end_time >= start)
            .cloned()
            .collect())
    }

    fn insert_event(&mut self, event: CalendarEvent) -> Result<(), StoreError> {
        if !self.users.contains_key(&event.user_id) {
            return Err(StoreError(format!(
                "cannot add event for unknown user {}",
                event.user_id
            )));
        }
        self.events
            .entry(event.user_id.clone())
            .or_default()
            .push(event);
        Ok(())
    }
}

/// Books meetings against a [`CalendarStore`].
pub struct SchedulerService<S, C> {
    store: S,
    clock: C,
    config: EngineConfig,
}

impl<S: CalendarStore, C: Clock> SchedulerService<S, C> {
    pub fn new(store: S, clock: C, config: EngineConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Find the best slot for `req` and book it for every participant.
    ///
    /// Events are inserted one participant at a time in request order. If an
    /// insert fails, events already recorded for earlier participants stay in
    /// the store and the error is returned without a meeting id.
    pub fn schedule(&mut self, req: &ScheduleRequest) -> Result<ScheduleResponse, ServiceError> {
        let query = validate(req, &self.clock, &self.config)?;

        for user_id in &req.participant_ids {
            if self.store.user(user_id).map_err(log_store_error)?.is_none() {
                return Err(ServiceError::UserNotFound(user_id.clone()));
            }
        }

        let TimeRange { start, end } = query.range;
        let mut calendars = Vec::with_capacity(req.participant_ids.len());
        for user_id in &req.participant_ids {
            let busy = self
                .store
                .events_for(user_id, start, end)
                .map_err(log_store_error)?
                .iter()
                .map(CalendarEvent::busy_interval)
                .collect();
            calendars.push(ParticipantCalendar::new(user_id.clone(), busy));
        }

        let slot = select(scored_candidates(&query, &calendars, &self.config))
            .ok_or(ServiceError::NoAvailableSlot)?;

        let meeting_id = Uuid::new_v4().to_string();
        let title = req
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_MEETING_TITLE)
            .to_string();

        for user_id in &req.participant_ids {
            let event =
                CalendarEvent::new(title.clone(), slot.start, slot.end, user_id.as_str(), &self.clock);
            debug!(event_id = %event.id, user_id = %user_id, "recording meeting event");
            self.store.insert_event(event).map_err(log_store_error)?;
        }

        info!(
            meeting_id = %meeting_id,
            start = %slot.start,
            end = %slot.end,
            participants = req.participant_ids.len(),
            "meeting scheduled"
        );

        Ok(ScheduleResponse {
            meeting_id,
            title,
            participant_ids: req.participant_ids.clone(),
            start_time: slot.start,
            end_time: slot.end,
        })
    }

    /// Events of `user_id` within `[start, end]`.
    ///
    /// An empty result is reported as [`ServiceError::NoEventsFound`].
    pub fn user_calendar(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, ServiceError> {
        if self.store.user(user_id).map_err(log_store_error)?.is_none() {
            return Err(ServiceError::UserNotFound(user_id.to_string()));
        }

        let events = self
            .store
            .events_for(user_id, start, end)
            .map_err(log_store_error)?;
        if events.is_empty() {
            return Err(ServiceError::NoEventsFound);
        }
        Ok(events)
    }
}

fn log_store_error(err: StoreError) -> StoreError {
    warn!(error = %err, "calendar store call failed");
    err
}
