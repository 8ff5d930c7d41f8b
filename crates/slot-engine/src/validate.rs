//! Request validation.
//!
//! Checks run in a fixed order and the first failure is returned. A request
//! that passes is turned into a [`SlotQuery`] the enumerator can trust: a
//! non-empty window that starts no earlier than "now" and fits the duration.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Months, Utc};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::{Result, ValidationError};
use crate::model::{ScheduleRequest, SlotQuery, TimeRange};

/// Validate `req` against the instant reported by `clock`.
///
/// Check order:
///
/// 1. participants present
/// 2. no empty participant id
/// 3. no duplicate participant id
/// 4. duration in `1..=max_duration_minutes`
/// 5. window start and end present
/// 6. start before end
/// 7. start not in the past
/// 8. end within `max_horizon_months` of now
/// 9. duration fits the window
pub fn validate(
    req: &ScheduleRequest,
    clock: &dyn Clock,
    config: &EngineConfig,
) -> Result<SlotQuery> {
    if req.participant_ids.is_empty() {
        return Err(ValidationError::EmptyParticipants);
    }

    let mut seen = HashSet::with_capacity(req.participant_ids.len());
    for id in &req.participant_ids {
        if id.is_empty() {
            return Err(ValidationError::EmptyParticipantId);
        }
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::DuplicateParticipant(id.clone()));
        }
    }

    let duration_minutes = match u32::try_from(req.duration_minutes) {
        Ok(d) if d > 0 && d <= config.max_duration_minutes => d,
        _ => {
            return Err(ValidationError::InvalidDuration {
                got: req.duration_minutes,
                max: config.max_duration_minutes,
            })
        }
    };

    let start = req.time_range.start.ok_or(ValidationError::MissingStartTime)?;
    let end = req.time_range.end.ok_or(ValidationError::MissingEndTime)?;
    let range = TimeRange::new(start, end).ok_or(ValidationError::StartAfterEnd)?;

    let now = clock.now();
    if start < now {
        return Err(ValidationError::StartInPast);
    }

    let horizon = now
        .checked_add_months(Months::new(config.max_horizon_months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    if end > horizon {
        return Err(ValidationError::EndBeyondOneYear {
            months: config.max_horizon_months,
        });
    }

    match start.checked_add_signed(Duration::minutes(i64::from(duration_minutes))) {
        Some(slot_end) if slot_end <= end => {}
        _ => return Err(ValidationError::DurationExceedsRange),
    }

    Ok(SlotQuery {
        range,
        duration_minutes,
    })
}
