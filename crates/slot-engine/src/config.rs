//! Engine and scoring configuration.
//!
//! Every field has a default matching the standard preference model, so an
//! empty JSON object (`{}`) is a complete configuration.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Step between consecutive candidate start times.
    pub granularity_minutes: u32,
    /// Longest meeting a request may ask for.
    pub max_duration_minutes: u32,
    /// How far past "now" the search window may end, in calendar months.
    pub max_horizon_months: u32,
    pub scoring: ScoringPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: 15,
            max_duration_minutes: 480,
            max_horizon_months: 12,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration and check its values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.granularity_minutes == 0 {
            return Err(ConfigError::InvalidValue(
                "granularity_minutes must be greater than 0".to_string(),
            ));
        }
        if self.max_duration_minutes == 0 {
            return Err(ConfigError::InvalidValue(
                "max_duration_minutes must be greater than 0".to_string(),
            ));
        }
        self.scoring.validate()
    }
}

/// Weights applied to each sub-score in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub working_hours: f64,
    pub early_slot: f64,
    pub gap_minimization: f64,
    pub buffer_time: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            working_hours: 1.0,
            early_slot: 0.8,
            gap_minimization: 0.6,
            buffer_time: 0.4,
        }
    }
}

/// Parameters of the slot preference model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Zone whose wall-clock hour decides the working-hours and earliness scores.
    #[serde(with = "tz_name")]
    pub timezone: Tz,
    pub weights: ScoringWeights,
    /// Desired gap between a meeting and its neighbouring events.
    pub buffer_minutes: u32,
    /// Gaps longer than this are mildly penalised by gap minimisation.
    pub large_gap_minutes: u32,
    /// First hour of the primary working day.
    pub work_day_start_hour: u32,
    /// Hour at which the primary working day ends (exclusive).
    pub work_day_end_hour: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            weights: ScoringWeights::default(),
            buffer_minutes: 15,
            large_gap_minutes: 60,
            work_day_start_hour: 9,
            work_day_end_hour: 17,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_minutes == 0 {
            return Err(ConfigError::InvalidValue(
                "buffer_minutes must be greater than 0".to_string(),
            ));
        }
        if self.work_day_start_hour >= self.work_day_end_hour || self.work_day_end_hour > 24 {
            return Err(ConfigError::InvalidValue(format!(
                "working day {}..{} is not a valid hour range",
                self.work_day_start_hour, self.work_day_end_hour
            )));
        }
        let w = &self.weights;
        if [w.working_hours, w.early_slot, w.gap_minimization, w.buffer_time]
            .iter()
            .any(|weight| !weight.is_finite())
        {
            return Err(ConfigError::InvalidValue(
                "scoring weights must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// (De)serialize a [`Tz`] as its IANA name.
mod tz_name {
    use chrono_tz::Tz;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(tz.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Tz, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Tz>()
            .map_err(|_| de::Error::custom(format!("unknown timezone: {}", name)))
    }
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone(name.to_string()))
}
