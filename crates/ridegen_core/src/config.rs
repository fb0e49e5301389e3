use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geo::BoundingBox;
use crate::hotspots::Hotspot;

/// Madrid summer time, the offset the producer stamps local hours with.
const DEFAULT_UTC_OFFSET_HOURS: i32 = 2;

/// Largest accepted mean batch size per tick.
pub const MAX_REQUEST_RATE: f64 = 10_000.0;

/// Parameters for building a [`crate::simulation::SimulationContext`].
///
/// Counts are signed so that malformed input (e.g. a negative count in a
/// config document) reaches [`SimulationConfig::validate`] instead of
/// failing somewhere in deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_drivers: i64,
    pub num_users: i64,
    /// Mean ride requests per tick.
    pub base_request_rate: f64,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Clock start in unix seconds. `None` uses wall-clock time at construction.
    pub start_epoch_secs: Option<i64>,
    /// Offset used to turn timestamps into local hours of day.
    pub utc_offset_hours: i32,
    pub bounds: BoundingBox,
    /// Custom hotspot table. `None` uses the built-in New York City table.
    pub hotspots: Option<Vec<Hotspot>>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_drivers: 10,
            num_users: 50,
            base_request_rate: 5.0,
            seed: None,
            start_epoch_secs: None,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            bounds: BoundingBox::default(),
            hotspots: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(num_drivers: i64, num_users: i64, base_request_rate: f64) -> Self {
        Self {
            num_drivers,
            num_users,
            base_request_rate,
            ..Default::default()
        }
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_start_epoch_secs(mut self, epoch_secs: i64) -> Self {
        self.start_epoch_secs = Some(epoch_secs);
        self
    }

    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_hotspots(mut self, hotspots: Vec<Hotspot>) -> Self {
        self.hotspots = Some(hotspots);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.driver_count()?;
        self.user_count()?;
        if !(0.0..=MAX_REQUEST_RATE).contains(&self.base_request_rate) {
            return Err(ConfigError::InvalidRequestRate {
                rate: self.base_request_rate,
                max: MAX_REQUEST_RATE,
            });
        }
        self.utc_offset()?;
        self.bounds.validate()
    }

    /// The configured offset as a chrono [`FixedOffset`].
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_hours
            .checked_mul(3_600)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidUtcOffset(self.utc_offset_hours))
    }

    pub fn driver_count(&self) -> Result<usize, ConfigError> {
        non_negative("num_drivers", self.num_drivers)
    }

    pub fn user_count(&self) -> Result<usize, ConfigError> {
        non_negative("num_users", self.num_users)
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::NegativeCount { field, value })
}
