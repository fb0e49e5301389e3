//! Simulation context: every piece of mutable engine state behind one value.
//!
//! There are no module-level singletons; independent contexts can run side
//! by side in one process. A context is single-writer: whoever owns it drives
//! the ticks.

use bevy_ecs::prelude::Resource;
use chrono::{FixedOffset, TimeZone, Timelike, Utc};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::SimulationClock;
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::generator::{RideRequestGenerator, TIMESTAMP_JITTER_SECS};
use crate::geo::Location;
use crate::hotspots::{nyc_hotspots, SpatialHotspotModel};
use crate::pool::EntityPool;
use crate::pricing::{TripEstimate, TripEstimator};
use crate::records::{DriverStatusRecord, RideRequest};

#[derive(Debug, Resource)]
pub struct SimulationContext {
    config: SimulationConfig,
    model: SpatialHotspotModel,
    pool: EntityPool,
    clock: SimulationClock,
    generator: RideRequestGenerator,
    estimator: TripEstimator,
    utc_offset: FixedOffset,
    rng: StdRng,
}

impl SimulationContext {
    /// Validate `config` and build the hotspot model and entity pool.
    /// Nothing is built if validation fails.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let num_drivers = config.driver_count()?;
        let num_users = config.user_count()?;
        let utc_offset = config.utc_offset()?;

        let hotspots = config.hotspots.clone().unwrap_or_else(nyc_hotspots);
        let model = SpatialHotspotModel::new(config.bounds, hotspots)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let start = config
            .start_epoch_secs
            .unwrap_or_else(|| Utc::now().timestamp());

        let pool = EntityPool::build(&mut rng, &model, num_drivers, num_users, start);
        info!(
            "initialized ride-hailing simulation with {} drivers and {} users at t={start}",
            pool.num_drivers(),
            pool.num_users()
        );
        if pool.num_users() == 0 {
            warn!("user pool is empty; ticks will emit no ride requests");
        }

        Ok(Self {
            generator: RideRequestGenerator::new(config.base_request_rate),
            config,
            model,
            pool,
            clock: SimulationClock::new(start),
            estimator: TripEstimator::default(),
            utc_offset,
            rng,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn hotspot_model(&self) -> &SpatialHotspotModel {
        &self.model
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn with_trip_estimator(mut self, estimator: TripEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Emit one batch of ride requests and advance the clock.
    pub fn tick(&mut self) -> Vec<RideRequest> {
        self.generator.tick(&mut self.rng, &self.pool, &mut self.clock)
    }

    /// Current driver snapshot, every record stamped with the clock's time.
    pub fn driver_snapshot(&self) -> Vec<DriverStatusRecord> {
        let now = self.clock.now();
        self.pool
            .drivers()
            .iter()
            .map(|driver| DriverStatusRecord::from_driver(driver, now))
            .collect()
    }

    /// Driver status batch for periodic emission: each record is stamped
    /// `base_timestamp` plus 0-4 seconds of jitter.
    pub fn driver_status_records(&mut self, base_timestamp: i64) -> Vec<DriverStatusRecord> {
        let rng = &mut self.rng;
        self.pool
            .drivers()
            .iter()
            .map(|driver| {
                let jitter = rng.gen_range(0..=TIMESTAMP_JITTER_SECS);
                DriverStatusRecord::from_driver(driver, base_timestamp.saturating_add(jitter))
            })
            .collect()
    }

    /// Sample a location from the hotspot model using the context RNG.
    pub fn sample_location(&mut self, hotspot_bias: f64) -> Location {
        self.model.sample_location(&mut self.rng, hotspot_bias)
    }

    pub fn demand_factor(&self, location: &Location, hour_of_day: u32) -> f64 {
        self.model.demand_factor(location, hour_of_day)
    }

    /// Demand factor at the local hour of `timestamp_secs`.
    pub fn demand_factor_at(&self, location: &Location, timestamp_secs: i64) -> f64 {
        self.demand_factor(location, self.local_hour(timestamp_secs))
    }

    /// Hour of day (0-23) of a unix timestamp in the configured UTC offset.
    pub fn local_hour(&self, timestamp_secs: i64) -> u32 {
        local_hour(timestamp_secs, self.utc_offset)
    }

    pub fn estimate_trip(&mut self, pickup: &Location, destination: &Location) -> TripEstimate {
        self.estimator.estimate(&mut self.rng, pickup, destination)
    }
}

/// Hour of day of `timestamp_secs` in `offset`.
pub fn local_hour(timestamp_secs: i64, offset: FixedOffset) -> u32 {
    match offset.timestamp_opt(timestamp_secs, 0).single() {
        Some(local) => local.hour(),
        // Beyond chrono's date range; the hour only depends on seconds of day.
        None => {
            let local = i128::from(timestamp_secs) + i128::from(offset.local_minus_utc());
            (local.rem_euclid(86_400) / 3_600) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: SimulationConfig) -> SimulationContext {
        SimulationContext::new(config.with_seed(7).with_start_epoch_secs(1_700_000_000))
            .expect("valid config")
    }

    #[test]
    fn negative_counts_build_nothing() {
        let result = SimulationContext::new(SimulationConfig::new(-5, 10, 5.0));
        assert!(matches!(result, Err(ConfigError::NegativeCount { .. })));
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = seeded(SimulationConfig::new(5, 20, 5.0));
        let mut b = seeded(SimulationConfig::new(5, 20, 5.0));
        assert_eq!(a.pool().users(), b.pool().users());
        for _ in 0..10 {
            assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn driver_snapshot_covers_every_driver() {
        let ctx = seeded(SimulationConfig::new(12, 0, 5.0));
        let snapshot = ctx.driver_snapshot();
        assert_eq!(snapshot.len(), 12);
        assert!(snapshot.iter().all(|r| r.timestamp == ctx.now()));
        assert!(snapshot.iter().all(|r| r.battery_level.is_some()));
    }

    #[test]
    fn driver_status_records_are_jittered_from_base() {
        let mut ctx = seeded(SimulationConfig::new(30, 0, 5.0));
        let records = ctx.driver_status_records(2_000);
        assert_eq!(records.len(), 30);
        assert!(records.iter().all(|r| (2_000..=2_004).contains(&r.timestamp)));
    }

    #[test]
    fn local_hour_applies_offset() {
        // 2023-11-14T22:13:20Z
        let hours = |h: i32| FixedOffset::east_opt(h * 3_600).expect("valid offset");
        assert_eq!(local_hour(1_700_000_000, hours(0)), 22);
        assert_eq!(local_hour(1_700_000_000, hours(2)), 0);
        assert_eq!(local_hour(1_700_000_000, hours(-5)), 17);
        assert_eq!(local_hour(i64::MAX, hours(0)), 15);
    }

    #[test]
    fn out_of_range_offset_builds_nothing() {
        let result = SimulationContext::new(
            SimulationConfig::default().with_seed(7).with_utc_offset_hours(30),
        );
        assert!(matches!(result, Err(ConfigError::InvalidUtcOffset(30))));
    }

    #[test]
    fn local_hour_follows_configured_offset() {
        let ctx = seeded(SimulationConfig::default().with_utc_offset_hours(-5));
        assert_eq!(ctx.local_hour(1_700_000_000), 17);
        let midtown = Location::new(40.75, -73.98);
        assert_eq!(
            ctx.demand_factor_at(&midtown, 1_700_000_000),
            ctx.demand_factor(&midtown, 17)
        );
    }

    #[test]
    fn demand_factor_is_pure() {
        let ctx = seeded(SimulationConfig::default());
        let midtown = Location::new(40.75, -73.98);
        let first = ctx.demand_factor(&midtown, 8);
        let second = ctx.demand_factor(&midtown, 8);
        assert_eq!(first, second);
        assert!(first >= 3.0);
    }

    #[test]
    fn demand_factor_at_uses_local_time() {
        let ctx = seeded(SimulationConfig::default().with_utc_offset_hours(0));
        let midtown = Location::new(40.75, -73.98);
        // 1_700_000_000 is 22:xx UTC.
        assert_eq!(
            ctx.demand_factor_at(&midtown, 1_700_000_000),
            ctx.demand_factor(&midtown, 22)
        );
    }
}
