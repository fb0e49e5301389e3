//! Ride-request generator: one batch of REQUESTED events per clock tick.
//!
//! Each request pairs a uniformly chosen user's home (pickup) with their work
//! location (destination). Fare, duration and distance are drawn independently
//! from fixed ranges; [`crate::pricing::TripEstimator`] is not consulted here.

use log::debug;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::clock::SimulationClock;
use crate::pool::EntityPool;
use crate::pricing::round2;
use crate::records::{RequestStatus, RideRequest};

/// Upper bound (inclusive) of the per-request timestamp jitter, in seconds.
pub const TIMESTAMP_JITTER_SECS: i64 = 4;

const FARE_RANGE: (f64, f64) = (5.0, 50.0);
const DURATION_RANGE_MIN: (i32, i32) = (5, 45);
const DISTANCE_RANGE_KM: (f64, f64) = (1.0, 20.0);
const PASSENGER_RANGE: (i32, i32) = (1, 4);

#[derive(Debug, Clone, Copy)]
pub struct RideRequestGenerator {
    base_request_rate: f64,
}

impl RideRequestGenerator {
    pub fn new(base_request_rate: f64) -> Self {
        Self { base_request_rate }
    }

    pub fn base_request_rate(&self) -> f64 {
        self.base_request_rate
    }

    /// Batch size: `max(1, round(N(base_request_rate, 1)))`.
    pub fn sample_batch_size<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let z: f64 = rng.sample(StandardNormal);
        let size = (self.base_request_rate + z).round();
        if size.is_finite() && size > 1.0 {
            size as usize
        } else {
            1
        }
    }

    /// Emit one batch stamped from `clock`, then advance the clock one step.
    ///
    /// An empty user pool yields an empty batch; the clock still advances.
    pub fn tick<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pool: &EntityPool,
        clock: &mut SimulationClock,
    ) -> Vec<RideRequest> {
        let now = clock.now();
        let batch = if pool.num_users() == 0 {
            debug!("user pool is empty; no ride requests at t={now}");
            Vec::new()
        } else {
            let size = self.sample_batch_size(rng);
            (0..size)
                .filter_map(|_| self.request_at(rng, pool, now))
                .collect()
        };

        clock.advance();
        debug!(
            "tick at t={now}: {} ride requests, clock now {}",
            batch.len(),
            clock.now()
        );
        batch
    }

    fn request_at<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pool: &EntityPool,
        now: i64,
    ) -> Option<RideRequest> {
        let user = pool.random_user(rng)?;
        let request_id = format!(
            "R-{}",
            uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
        );

        Some(RideRequest {
            request_id,
            user_id: user.user_id.clone(),
            timestamp: now.saturating_add(rng.gen_range(0..=TIMESTAMP_JITTER_SECS)),
            pickup_location: user.home_location,
            destination: user.work_location,
            status: RequestStatus::Requested,
            vehicle_type: user.preferred_vehicle_type.to_string(),
            estimated_fare: round2(rng.gen_range(FARE_RANGE.0..=FARE_RANGE.1)),
            estimated_duration: rng.gen_range(DURATION_RANGE_MIN.0..=DURATION_RANGE_MIN.1),
            estimated_distance: round2(rng.gen_range(DISTANCE_RANGE_KM.0..=DISTANCE_RANGE_KM.1)),
            passenger_count: rng.gen_range(PASSENGER_RANGE.0..=PASSENGER_RANGE.1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::hotspots::SpatialHotspotModel;

    fn pool_with_users(users: usize, rng: &mut StdRng) -> EntityPool {
        EntityPool::build(rng, &SpatialHotspotModel::nyc(), 0, users, 1_000)
    }

    #[test]
    fn batch_size_is_at_least_one_even_for_zero_rate() {
        let generator = RideRequestGenerator::new(0.0);
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..1_000 {
            assert!(generator.sample_batch_size(&mut rng) >= 1);
        }
    }

    #[test]
    fn batch_size_centres_on_rate() {
        let generator = RideRequestGenerator::new(20.0);
        let mut rng = StdRng::seed_from_u64(32);
        let n = 5_000;
        let total: usize = (0..n).map(|_| generator.sample_batch_size(&mut rng)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 20.0).abs() < 0.1, "mean batch {mean}");
    }

    #[test]
    fn tick_emits_requested_commutes_and_advances_clock() {
        let mut rng = StdRng::seed_from_u64(33);
        let pool = pool_with_users(25, &mut rng);
        let mut clock = SimulationClock::new(1_000);
        let generator = RideRequestGenerator::new(5.0);

        let batch = generator.tick(&mut rng, &pool, &mut clock);
        assert!(!batch.is_empty());
        assert_eq!(clock.now(), 1_005);

        for request in &batch {
            let user = pool.user(&request.user_id).expect("user exists");
            assert_eq!(request.status, RequestStatus::Requested);
            assert_eq!(request.pickup_location, user.home_location);
            assert_eq!(request.destination, user.work_location);
            assert_eq!(request.vehicle_type, user.preferred_vehicle_type.to_string());
            assert!((1_000..=1_004).contains(&request.timestamp));
            assert!((5.0..=50.0).contains(&request.estimated_fare));
            assert!((5..=45).contains(&request.estimated_duration));
            assert!((1.0..=20.0).contains(&request.estimated_distance));
            assert!((1..=4).contains(&request.passenger_count));
            assert!(request.request_id.starts_with("R-"));
        }
    }

    #[test]
    fn empty_user_pool_yields_empty_batch() {
        let mut rng = StdRng::seed_from_u64(34);
        let pool = pool_with_users(0, &mut rng);
        let mut clock = SimulationClock::new(0);
        let batch = RideRequestGenerator::new(5.0).tick(&mut rng, &pool, &mut clock);
        assert!(batch.is_empty());
        assert_eq!(clock.now(), 5);
    }
}
