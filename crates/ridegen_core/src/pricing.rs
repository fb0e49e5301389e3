//! Trip estimation: distance, randomized duration and fare between two points.
//!
//! Independent of simulation state; the request generator does not call it.

use rand::Rng;
use serde::Serialize;

use crate::geo::Location;

/// Base fare in currency units.
pub const BASE_FARE: f64 = 2.50;

/// Per-kilometer rate in currency units.
pub const PER_KM_RATE: f64 = 1.75;

/// Per-minute rate in currency units.
pub const PER_MINUTE_RATE: f64 = 0.35;

const DEFAULT_MIN_SPEED_KMH: f64 = 15.0;
const DEFAULT_MAX_SPEED_KMH: f64 = 35.0;
const DEFAULT_MAX_TRAFFIC_DELAY_MIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripEstimate {
    pub distance_km: f64,
    pub duration_minutes: i32,
    pub fare: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TripEstimator {
    min_speed_kmh: f64,
    max_speed_kmh: f64,
    max_traffic_delay_min: f64,
}

impl Default for TripEstimator {
    fn default() -> Self {
        Self {
            min_speed_kmh: DEFAULT_MIN_SPEED_KMH,
            max_speed_kmh: DEFAULT_MAX_SPEED_KMH,
            max_traffic_delay_min: DEFAULT_MAX_TRAFFIC_DELAY_MIN,
        }
    }
}

impl TripEstimator {
    /// Override the average-speed range. Speeds are floored at 1 km/h.
    pub fn with_speed_range(mut self, min_kmh: f64, max_kmh: f64) -> Self {
        let min_kmh = min_kmh.max(1.0);
        self.min_speed_kmh = min_kmh;
        self.max_speed_kmh = max_kmh.max(min_kmh);
        self
    }

    pub fn with_max_traffic_delay(mut self, minutes: f64) -> Self {
        self.max_traffic_delay_min = minutes.max(0.0);
        self
    }

    /// Estimate a trip from `pickup` to `destination`.
    ///
    /// Distance is computed once, rounded to cents of a kilometre, and both
    /// duration and fare derive from that value:
    /// `fare = BASE_FARE + distance_km * PER_KM_RATE + duration_minutes * PER_MINUTE_RATE`.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pickup: &Location,
        destination: &Location,
    ) -> TripEstimate {
        let distance_km = round2(pickup.distance_km(destination));

        let speed_kmh = rng.gen_range(self.min_speed_kmh..=self.max_speed_kmh);
        let traffic_delay = rng.gen_range(0.0..=self.max_traffic_delay_min);
        let duration_minutes = ((distance_km / speed_kmh) * 60.0 + traffic_delay).round() as i32;

        TripEstimate {
            distance_km,
            duration_minutes,
            fare: fare_for(distance_km, duration_minutes),
        }
    }
}

/// Fare for an already-rounded distance and duration.
pub fn fare_for(distance_km: f64, duration_minutes: i32) -> f64 {
    round2(BASE_FARE + distance_km * PER_KM_RATE + f64::from(duration_minutes) * PER_MINUTE_RATE)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
