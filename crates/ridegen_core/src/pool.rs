//! Entity pool: the fixed driver and user populations behind every generated event.
//!
//! Built once per simulation from the hotspot model; no insertion or removal
//! API exists afterwards.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agents::{Driver, DriverStatus, User, Vehicle, VehicleType};
use crate::hotspots::SpatialHotspotModel;
use crate::sampling::WeightedSampler;

/// Hotspot bias for driver positions.
pub const DRIVER_HOTSPOT_BIAS: f64 = 0.8;

/// Hotspot bias for user home and work locations.
pub const USER_HOTSPOT_BIAS: f64 = 0.9;

const DRIVER_STATUS_WEIGHTS: [(DriverStatus, f64); 3] = [
    (DriverStatus::Available, 0.6),
    (DriverStatus::Busy, 0.3),
    (DriverStatus::Offline, 0.1),
];

const PREFERRED_VEHICLE_WEIGHTS: [(VehicleType, f64); 5] = [
    (VehicleType::Economy, 0.5),
    (VehicleType::Comfort, 0.25),
    (VehicleType::Premium, 0.15),
    (VehicleType::Suv, 0.07),
    (VehicleType::Van, 0.03),
];

const FIRST_NAMES: [&str; 16] = [
    "Alex", "Maria", "James", "Sofia", "David", "Lucia", "Michael", "Emma", "Daniel", "Olivia",
    "Carlos", "Grace", "Samuel", "Hannah", "Omar", "Julia",
];

const LAST_NAMES: [&str; 16] = [
    "Smith", "Garcia", "Johnson", "Martinez", "Brown", "Lopez", "Davis", "Wilson", "Anderson",
    "Thomas", "Moore", "Jackson", "Lee", "Harris", "Clark", "Lewis",
];

/// Weighted draws used while populating the pool.
#[derive(Debug, Clone)]
struct PoolSamplers {
    vehicle_type: WeightedSampler<VehicleType>,
    driver_status: WeightedSampler<DriverStatus>,
    preferred_vehicle: WeightedSampler<VehicleType>,
}

impl PoolSamplers {
    fn new() -> Self {
        Self {
            vehicle_type: WeightedSampler::uniform(&VehicleType::ALL),
            driver_status: WeightedSampler::new(&DRIVER_STATUS_WEIGHTS),
            preferred_vehicle: WeightedSampler::new(&PREFERRED_VEHICLE_WEIGHTS),
        }
    }
}

/// Hands out `PREFIX-xxxxxxxx` identifiers, redrawing on collision.
struct IdAllocator {
    issued: HashSet<String>,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            issued: HashSet::new(),
        }
    }

    fn next<R: Rng + ?Sized>(&mut self, rng: &mut R, prefix: &str) -> String {
        loop {
            let id = short_id(rng, prefix);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// First eight hex characters of a v4 UUID drawn from `rng`.
pub(crate) fn short_id<R: Rng + ?Sized>(rng: &mut R, prefix: &str) -> String {
    let uuid = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    let simple = uuid.simple().to_string();
    format!("{prefix}-{}", &simple[..8])
}

#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    drivers: Vec<Driver>,
    users: Vec<User>,
    user_index: HashMap<String, usize>,
}

impl EntityPool {
    /// Populate `num_drivers` drivers and `num_users` users, stamped with `now_secs`.
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        model: &SpatialHotspotModel,
        num_drivers: usize,
        num_users: usize,
        now_secs: i64,
    ) -> Self {
        let samplers = PoolSamplers::new();
        let mut ids = IdAllocator::new();

        let drivers: Vec<Driver> = (0..num_drivers)
            .map(|_| spawn_driver(rng, model, &samplers, &mut ids, now_secs))
            .collect();
        let users: Vec<User> = (0..num_users)
            .map(|_| spawn_user(rng, model, &samplers, &mut ids, now_secs))
            .collect();
        let user_index = users
            .iter()
            .enumerate()
            .map(|(i, user)| (user.user_id.clone(), i))
            .collect();

        Self {
            drivers,
            users,
            user_index,
        }
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.user_index.get(user_id).map(|&i| &self.users[i])
    }

    /// Pick one user uniformly at random, or `None` for an empty pool.
    pub fn random_user<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&User> {
        self.users.choose(rng)
    }

    pub fn num_drivers(&self) -> usize {
        self.drivers.len()
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }
}

fn spawn_driver<R: Rng + ?Sized>(
    rng: &mut R,
    model: &SpatialHotspotModel,
    samplers: &PoolSamplers,
    ids: &mut IdAllocator,
    now_secs: i64,
) -> Driver {
    let driver_id = ids.next(rng, "D");
    let location = model.sample_location(rng, DRIVER_HOTSPOT_BIAS);
    let vehicle_type = samplers.vehicle_type.sample(rng).unwrap_or_default();
    let status = samplers.driver_status.sample(rng).unwrap_or_default();

    Driver {
        driver_id,
        location,
        status,
        vehicle: Vehicle {
            vehicle_id: ids.next(rng, "V"),
            vehicle_type,
            capacity: vehicle_type.capacity(),
        },
        current_ride_id: None,
        last_update: now_secs,
        battery_level: rng.gen_range(0.3..=1.0),
    }
}

fn spawn_user<R: Rng + ?Sized>(
    rng: &mut R,
    model: &SpatialHotspotModel,
    samplers: &PoolSamplers,
    ids: &mut IdAllocator,
    now_secs: i64,
) -> User {
    let user_id = ids.next(rng, "U");
    let home_location = model.sample_location(rng, USER_HOTSPOT_BIAS);
    let work_location = model.sample_location(rng, USER_HOTSPOT_BIAS);
    let preferred_vehicle_type = samplers.preferred_vehicle.sample(rng).unwrap_or_default();

    User {
        user_id,
        name: random_name(rng),
        home_location,
        work_location,
        preferred_vehicle_type,
        cancellation_probability: rng.gen_range(0.02..=0.08),
        last_activity: now_secs,
    }
}

fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
    format!("{first} {last}")
}
