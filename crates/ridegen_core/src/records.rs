//! Output record schemas handed to the serialization collaborator.
//!
//! Field names and enum symbols match the wire schemas exactly, so any serde
//! backend can write these records without a mapping layer.

use serde::{Deserialize, Serialize};

use crate::agents::{Driver, DriverStatus};
use crate::geo::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Requested,
    Accepted,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub request_id: String,
    pub user_id: String,
    /// Unix seconds.
    pub timestamp: i64,
    pub pickup_location: Location,
    pub destination: Location,
    pub status: RequestStatus,
    pub vehicle_type: String,
    pub estimated_fare: f64,
    /// Minutes.
    pub estimated_duration: i32,
    /// Kilometres.
    pub estimated_distance: f64,
    pub passenger_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub vehicle_id: String,
    pub vehicle_type: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStatusRecord {
    pub driver_id: String,
    /// Unix seconds.
    pub timestamp: i64,
    pub current_location: Location,
    pub status: DriverStatus,
    pub vehicle_info: VehicleInfo,
    pub current_ride_id: Option<String>,
    pub last_update: i64,
    pub battery_level: Option<f64>,
}

impl DriverStatusRecord {
    pub fn from_driver(driver: &Driver, timestamp: i64) -> Self {
        Self {
            driver_id: driver.driver_id.clone(),
            timestamp,
            current_location: driver.location,
            status: driver.status,
            vehicle_info: VehicleInfo {
                vehicle_id: driver.vehicle.vehicle_id.clone(),
                vehicle_type: driver.vehicle.vehicle_type.to_string(),
                capacity: driver.vehicle.capacity,
            },
            current_ride_id: driver.current_ride_id.clone(),
            last_update: driver.last_update,
            battery_level: Some(driver.battery_level),
        }
    }
}
