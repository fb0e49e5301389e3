use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::Location;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[default]
    Economy,
    Comfort,
    Premium,
    #[serde(rename = "SUV")]
    Suv,
    Van,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Economy,
        VehicleType::Comfort,
        VehicleType::Premium,
        VehicleType::Suv,
        VehicleType::Van,
    ];

    /// Seats offered by a vehicle of this type.
    pub fn capacity(self) -> i32 {
        match self {
            VehicleType::Economy | VehicleType::Comfort | VehicleType::Premium => 4,
            VehicleType::Suv => 6,
            VehicleType::Van => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Economy => "Economy",
            VehicleType::Comfort => "Comfort",
            VehicleType::Premium => "Premium",
            VehicleType::Suv => "SUV",
            VehicleType::Van => "Van",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    #[default]
    Available,
    Busy,
    Offline,
    EnRouteToPickup,
    WithPassenger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,
    pub capacity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub driver_id: String,
    pub location: Location,
    pub status: DriverStatus,
    pub vehicle: Vehicle,
    /// Always `None` at creation; set by whatever dispatches rides.
    pub current_ride_id: Option<String>,
    /// Unix seconds.
    pub last_update: i64,
    /// Charge in [0, 1].
    pub battery_level: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub home_location: Location,
    pub work_location: Location,
    pub preferred_vehicle_type: VehicleType,
    /// In [0.02, 0.08].
    pub cancellation_probability: f64,
    /// Unix seconds.
    pub last_activity: i64,
}
