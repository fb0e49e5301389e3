//! Geographic primitives: coordinates, the city bounding box and great-circle distance.
//!
//! Coordinates are plain latitude/longitude degrees. Distances go through
//! [`h3o::LatLng`] so every caller shares one haversine implementation.

use h3o::LatLng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rough length of one degree of latitude, used to turn hotspot radii into kilometres.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Location) -> f64 {
        match (self.to_lat_lng(), other.to_lat_lng()) {
            (Some(a), Some(b)) => haversine_km(a, b),
            // Non-finite coordinates are never within range of anything.
            _ => f64::INFINITY,
        }
    }

    /// Planar distance in degree units, used for radius checks against hotspot tables.
    pub fn degree_offset(&self, other: &Location) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        (dlat * dlat + dlon * dlon).sqrt()
    }

    fn to_lat_lng(self) -> Option<LatLng> {
        LatLng::new(self.latitude, self.longitude).ok()
    }
}

impl From<(f64, f64)> for Location {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lon1) = (a.lat().to_radians(), a.lng().to_radians());
    let (lat2, lon2) = (b.lat().to_radians(), b.lng().to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Rectangular latitude/longitude range that non-hotspot samples are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

/// Default bounding box: New York City (approx).
const DEFAULT_LAT_MIN: f64 = 40.70;
const DEFAULT_LAT_MAX: f64 = 40.85;
const DEFAULT_LNG_MIN: f64 = -74.05;
const DEFAULT_LNG_MAX: f64 = -73.90;

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            lat_min: DEFAULT_LAT_MIN,
            lat_max: DEFAULT_LAT_MAX,
            lng_min: DEFAULT_LNG_MIN,
            lng_max: DEFAULT_LNG_MAX,
        }
    }
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        }
    }

    /// Check the ranges are finite, ordered and on the globe.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.lat_min, self.lat_max, self.lng_min, self.lng_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite
            || self.lat_min < -90.0
            || self.lat_max > 90.0
            || self.lat_min > self.lat_max
            || self.lng_min < -180.0
            || self.lng_max > 180.0
            || self.lng_min > self.lng_max
        {
            return Err(ConfigError::InvalidBounds {
                lat_min: self.lat_min,
                lat_max: self.lat_max,
                lng_min: self.lng_min,
                lng_max: self.lng_max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, location: &Location) -> bool {
        location.latitude >= self.lat_min
            && location.latitude <= self.lat_max
            && location.longitude >= self.lng_min
            && location.longitude <= self.lng_max
    }

    /// Draw latitude and longitude independently and uniformly from the ranges.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Location {
        let latitude = rng.gen_range(self.lat_min..=self.lat_max);
        let longitude = rng.gen_range(self.lng_min..=self.lng_max);
        Location::new(latitude, longitude)
    }
}
