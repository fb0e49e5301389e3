//! Spatial hotspot model: named demand regions grouped by category.
//!
//! The model answers two questions:
//!
//! - **Where**: [`SpatialHotspotModel::sample_location`] draws a point, biased
//!   towards hotspots or uniform over the city bounding box.
//! - **How much**: [`SpatialHotspotModel::demand_factor`] scores a location at an
//!   hour of day by summing the contributions of every hotspot in range.
//!
//! The hotspot table is fixed once the model is built.

use std::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geo::{BoundingBox, Location, KM_PER_DEGREE};

/// Lowest value [`SpatialHotspotModel::demand_factor`] ever returns.
pub const MIN_DEMAND_FACTOR: f64 = 0.1;

/// Baseline demand before any hotspot contributes.
pub const BASE_DEMAND_FACTOR: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotCategory {
    Business,
    Residential,
    Entertainment,
    Airport,
}

impl HotspotCategory {
    pub const ALL: [HotspotCategory; 4] = [
        HotspotCategory::Business,
        HotspotCategory::Residential,
        HotspotCategory::Entertainment,
        HotspotCategory::Airport,
    ];

    /// Demand added by one hotspot of this category at `hour` (0-23).
    pub fn demand_increment(self, hour: u32) -> f64 {
        match self {
            HotspotCategory::Business => match hour {
                7..=9 => 2.0,    // morning rush
                16..=18 => 2.5,  // evening rush
                12..=13 => 1.5,  // lunch
                0..=4 | 22..=23 => 0.2,
                _ => 0.0,
            },
            HotspotCategory::Residential => match hour {
                6..=8 => 1.8,
                17..=19 => 1.2,
                _ => 0.0,
            },
            HotspotCategory::Entertainment => match hour {
                18..=21 => 2.0,
                0..=2 | 22..=23 => 3.0,
                _ => 0.0,
            },
            HotspotCategory::Airport => {
                let peak = matches!(hour, 7..=9 | 16..=19);
                if peak {
                    1.5
                } else {
                    1.0
                }
            }
        }
    }
}

/// A circular region of elevated activity. `radius` is in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub category: HotspotCategory,
    pub center: Location,
    pub radius: f64,
    pub name: String,
}

impl Hotspot {
    pub fn new(
        category: HotspotCategory,
        center: impl Into<Location>,
        radius: f64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            category,
            center: center.into(),
            radius,
            name: name.into(),
        }
    }

    /// Whether `location` is within the hotspot's radius, measured along the
    /// great circle with the degree-to-km approximation.
    pub fn covers(&self, location: &Location) -> bool {
        location.distance_km(&self.center) <= self.radius * KM_PER_DEGREE
    }

    /// Draw a point around the centre: uniform angle, uniform radial offset.
    ///
    /// The radial offset is uniform, not square-root transformed, so density
    /// is higher near the centre than at the rim.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Location {
        let angle = rng.gen_range(0.0..TAU);
        let offset = rng.gen_range(0.0..=self.radius);
        Location::new(
            self.center.latitude + offset * angle.cos(),
            self.center.longitude + offset * angle.sin(),
        )
    }
}

/// New York City hotspots used when no custom table is supplied.
pub fn nyc_hotspots() -> Vec<Hotspot> {
    use HotspotCategory::*;
    vec![
        Hotspot::new(Business, (40.75, -73.98), 0.02, "Midtown"),
        Hotspot::new(Business, (40.71, -74.01), 0.015, "Financial District"),
        Hotspot::new(Residential, (40.78, -73.95), 0.025, "Upper East Side"),
        Hotspot::new(Residential, (40.73, -73.99), 0.02, "Greenwich Village"),
        Hotspot::new(Residential, (40.80, -73.96), 0.025, "Upper West Side"),
        Hotspot::new(Entertainment, (40.76, -73.98), 0.015, "Times Square"),
        Hotspot::new(Entertainment, (40.74, -73.99), 0.015, "Chelsea"),
        Hotspot::new(Airport, (40.64, -73.78), 0.03, "JFK Airport"),
        Hotspot::new(Airport, (40.77, -73.87), 0.02, "LaGuardia Airport"),
    ]
}

#[derive(Debug, Clone)]
pub struct SpatialHotspotModel {
    bounds: BoundingBox,
    hotspots: Vec<Hotspot>,
    /// Indices into `hotspots`, one entry per category that has at least one hotspot.
    by_category: Vec<(HotspotCategory, Vec<usize>)>,
}

impl SpatialHotspotModel {
    pub fn new(bounds: BoundingBox, hotspots: Vec<Hotspot>) -> Result<Self, ConfigError> {
        bounds.validate()?;
        if hotspots.is_empty() {
            return Err(ConfigError::NoHotspots);
        }
        if let Some(bad) = hotspots
            .iter()
            .find(|h| !h.radius.is_finite() || h.radius < 0.0)
        {
            return Err(ConfigError::InvalidHotspotRadius {
                name: bad.name.clone(),
                radius: bad.radius,
            });
        }

        let by_category = index_categories(&hotspots);
        Ok(Self {
            bounds,
            hotspots,
            by_category,
        })
    }

    /// Model over the default NYC bounding box and hotspot table.
    pub fn nyc() -> Self {
        let hotspots = nyc_hotspots();
        Self {
            bounds: BoundingBox::default(),
            by_category: index_categories(&hotspots),
            hotspots,
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Categories that have at least one hotspot, in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = HotspotCategory> + '_ {
        self.by_category.iter().map(|(category, _)| *category)
    }

    /// Sample a location. With probability `hotspot_bias` pick a category
    /// uniformly, then a hotspot within it uniformly, then a point inside it;
    /// otherwise draw uniformly from the bounding box.
    pub fn sample_location<R: Rng + ?Sized>(&self, rng: &mut R, hotspot_bias: f64) -> Location {
        if rng.gen::<f64>() < hotspot_bias {
            if let Some(hotspot) = self.choose_hotspot(rng) {
                return hotspot.sample_point(rng);
            }
        }
        self.bounds.sample(rng)
    }

    fn choose_hotspot<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Hotspot> {
        let (_, members) = self.by_category.choose(rng)?;
        let idx = members.choose(rng)?;
        self.hotspots.get(*idx)
    }

    /// Relative request intensity at `location` during `hour` (taken modulo 24).
    ///
    /// Starts at 1.0 and adds the category increment of every hotspot whose
    /// radius covers the location; overlapping hotspots accumulate. Never
    /// returns less than [`MIN_DEMAND_FACTOR`].
    pub fn demand_factor(&self, location: &Location, hour: u32) -> f64 {
        let hour = hour % 24;
        let factor = self
            .hotspots
            .iter()
            .filter(|hotspot| hotspot.covers(location))
            .fold(BASE_DEMAND_FACTOR, |acc, hotspot| {
                acc + hotspot.category.demand_increment(hour)
            });
        factor.max(MIN_DEMAND_FACTOR)
    }
}

fn index_categories(hotspots: &[Hotspot]) -> Vec<(HotspotCategory, Vec<usize>)> {
    HotspotCategory::ALL
        .iter()
        .filter_map(|&category| {
            let members: Vec<usize> = hotspots
                .iter()
                .enumerate()
                .filter(|(_, h)| h.category == category)
                .map(|(i, _)| i)
                .collect();
            (!members.is_empty()).then_some((category, members))
        })
        .collect()
}

impl Default for SpatialHotspotModel {
    fn default() -> Self {
        Self::nyc()
    }
}
