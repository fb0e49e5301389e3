use thiserror::Error;

/// Errors raised while validating or loading a [`crate::config::SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be >= 0, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("base_request_rate must be finite and within [0, {max}], got {rate}")]
    InvalidRequestRate { rate: f64, max: f64 },

    #[error("utc_offset_hours must be within (-24, 24), got {0}")]
    InvalidUtcOffset(i32),

    #[error(
        "invalid bounding box: lat [{lat_min}, {lat_max}], lng [{lng_min}, {lng_max}] \
         (must be within [-90, 90] / [-180, 180] and min <= max)"
    )]
    InvalidBounds {
        lat_min: f64,
        lat_max: f64,
        lng_min: f64,
        lng_max: f64,
    },

    #[error("hotspot table is empty")]
    NoHotspots,

    #[error("hotspot {name:?} has invalid radius {radius} (must be finite and >= 0)")]
    InvalidHotspotRadius { name: String, radius: f64 },

    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] serde_json::Error),
}
