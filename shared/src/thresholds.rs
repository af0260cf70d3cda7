//! Fixed threshold tables
//!
//! Two independent tables exist: one classifies forecast samples for the
//! probability report, the other decides snapshot alerts. They share some
//! numbers but are not interchangeable.

/// Thresholds used to classify samples in a probability report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityThresholds {
    /// Samples at or above this temperature count as very hot (°C)
    pub very_hot_celsius: f64,
    /// Samples at or below this temperature count as very cold (°C)
    pub very_cold_celsius: f64,
    /// Samples at or above this wind speed count as very windy (m/s)
    pub very_windy_ms: f64,
    /// Samples at or above this daily rainfall count as very wet (mm/day)
    pub very_wet_mm: f64,
}

pub const PROBABILITY_THRESHOLDS: ProbabilityThresholds = ProbabilityThresholds {
    very_hot_celsius: 35.0,
    very_cold_celsius: 0.0,
    very_windy_ms: 15.0,
    very_wet_mm: 10.0,
};

/// Severity bands used by the alert evaluator
///
/// High bands fire strictly above their limit; moderate bands are inclusive
/// on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    /// Rainfall above this is a flood alert (mm/hr)
    pub heavy_rainfall_mm: f64,
    /// Lower bound of the moderate rainfall band (mm/hr)
    pub moderate_rainfall_mm: f64,
    /// Wind above this is a storm alert (m/s)
    pub storm_wind_ms: f64,
    /// Lower bound of the moderate wind band (m/s)
    pub strong_wind_ms: f64,
    /// Temperature above this is a heat wave alert (°C)
    pub extreme_heat_celsius: f64,
    /// Lower bound of the moderate heat band (°C)
    pub high_heat_celsius: f64,
}

pub const ALERT_THRESHOLDS: AlertThresholds = AlertThresholds {
    heavy_rainfall_mm: 30.0,
    moderate_rainfall_mm: 20.0,
    storm_wind_ms: 20.0,
    strong_wind_ms: 15.0,
    extreme_heat_celsius: 38.0,
    high_heat_celsius: 35.0,
};
