//! Weather data models

use serde::{Deserialize, Serialize};

use crate::models::{Alert, DayAlerts};
use crate::types::Coordinate;

/// A single-timestamp reading for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// °C
    pub temperature: Option<f64>,
    /// m/s
    pub wind_speed: Option<f64>,
    /// mm over the last hour
    pub rainfall: Option<f64>,
    pub location: Coordinate,
    /// ISO-8601 UTC timestamp the reading was requested for
    pub timestamp: String,
}

/// One day of a forecast window, flattened from the provider payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyForecastEntry {
    pub date: String,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    /// mm over the preceding 24 hours
    pub rainfall: Option<f64>,
    pub weather_symbol: Option<f64>,
}

impl DailyForecastEntry {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }
}

/// The three measurements the alert evaluator looks at
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Conditions {
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub rainfall: Option<f64>,
}

impl From<&WeatherSnapshot> for Conditions {
    fn from(snapshot: &WeatherSnapshot) -> Self {
        Self {
            temperature: snapshot.temperature,
            wind_speed: snapshot.wind_speed,
            rainfall: snapshot.rainfall,
        }
    }
}

impl From<&DailyForecastEntry> for Conditions {
    fn from(entry: &DailyForecastEntry) -> Self {
        Self {
            temperature: entry.temperature,
            wind_speed: entry.wind_speed,
            rainfall: entry.rainfall,
        }
    }
}

/// Result of the current-conditions operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherReport {
    pub weather: WeatherSnapshot,
    pub alerts: Vec<Alert>,
    /// Number of high or moderate alerts
    pub alert_count: usize,
}

/// Result of the multi-day forecast operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub location: Coordinate,
    pub forecast: Vec<DailyForecastEntry>,
    /// Only days that raised at least one real alert
    pub forecast_alerts: Vec<DayAlerts>,
}

impl ForecastReport {
    pub fn total_alert_days(&self) -> usize {
        self.forecast_alerts.len()
    }
}
