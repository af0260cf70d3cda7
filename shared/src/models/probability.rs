//! Probability analysis models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DailyForecastEntry;
use crate::types::Coordinate;

/// Weather dimension a sample sequence belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Temperature,
    Wind,
    Rainfall,
}

/// Descriptive statistics and threshold-crossing percentages for one dimension
///
/// All statistics are `None` when no samples were available.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProbabilityReport {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std_dev: Option<f64>,
    /// Named condition to percentage (0-100)
    pub probabilities: BTreeMap<String, f64>,
    /// The raw samples, in the order they were supplied
    pub historical_values: Vec<f64>,
}

impl ProbabilityReport {
    pub fn probability(&self, condition: &str) -> Option<f64> {
        self.probabilities.get(condition).copied()
    }
}

/// Result of the forward-looking probability operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityAnalysis {
    pub location: Coordinate,
    pub target_date: NaiveDate,
    pub days_analyzed: usize,
    pub analysis_type: String,
    pub days_until_event: i64,
    pub forecast_range: Vec<DailyForecastEntry>,
    pub temperature: ProbabilityReport,
    pub wind_speed: ProbabilityReport,
    pub rainfall: ProbabilityReport,
}
