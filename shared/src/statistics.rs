//! Descriptive statistics and threshold-crossing probabilities
//!
//! Statistics are rounded to two decimal places and percentages to one. The
//! temperature triple is derived as `comfortable = 100 - very_hot - very_cold`;
//! a single sample can never be both >= 35 and <= 0, so the triple sums to 100
//! without clamping.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Dimension, ProbabilityReport};
use crate::thresholds::{ProbabilityThresholds, PROBABILITY_THRESHOLDS};

/// Summarize a sample sequence for one dimension
pub fn summarize(samples: &[f64], dimension: Dimension) -> ProbabilityReport {
    summarize_with(samples, dimension, &PROBABILITY_THRESHOLDS)
}

/// Summarize against an explicit threshold table
pub fn summarize_with(
    samples: &[f64],
    dimension: Dimension,
    thresholds: &ProbabilityThresholds,
) -> ProbabilityReport {
    if samples.is_empty() {
        return ProbabilityReport::default();
    }

    let probabilities = probabilities(samples, dimension, thresholds)
        .into_iter()
        .map(|(condition, percent)| (condition.to_string(), round_to(percent, 1)))
        .collect();

    ProbabilityReport {
        mean: Some(round_to(mean(samples), 2)),
        median: Some(round_to(median(samples), 2)),
        min: Some(round_to(samples.iter().copied().fold(f64::INFINITY, f64::min), 2)),
        max: Some(round_to(samples.iter().copied().fold(f64::NEG_INFINITY, f64::max), 2)),
        std_dev: Some(round_to(sample_std_dev(samples), 2)),
        probabilities,
        historical_values: samples.to_vec(),
    }
}

fn probabilities(
    samples: &[f64],
    dimension: Dimension,
    thresholds: &ProbabilityThresholds,
) -> BTreeMap<&'static str, f64> {
    let mut probabilities = BTreeMap::new();

    match dimension {
        Dimension::Temperature => {
            let very_hot = percent_where(samples, |v| v >= thresholds.very_hot_celsius);
            let very_cold = percent_where(samples, |v| v <= thresholds.very_cold_celsius);
            probabilities.insert("very_hot", very_hot);
            probabilities.insert("very_cold", very_cold);
            probabilities.insert("comfortable", 100.0 - very_hot - very_cold);
        }
        Dimension::Wind => {
            let very_windy = percent_where(samples, |v| v >= thresholds.very_windy_ms);
            probabilities.insert("very_windy", very_windy);
            probabilities.insert("calm", 100.0 - very_windy);
        }
        Dimension::Rainfall => {
            let very_wet = percent_where(samples, |v| v >= thresholds.very_wet_mm);
            probabilities.insert("very_wet", very_wet);
            probabilities.insert("dry", 100.0 - very_wet);
        }
    }

    probabilities
}

fn percent_where(samples: &[f64], predicate: impl Fn(f64) -> bool) -> f64 {
    let hits = samples.iter().filter(|&&v| predicate(v)).count();
    hits as f64 / samples.len() as f64 * 100.0
}

/// Arithmetic mean; callers guarantee a non-empty slice
fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Bessel-corrected standard deviation, defined as 0 for a single sample
fn sample_std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mean = mean(samples);
    let sum_sq: f64 = samples.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

/// Round the exact binary value of `value` to `places` decimal places,
/// resolving exact midpoints to the even neighbour
pub fn round_to(value: f64, places: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
