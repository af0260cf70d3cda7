//! Flattening of Meteomatics payloads into per-date records

use std::collections::BTreeMap;

use shared::{Coordinate, DailyForecastEntry, WeatherSnapshot};

use crate::error::{AppError, AppResult};
use crate::external::meteomatics::{CoordinateSeries, ParameterBlock, ProviderResponse};

/// Canonical field a provider parameter maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    WindSpeed,
    Rainfall,
    WeatherSymbol,
}

impl Field {
    /// Map a provider parameter identifier; unknown identifiers yield `None`
    pub fn from_parameter(parameter: &str) -> Option<Self> {
        match parameter {
            "t_2m:C" => Some(Field::Temperature),
            "wind_speed_10m:ms" => Some(Field::WindSpeed),
            "precip_1h:mm" | "precip_24h:mm" => Some(Field::Rainfall),
            "weather_symbol_1h:idx" => Some(Field::WeatherSymbol),
            _ => None,
        }
    }
}

/// Group all parameter blocks by date, sorted ascending by date string
///
/// A later value for the same date and field replaces an earlier one.
pub fn normalize_daily(payload: &ProviderResponse) -> AppResult<Vec<DailyForecastEntry>> {
    let mut by_date: BTreeMap<String, DailyForecastEntry> = BTreeMap::new();

    for block in &payload.data {
        let series = first_series(block)?;
        let field = Field::from_parameter(&block.parameter);

        for dated in &series.dates {
            let entry = by_date
                .entry(dated.date.clone())
                .or_insert_with(|| DailyForecastEntry::new(dated.date.clone()));

            match field {
                Some(Field::Temperature) => entry.temperature = dated.value,
                Some(Field::WindSpeed) => entry.wind_speed = dated.value,
                Some(Field::Rainfall) => entry.rainfall = dated.value,
                Some(Field::WeatherSymbol) => entry.weather_symbol = dated.value,
                None => {}
            }
        }
    }

    Ok(by_date.into_values().collect())
}

/// Build a snapshot from a single-timestamp payload
pub fn normalize_snapshot(
    payload: &ProviderResponse,
    location: Coordinate,
    timestamp: String,
) -> AppResult<WeatherSnapshot> {
    let mut snapshot = WeatherSnapshot {
        temperature: None,
        wind_speed: None,
        rainfall: None,
        location,
        timestamp,
    };

    for block in &payload.data {
        let Some(field) = Field::from_parameter(&block.parameter) else {
            continue;
        };
        let value = first_series(block)?
            .dates
            .first()
            .ok_or_else(|| {
                AppError::MalformedResponse(format!("No values for parameter {}", block.parameter))
            })?
            .value;

        match field {
            Field::Temperature => snapshot.temperature = value,
            Field::WindSpeed => snapshot.wind_speed = value,
            Field::Rainfall => snapshot.rainfall = value,
            Field::WeatherSymbol => {}
        }
    }

    Ok(snapshot)
}

fn first_series(block: &ParameterBlock) -> AppResult<&CoordinateSeries> {
    block.coordinates.first().ok_or_else(|| {
        AppError::MalformedResponse(format!(
            "No coordinate data for parameter {}",
            block.parameter
        ))
    })
}
