//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use shared::{
    Alert, Coordinate, CurrentWeatherReport, DailyForecastEntry, DayAlerts, ForecastReport,
    ProbabilityAnalysis, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};
use crate::AppState;

fn default_days() -> u32 {
    7
}

/// Query parameters for current conditions
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Query parameters for the daily forecast
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_days")]
    pub days: u32,
}

/// Query parameters for event probability analysis
#[derive(Debug, Deserialize)]
pub struct ProbabilityQuery {
    pub lat: f64,
    pub lon: f64,
    pub date: String,
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub success: bool,
    pub weather: WeatherSnapshot,
    pub alerts: Vec<Alert>,
    pub alert_count: usize,
}

impl From<CurrentWeatherReport> for CurrentWeatherResponse {
    fn from(report: CurrentWeatherReport) -> Self {
        Self {
            success: true,
            weather: report.weather,
            alerts: report.alerts,
            alert_count: report.alert_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ForecastBody {
    pub location: Coordinate,
    pub forecast: Vec<DailyForecastEntry>,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub success: bool,
    pub forecast: ForecastBody,
    pub forecast_alerts: Vec<DayAlerts>,
    pub total_alert_days: usize,
}

impl From<ForecastReport> for ForecastResponse {
    fn from(report: ForecastReport) -> Self {
        let total_alert_days = report.total_alert_days();
        Self {
            success: true,
            forecast: ForecastBody {
                location: report.location,
                forecast: report.forecast,
            },
            forecast_alerts: report.forecast_alerts,
            total_alert_days,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProbabilityResponse {
    pub success: bool,
    pub data: ProbabilityAnalysis,
}

/// Current conditions with alerts
pub async fn get_current_weather(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LocationQuery>, AppError>,
) -> AppResult<Json<CurrentWeatherResponse>> {
    let coordinate = Coordinate::new(query.lat, query.lon)?;
    let report = state.weather.get_current_weather(coordinate).await?;
    Ok(Json(report.into()))
}

/// Daily forecast with per-day alerts
pub async fn get_forecast(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ForecastQuery>, AppError>,
) -> AppResult<Json<ForecastResponse>> {
    let coordinate = Coordinate::new(query.lat, query.lon)?;
    let report = state.weather.get_forecast(coordinate, query.days).await?;
    Ok(Json(report.into()))
}

/// Forecast probability analysis for event planning (up to 30 days ahead)
pub async fn get_weather_probability(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ProbabilityQuery>, AppError>,
) -> AppResult<Json<ProbabilityResponse>> {
    let coordinate = Coordinate::new(query.lat, query.lon)?;
    let data = state
        .weather
        .get_probability_analysis(coordinate, &query.date, query.days)
        .await?;
    Ok(Json(ProbabilityResponse {
        success: true,
        data,
    }))
}
