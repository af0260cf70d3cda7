//! Weather analysis service
//!
//! Orchestrates provider calls, normalization, alert evaluation and the
//! probability analysis. Every operation performs at most one provider call
//! and keeps no state between calls.

use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use shared::{
    count_significant, evaluate_alerts, has_real_alert, parse_target_date, summarize,
    validate_days_range, validate_forecast_days, validate_target_date, Conditions, Coordinate,
    CurrentWeatherReport, DayAlerts, Dimension, ForecastReport, ProbabilityAnalysis,
    MAX_LEAD_DAYS,
};

use crate::error::{AppError, AppResult};
use crate::external::meteomatics::{format_timestamp, noon_utc, MeteomaticsClient, RangeKind};
use crate::external::normalizer::{normalize_daily, normalize_snapshot};

/// Widest window (in days) analysed around an event date
pub const MAX_WINDOW_DAYS: i64 = 7;

/// Weather service for current conditions, forecasts and event analysis
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: MeteomaticsClient,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(client: MeteomaticsClient) -> Self {
        Self { client }
    }

    /// Current conditions and alerts for a location
    pub async fn get_current_weather(
        &self,
        coordinate: Coordinate,
    ) -> AppResult<CurrentWeatherReport> {
        self.get_current_weather_at(coordinate, Utc::now()).await
    }

    pub async fn get_current_weather_at(
        &self,
        coordinate: Coordinate,
        now: DateTime<Utc>,
    ) -> AppResult<CurrentWeatherReport> {
        let payload = self.client.fetch_instant(&coordinate, now).await?;
        let snapshot = normalize_snapshot(&payload, coordinate, format_timestamp(&now))?;

        let alerts = evaluate_alerts(&Conditions::from(&snapshot));
        let alert_count = count_significant(&alerts);

        tracing::info!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            alert_count,
            "Evaluated current weather"
        );

        Ok(CurrentWeatherReport {
            weather: snapshot,
            alerts,
            alert_count,
        })
    }

    /// Daily forecast for `days` consecutive days starting today
    pub async fn get_forecast(
        &self,
        coordinate: Coordinate,
        days: u32,
    ) -> AppResult<ForecastReport> {
        self.get_forecast_at(coordinate, days, Utc::now()).await
    }

    pub async fn get_forecast_at(
        &self,
        coordinate: Coordinate,
        days: u32,
        now: DateTime<Utc>,
    ) -> AppResult<ForecastReport> {
        validate_forecast_days(days).map_err(|msg| AppError::validation("days", msg))?;

        let today = now.date_naive();
        let timestamps = daily_timestamps(today, 0..=i64::from(days) - 1);

        let payload = self
            .client
            .fetch_range(&coordinate, &timestamps, RangeKind::Forecast)
            .await?;
        let forecast = normalize_daily(&payload)?;

        let forecast_alerts: Vec<DayAlerts> = forecast
            .iter()
            .filter_map(|day| {
                let alerts = evaluate_alerts(&Conditions::from(day));
                has_real_alert(&alerts).then(|| DayAlerts {
                    date: day.date.clone(),
                    alerts,
                })
            })
            .collect();

        tracing::info!(
            days,
            entries = forecast.len(),
            alert_days = forecast_alerts.len(),
            "Built forecast"
        );

        Ok(ForecastReport {
            location: coordinate,
            forecast,
            forecast_alerts,
        })
    }

    /// Statistics and threshold probabilities around an event date
    pub async fn get_probability_analysis(
        &self,
        coordinate: Coordinate,
        target_date: &str,
        days_range: u32,
    ) -> AppResult<ProbabilityAnalysis> {
        self.get_probability_analysis_at(coordinate, target_date, days_range, Utc::now())
            .await
    }

    pub async fn get_probability_analysis_at(
        &self,
        coordinate: Coordinate,
        target_date: &str,
        days_range: u32,
        now: DateTime<Utc>,
    ) -> AppResult<ProbabilityAnalysis> {
        validate_days_range(days_range).map_err(|msg| AppError::validation("days", msg))?;
        let target = parse_target_date(target_date).map_err(|msg| AppError::validation("date", msg))?;

        let today = now.date_naive();
        let days_until =
            validate_target_date(target, today).map_err(|msg| AppError::validation("date", msg))?;

        let window = analysis_window(days_until, days_range);
        tracing::debug!(
            days_until,
            start = window.start(),
            end = window.end(),
            "Analysis window"
        );
        let timestamps = daily_timestamps(today, window);

        let payload = self
            .client
            .fetch_range(&coordinate, &timestamps, RangeKind::Analysis)
            .await?;
        let forecast_range = normalize_daily(&payload)?;

        let temperatures: Vec<f64> = forecast_range.iter().filter_map(|d| d.temperature).collect();
        let winds: Vec<f64> = forecast_range.iter().filter_map(|d| d.wind_speed).collect();
        let rainfall: Vec<f64> = forecast_range.iter().filter_map(|d| d.rainfall).collect();

        tracing::info!(
            event_date = %target,
            days_analyzed = forecast_range.len(),
            "Computed probability analysis"
        );

        Ok(ProbabilityAnalysis {
            location: coordinate,
            target_date: target,
            days_analyzed: forecast_range.len(),
            analysis_type: "forecast".to_string(),
            days_until_event: days_until,
            temperature: summarize(&temperatures, Dimension::Temperature),
            wind_speed: summarize(&winds, Dimension::Wind),
            rainfall: summarize(&rainfall, Dimension::Rainfall),
            forecast_range,
        })
    }
}

/// Day offsets (from today) analysed for an event `days_until` days ahead
///
/// The window is centred on the event with half-width
/// `min(days_range, days_until, 7) / 2` and clamped to offsets `0..=30`.
pub fn analysis_window(days_until: i64, days_range: u32) -> RangeInclusive<i64> {
    let half_width = i64::from(days_range).min(days_until).min(MAX_WINDOW_DAYS) / 2;
    let start = (days_until - half_width).max(0);
    let end = (days_until + half_width).min(MAX_LEAD_DAYS);
    start..=end
}

fn daily_timestamps(today: NaiveDate, offsets: RangeInclusive<i64>) -> Vec<DateTime<Utc>> {
    offsets
        .map(|offset| noon_utc(today + Duration::days(offset)))
        .collect()
}
