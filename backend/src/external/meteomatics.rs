//! Meteomatics API client
//!
//! One GET per call: `{base}/{timestamps}/{parameters}/{lat},{lon}/json`, where
//! a range of days is sent as a single comma-joined timestamp list.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::Coordinate;

use crate::config::MeteomaticsConfig;
use crate::error::{AppError, AppResult};

/// Parameters requested for a current-conditions snapshot
pub const INSTANT_PARAMETERS: &[&str] = &["t_2m:C", "wind_speed_10m:ms", "precip_1h:mm"];

/// Parameters requested for daily samples
pub const DAILY_PARAMETERS: &[&str] = &[
    "t_2m:C",
    "wind_speed_10m:ms",
    "precip_24h:mm",
    "weather_symbol_1h:idx",
];

pub const INSTANT_TIMEOUT: Duration = Duration::from_secs(10);
pub const FORECAST_TIMEOUT: Duration = Duration::from_secs(15);
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(20);

/// Per-call request timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub instant: Duration,
    pub forecast: Duration,
    pub analysis: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            instant: INSTANT_TIMEOUT,
            forecast: FORECAST_TIMEOUT,
            analysis: ANALYSIS_TIMEOUT,
        }
    }
}

/// Purpose of a multi-day request; selects its timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Forecast,
    Analysis,
}

/// Raw provider payload: one block per requested parameter
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderResponse {
    pub data: Vec<ParameterBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterBlock {
    pub parameter: String,
    pub coordinates: Vec<CoordinateSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoordinateSeries {
    pub dates: Vec<DatedValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatedValue {
    pub date: String,
    pub value: Option<f64>,
}

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

/// Meteomatics API client
#[derive(Clone)]
pub struct MeteomaticsClient {
    client: Client,
    credentials: Option<Credentials>,
    base_url: String,
    timeouts: Timeouts,
}

impl std::fmt::Debug for MeteomaticsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeteomaticsClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl MeteomaticsClient {
    /// Create a client from configuration; credentials may be absent
    pub fn new(config: &MeteomaticsConfig) -> Self {
        Self {
            client: Client::new(),
            credentials: config
                .credentials()
                .map(|(username, password)| Credentials { username, password }),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeouts: Timeouts::default(),
        }
    }

    /// Replace the default request timeouts
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(username: &str, password: &str, base_url: &str) -> Self {
        Self::new(&MeteomaticsConfig {
            base_url: base_url.to_string(),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Fetch a single-timestamp reading
    pub async fn fetch_instant(
        &self,
        coordinate: &Coordinate,
        at: DateTime<Utc>,
    ) -> AppResult<ProviderResponse> {
        self.fetch(coordinate, &[at], INSTANT_PARAMETERS, self.timeouts.instant)
            .await
    }

    /// Fetch daily samples for several timestamps in one request
    pub async fn fetch_range(
        &self,
        coordinate: &Coordinate,
        timestamps: &[DateTime<Utc>],
        kind: RangeKind,
    ) -> AppResult<ProviderResponse> {
        if timestamps.is_empty() {
            return Err(AppError::Internal(
                "Range request needs at least one timestamp".to_string(),
            ));
        }
        let timeout = match kind {
            RangeKind::Forecast => self.timeouts.forecast,
            RangeKind::Analysis => self.timeouts.analysis,
        };
        self.fetch(coordinate, timestamps, DAILY_PARAMETERS, timeout)
            .await
    }

    async fn fetch(
        &self,
        coordinate: &Coordinate,
        timestamps: &[DateTime<Utc>],
        parameters: &[&str],
        timeout: Duration,
    ) -> AppResult<ProviderResponse> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            AppError::Configuration("Meteomatics API credentials not configured".to_string())
        })?;

        let url = self.build_url(coordinate, timestamps, parameters);
        tracing::debug!(
            timestamps = timestamps.len(),
            parameters = %parameters.join(","),
            "Requesting weather data from Meteomatics"
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!("Meteomatics request timed out after {:?}", timeout);
                }
                AppError::Upstream(format!("Weather API request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read weather response: {}", e)))?;

        let payload: ProviderResponse = serde_json::from_slice(&body).map_err(|e| {
            AppError::MalformedResponse(format!("Failed to parse weather response: {}", e))
        })?;

        tracing::debug!(blocks = payload.data.len(), "Received weather data");
        Ok(payload)
    }

    fn build_url(
        &self,
        coordinate: &Coordinate,
        timestamps: &[DateTime<Utc>],
        parameters: &[&str],
    ) -> String {
        let timestamps = timestamps
            .iter()
            .map(format_timestamp)
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}/{}/{}/{}/json",
            self.base_url,
            timestamps,
            parameters.join(","),
            coordinate.to_query_segment()
        )
    }
}

/// ISO-8601 UTC with a trailing `Z`, second precision
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 12:00 UTC on the given day, the sample time representing a whole day
pub fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .unwrap_or_default()
        .and_utc()
}
