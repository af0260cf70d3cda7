//! Weather service integration tests
//!
//! Runs the service against a mock Meteomatics server that echoes back one
//! value per requested timestamp and parameter.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use shared::{AlertSeverity, AlertType, Coordinate};
use weather_alert_backend::{
    config::MeteomaticsConfig, external::meteomatics::Timeouts, AppError, MeteomaticsClient,
    WeatherService,
};
use wiremock::matchers::{header_exists, method};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Responds with constant readings for every timestamp in the request path
struct ConstantReadings {
    temperature: f64,
    wind_speed: f64,
    rainfall: f64,
}

impl Respond for ConstantReadings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request.url.path().trim_start_matches('/').split('/').collect();
        let (timestamps, parameters) = (segments[0], segments[1]);

        let data: Vec<Value> = parameters
            .split(',')
            .map(|parameter| {
                let value = match parameter {
                    "t_2m:C" => self.temperature,
                    "wind_speed_10m:ms" => self.wind_speed,
                    p if p.starts_with("precip") => self.rainfall,
                    _ => 1.0,
                };
                let dates: Vec<Value> = timestamps
                    .split(',')
                    .map(|date| json!({"date": date, "value": value}))
                    .collect();
                json!({
                    "parameter": parameter,
                    "coordinates": [{"lat": 47.37, "lon": 8.54, "dates": dates}]
                })
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "version": "3.0",
            "status": "OK",
            "data": data
        }))
    }
}

fn now() -> DateTime<Utc> {
    "2025-06-01T09:30:00Z".parse().unwrap()
}

fn zurich() -> Coordinate {
    Coordinate::new(47.37, 8.54).unwrap()
}

async fn service_with(readings: ConstantReadings) -> (MockServer, WeatherService) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(readings)
        .mount(&server)
        .await;
    let client = MeteomaticsClient::with_base_url("user", "secret", &server.uri());
    (server, WeatherService::new(client))
}

async fn service_returning(template: ResponseTemplate) -> (MockServer, WeatherService) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(template)
        .mount(&server)
        .await;
    let client = MeteomaticsClient::with_base_url("user", "secret", &server.uri());
    (server, WeatherService::new(client))
}

fn mild() -> ConstantReadings {
    ConstantReadings {
        temperature: 21.0,
        wind_speed: 3.0,
        rainfall: 0.0,
    }
}

// ============================================================================
// Current conditions
// ============================================================================

#[tokio::test]
async fn test_current_weather_heat_alert() {
    let (_server, service) = service_with(ConstantReadings {
        temperature: 40.0,
        wind_speed: 5.0,
        rainfall: 0.0,
    })
    .await;

    let report = service.get_current_weather_at(zurich(), now()).await.unwrap();

    assert_eq!(report.weather.temperature, Some(40.0));
    assert_eq!(report.weather.timestamp, "2025-06-01T09:30:00Z");
    assert_eq!(report.weather.location, zurich());
    assert_eq!(report.alert_count, 1);
    assert_eq!(report.alerts[0].alert_type, AlertType::Heat);
    assert_eq!(report.alerts[0].severity, AlertSeverity::High);
}

#[tokio::test]
async fn test_current_weather_calm_has_no_count() {
    let (_server, service) = service_with(mild()).await;

    let report = service.get_current_weather_at(zurich(), now()).await.unwrap();
    assert_eq!(report.alert_count, 0);
    assert_eq!(report.alerts.len(), 1);
    assert!(report.alerts[0].is_none());
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn test_forecast_one_entry_per_day() {
    let (_server, service) = service_with(mild()).await;

    let report = service.get_forecast_at(zurich(), 7, now()).await.unwrap();

    let dates: Vec<&str> = report.forecast.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(
        dates,
        vec![
            "2025-06-01T12:00:00Z",
            "2025-06-02T12:00:00Z",
            "2025-06-03T12:00:00Z",
            "2025-06-04T12:00:00Z",
            "2025-06-05T12:00:00Z",
            "2025-06-06T12:00:00Z",
            "2025-06-07T12:00:00Z",
        ]
    );
    assert!(report.forecast.iter().all(|d| d.weather_symbol == Some(1.0)));
    assert!(report.forecast_alerts.is_empty());
    assert_eq!(report.total_alert_days(), 0);
}

#[tokio::test]
async fn test_forecast_alert_days() {
    let (_server, service) = service_with(ConstantReadings {
        temperature: 20.0,
        wind_speed: 4.0,
        rainfall: 45.0,
    })
    .await;

    let report = service.get_forecast_at(zurich(), 3, now()).await.unwrap();

    assert_eq!(report.forecast.len(), 3);
    assert_eq!(report.total_alert_days(), 3);
    for day in &report.forecast_alerts {
        assert_eq!(day.alerts.len(), 1);
        assert_eq!(day.alerts[0].alert_type, AlertType::Rainfall);
        assert_eq!(day.alerts[0].severity, AlertSeverity::High);
    }
}

#[tokio::test]
async fn test_forecast_days_validated_before_request() {
    let (server, service) = service_with(mild()).await;

    for days in [0, 15] {
        match service.get_forecast_at(zurich(), days, now()).await {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, "days");
                assert_eq!(message, "Days must be between 1 and 14");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Probability analysis
// ============================================================================

#[tokio::test]
async fn test_probability_ten_days_out() {
    let (_server, service) = service_with(ConstantReadings {
        temperature: 36.0,
        wind_speed: 5.0,
        rainfall: 12.0,
    })
    .await;

    let analysis = service
        .get_probability_analysis_at(zurich(), "2025-06-11", 7, now())
        .await
        .unwrap();

    assert_eq!(analysis.days_until_event, 10);
    assert_eq!(analysis.analysis_type, "forecast");
    assert_eq!(analysis.days_analyzed, 7);
    assert_eq!(analysis.forecast_range.len(), 7);
    assert_eq!(analysis.forecast_range[0].date, "2025-06-08T12:00:00Z");
    assert_eq!(analysis.forecast_range[6].date, "2025-06-14T12:00:00Z");

    assert_eq!(analysis.temperature.mean, Some(36.0));
    assert_eq!(analysis.temperature.std_dev, Some(0.0));
    assert_eq!(analysis.temperature.probability("very_hot"), Some(100.0));
    assert_eq!(analysis.temperature.probability("comfortable"), Some(0.0));
    assert_eq!(analysis.wind_speed.probability("calm"), Some(100.0));
    assert_eq!(analysis.rainfall.probability("very_wet"), Some(100.0));
}

#[tokio::test]
async fn test_probability_tomorrow_single_day() {
    let (_server, service) = service_with(mild()).await;

    let analysis = service
        .get_probability_analysis_at(zurich(), "2025-06-02", 7, now())
        .await
        .unwrap();

    assert_eq!(analysis.days_until_event, 1);
    assert_eq!(analysis.days_analyzed, 1);
    assert_eq!(analysis.temperature.historical_values, vec![21.0]);
}

#[tokio::test]
async fn test_probability_rejects_today_and_far_dates() {
    let (server, service) = service_with(mild()).await;

    let cases = [
        ("2025-06-01", "Target date must be in the future for forecast analysis"),
        ("2025-05-20", "Target date must be in the future for forecast analysis"),
        ("2025-07-02", "Target date is too far in future. Maximum 30 days ahead."),
        ("06/11/2025", "Invalid date format. Use YYYY-MM-DD"),
    ];
    for (date, expected) in cases {
        match service
            .get_probability_analysis_at(zurich(), date, 7, now())
            .await
        {
            Err(AppError::Validation { field, message }) => {
                assert_eq!(field, "date");
                assert_eq!(message, expected);
            }
            other => panic!("unexpected result for {}: {:?}", date, other),
        }
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_probability_thirty_days_out_allowed() {
    let (_server, service) = service_with(mild()).await;

    let analysis = service
        .get_probability_analysis_at(zurich(), "2025-07-01", 7, now())
        .await
        .unwrap();

    assert_eq!(analysis.days_until_event, 30);
    assert_eq!(analysis.forecast_range.len(), 4);
    assert_eq!(analysis.forecast_range[3].date, "2025-07-01T12:00:00Z");
}

#[tokio::test]
async fn test_probability_range_validated() {
    let (_server, service) = service_with(mild()).await;

    let result = service
        .get_probability_analysis_at(zurich(), "2025-06-11", 31, now())
        .await;
    assert!(matches!(
        result,
        Err(AppError::Validation { ref field, .. }) if field == "days"
    ));
}

// ============================================================================
// Provider failures
// ============================================================================

#[tokio::test]
async fn test_upstream_error_status() {
    let (_server, service) =
        service_returning(ResponseTemplate::new(500).set_body_string("boom")).await;

    let result = service.get_current_weather_at(zurich(), now()).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));
}

#[tokio::test]
async fn test_unauthorized_is_upstream() {
    let (_server, service) =
        service_returning(ResponseTemplate::new(401).set_body_string("unauthorized")).await;

    let result = service.get_forecast_at(zurich(), 3, now()).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let (_server, service) =
        service_returning(ResponseTemplate::new(200).set_body_string("not json")).await;

    let result = service.get_forecast_at(zurich(), 3, now()).await;
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_missing_data_is_malformed() {
    let (_server, service) =
        service_returning(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"}))).await;

    let result = service
        .get_probability_analysis_at(zurich(), "2025-06-11", 7, now())
        .await;
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

/// Provider that answers only after `delay`, with a client giving up after `timeout`
async fn slow_provider(delay: Duration, timeout: Duration) -> (MockServer, WeatherService) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(delay),
        )
        .mount(&server)
        .await;
    let client = MeteomaticsClient::with_base_url("user", "secret", &server.uri()).with_timeouts(
        Timeouts {
            instant: timeout,
            forecast: timeout,
            analysis: timeout,
        },
    );
    (server, WeatherService::new(client))
}

#[tokio::test]
async fn test_timeout_is_upstream() {
    let (_server, service) =
        slow_provider(Duration::from_secs(2), Duration::from_millis(100)).await;

    let result = service.get_current_weather_at(zurich(), now()).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));

    let result = service.get_forecast_at(zurich(), 3, now()).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));

    let result = service
        .get_probability_analysis_at(zurich(), "2025-06-11", 7, now())
        .await;
    assert!(matches!(result, Err(AppError::Upstream(_))));
}

#[tokio::test]
async fn test_slow_response_within_timeout_succeeds() {
    let (_server, service) =
        slow_provider(Duration::from_millis(50), Duration::from_secs(5)).await;

    let report = service.get_forecast_at(zurich(), 3, now()).await.unwrap();
    assert!(report.forecast.is_empty());
}

#[tokio::test]
async fn test_missing_credentials() {
    let server = MockServer::start().await;
    let client = MeteomaticsClient::new(&MeteomaticsConfig {
        base_url: server.uri(),
        username: None,
        password: None,
    });
    let service = WeatherService::new(client);

    let result = service.get_current_weather_at(zurich(), now()).await;
    assert!(matches!(result, Err(AppError::Configuration(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
