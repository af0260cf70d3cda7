//! Alert evaluation for a single reading
//!
//! Rules are checked independently and every rule that fires is emitted, high
//! severities first. Missing measurements compare as zero.

use crate::models::{Alert, AlertSeverity, AlertType, Conditions};
use crate::thresholds::{AlertThresholds, ALERT_THRESHOLDS};

/// Evaluate a reading against the fixed alert thresholds
pub fn evaluate_alerts(conditions: &Conditions) -> Vec<Alert> {
    evaluate_alerts_with(conditions, &ALERT_THRESHOLDS)
}

/// Evaluate a reading against an explicit threshold table
pub fn evaluate_alerts_with(conditions: &Conditions, thresholds: &AlertThresholds) -> Vec<Alert> {
    let rainfall = conditions.rainfall.unwrap_or(0.0);
    let wind_speed = conditions.wind_speed.unwrap_or(0.0);
    let temperature = conditions.temperature.unwrap_or(0.0);

    let mut alerts = Vec::new();

    if rainfall > thresholds.heavy_rainfall_mm {
        alerts.push(Alert {
            alert_type: AlertType::Rainfall,
            severity: AlertSeverity::High,
            message: format!(
                "⚠️ FLOOD ALERT: Heavy rainfall detected ({rainfall:.1} mm/hr). Risk of flooding."
            ),
        });
    }

    if wind_speed > thresholds.storm_wind_ms {
        alerts.push(Alert {
            alert_type: AlertType::Wind,
            severity: AlertSeverity::High,
            message: format!(
                "⚠️ STORM ALERT: High wind speed detected ({wind_speed:.1} m/s). Dangerous conditions."
            ),
        });
    }

    if temperature > thresholds.extreme_heat_celsius {
        alerts.push(Alert {
            alert_type: AlertType::Heat,
            severity: AlertSeverity::High,
            message: format!(
                "⚠️ HEAT ALERT: Extreme temperature detected ({temperature:.1} °C). Heat wave warning."
            ),
        });
    }

    if (thresholds.moderate_rainfall_mm..=thresholds.heavy_rainfall_mm).contains(&rainfall) {
        alerts.push(Alert {
            alert_type: AlertType::Rainfall,
            severity: AlertSeverity::Moderate,
            message: format!("⚡ Moderate rainfall detected ({rainfall:.1} mm/hr). Stay alert."),
        });
    }

    if (thresholds.strong_wind_ms..=thresholds.storm_wind_ms).contains(&wind_speed) {
        alerts.push(Alert {
            alert_type: AlertType::Wind,
            severity: AlertSeverity::Moderate,
            message: format!("⚡ Strong winds detected ({wind_speed:.1} m/s). Exercise caution."),
        });
    }

    if (thresholds.high_heat_celsius..=thresholds.extreme_heat_celsius).contains(&temperature) {
        alerts.push(Alert {
            alert_type: AlertType::Heat,
            severity: AlertSeverity::Moderate,
            message: format!("⚡ High temperature detected ({temperature:.1} °C). Stay hydrated."),
        });
    }

    if alerts.is_empty() {
        alerts.push(no_alert());
    }

    alerts
}

/// Count alerts that should be surfaced to the user (high or moderate)
pub fn count_significant(alerts: &[Alert]) -> usize {
    alerts
        .iter()
        .filter(|alert| alert.severity.is_significant())
        .count()
}

/// True when the list holds at least one real (non-placeholder) alert
pub fn has_real_alert(alerts: &[Alert]) -> bool {
    alerts.iter().any(|alert| !alert.is_none())
}

fn no_alert() -> Alert {
    Alert {
        alert_type: AlertType::None,
        severity: AlertSeverity::Low,
        message: "✅ No extreme weather conditions detected. Weather is normal.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(rainfall: f64, wind_speed: f64, temperature: f64) -> Conditions {
        Conditions {
            temperature: Some(temperature),
            wind_speed: Some(wind_speed),
            rainfall: Some(rainfall),
        }
    }

    fn kinds(alerts: &[Alert]) -> Vec<(AlertType, AlertSeverity)> {
        alerts.iter().map(|a| (a.alert_type, a.severity)).collect()
    }

    #[test]
    fn test_heavy_rain_only() {
        let alerts = evaluate_alerts(&conditions(35.0, 0.0, 0.0));
        assert_eq!(kinds(&alerts), vec![(AlertType::Rainfall, AlertSeverity::High)]);
        assert!(alerts[0].message.contains("35.0 mm/hr"));
    }

    #[test]
    fn test_calm_conditions_yield_placeholder() {
        let alerts = evaluate_alerts(&conditions(0.0, 0.0, 0.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::None);
        assert_eq!(alerts[0].severity, AlertSeverity::Low);
        assert_eq!(count_significant(&alerts), 0);
        assert!(!has_real_alert(&alerts));
    }

    #[test]
    fn test_three_moderate_alerts_in_order() {
        let alerts = evaluate_alerts(&conditions(25.0, 18.0, 36.0));
        assert_eq!(
            kinds(&alerts),
            vec![
                (AlertType::Rainfall, AlertSeverity::Moderate),
                (AlertType::Wind, AlertSeverity::Moderate),
                (AlertType::Heat, AlertSeverity::Moderate),
            ]
        );
        assert_eq!(count_significant(&alerts), 3);
    }

    #[test]
    fn test_high_alerts_come_before_moderate() {
        let alerts = evaluate_alerts(&conditions(25.0, 25.0, 40.0));
        assert_eq!(
            kinds(&alerts),
            vec![
                (AlertType::Wind, AlertSeverity::High),
                (AlertType::Heat, AlertSeverity::High),
                (AlertType::Rainfall, AlertSeverity::Moderate),
            ]
        );
    }

    #[test]
    fn test_missing_fields_treated_as_zero() {
        let alerts = evaluate_alerts(&Conditions::default());
        assert_eq!(kinds(&alerts), vec![(AlertType::None, AlertSeverity::Low)]);

        let alerts = evaluate_alerts(&Conditions {
            temperature: None,
            wind_speed: Some(22.0),
            rainfall: None,
        });
        assert_eq!(kinds(&alerts), vec![(AlertType::Wind, AlertSeverity::High)]);
    }

    #[test]
    fn test_band_edges() {
        // Upper edges stay in the moderate band because high rules are strict
        assert_eq!(
            kinds(&evaluate_alerts(&conditions(30.0, 20.0, 38.0))),
            vec![
                (AlertType::Rainfall, AlertSeverity::Moderate),
                (AlertType::Wind, AlertSeverity::Moderate),
                (AlertType::Heat, AlertSeverity::Moderate),
            ]
        );
        // Lower edges are inclusive
        assert_eq!(count_significant(&evaluate_alerts(&conditions(20.0, 15.0, 35.0))), 3);
        // Just below the lower edges
        assert!(!has_real_alert(&evaluate_alerts(&conditions(19.9, 14.9, 34.9))));
    }

    #[test]
    fn test_message_uses_one_decimal() {
        let alerts = evaluate_alerts(&conditions(0.0, 0.0, 38.46));
        assert_eq!(
            alerts[0].message,
            "⚠️ HEAT ALERT: Extreme temperature detected (38.5 °C). Heat wave warning."
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = AlertThresholds {
            storm_wind_ms: 5.0,
            strong_wind_ms: 2.0,
            ..ALERT_THRESHOLDS
        };
        let alerts = evaluate_alerts_with(&conditions(0.0, 6.0, 0.0), &thresholds);
        assert_eq!(kinds(&alerts), vec![(AlertType::Wind, AlertSeverity::High)]);
    }
}
