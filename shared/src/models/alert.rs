//! Alert models

use serde::{Deserialize, Serialize};

/// What kind of hazard an alert reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Rainfall,
    Wind,
    Heat,
    /// Placeholder emitted when nothing crossed a threshold
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Moderate,
    High,
}

impl AlertSeverity {
    /// High and moderate alerts count towards `alert_count`
    pub fn is_significant(self) -> bool {
        matches!(self, AlertSeverity::High | AlertSeverity::Moderate)
    }
}

/// A single alert raised for one reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
}

impl Alert {
    pub fn is_none(&self) -> bool {
        self.alert_type == AlertType::None
    }
}

/// Alerts raised for one forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayAlerts {
    pub date: String,
    pub alerts: Vec<Alert>,
}
