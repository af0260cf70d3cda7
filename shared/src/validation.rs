//! Input validation for the analysis operations
//!
//! Coordinates are validated by [`crate::types::Coordinate::new`]; this module
//! covers day counts and event dates.

use chrono::NaiveDate;

/// Longest forecast the service will request
pub const MAX_FORECAST_DAYS: u32 = 14;

/// Widest analysis range a caller may ask for
pub const MAX_ANALYSIS_RANGE_DAYS: u32 = 30;

/// How far ahead an event date may lie
pub const MAX_LEAD_DAYS: i64 = 30;

/// Validate the number of forecast days (1-14)
pub fn validate_forecast_days(days: u32) -> Result<(), &'static str> {
    if !(1..=MAX_FORECAST_DAYS).contains(&days) {
        return Err("Days must be between 1 and 14");
    }
    Ok(())
}

/// Validate the analysis range around an event date (1-30)
pub fn validate_days_range(days: u32) -> Result<(), &'static str> {
    if !(1..=MAX_ANALYSIS_RANGE_DAYS).contains(&days) {
        return Err("Days must be between 1 and 30");
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` event date
pub fn parse_target_date(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "Invalid date format. Use YYYY-MM-DD")
}

/// Check an event date against today and return the number of days until it
///
/// The date must be strictly after `today` and at most 30 days ahead.
pub fn validate_target_date(target: NaiveDate, today: NaiveDate) -> Result<i64, &'static str> {
    let days_until = (target - today).num_days();
    if days_until <= 0 {
        return Err("Target date must be in the future for forecast analysis");
    }
    if days_until > MAX_LEAD_DAYS {
        return Err("Target date is too far in future. Maximum 30 days ahead.");
    }
    Ok(days_until)
}
