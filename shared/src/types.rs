//! Common types used across the service

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[serde(rename = "lon")]
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !latitude.is_finite() {
            errors.add("latitude", not_finite("Latitude must be a finite number"));
        }
        if !longitude.is_finite() {
            errors.add("longitude", not_finite("Longitude must be a finite number"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// `lat,lon` as used in provider URLs
    pub fn to_query_segment(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

fn not_finite(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("finite");
    error.message = Some(Cow::Borrowed(message));
    error
}
