//! Route definitions for the Weather Alert System

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/weather", get(handlers::get_current_weather))
        .route("/forecast", get(handlers::get_forecast))
        .route("/probability", get(handlers::get_weather_probability))
}
