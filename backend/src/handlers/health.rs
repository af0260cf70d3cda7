//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub provider_configured: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Weather Alert System API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider_configured: state.config.meteomatics.credentials().is_some(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint".to_string())
}
