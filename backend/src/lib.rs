//! Weather Alert System - Backend
//!
//! Current conditions, daily forecasts with threshold alerts, and
//! forecast-based probability analysis for planned outdoor events.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use external::MeteomaticsClient;
pub use services::WeatherService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: WeatherService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = MeteomaticsClient::new(&config.meteomatics);
        Self {
            config: Arc::new(config),
            weather: WeatherService::new(client),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness probe
async fn health_check() -> &'static str {
    "OK"
}
