//! Business logic services for the Weather Alert System

pub mod weather;

pub use weather::WeatherService;
