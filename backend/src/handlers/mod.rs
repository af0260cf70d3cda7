//! HTTP handlers for the Weather Alert System API

pub mod health;
pub mod weather;

pub use health::*;
pub use weather::*;
