//! Shared types and analysis routines for the Weather Alert System
//!
//! Everything in this crate is pure: value types, the threshold tables, the
//! alert evaluator and the statistics aggregator. The backend owns all I/O.

pub mod alerts;
pub mod models;
pub mod statistics;
pub mod thresholds;
pub mod types;
pub mod validation;

pub use alerts::*;
pub use models::*;
pub use statistics::*;
pub use thresholds::*;
pub use types::*;
pub use validation::*;
