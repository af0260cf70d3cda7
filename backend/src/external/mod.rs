//! External API integrations

pub mod meteomatics;
pub mod normalizer;

pub use meteomatics::MeteomaticsClient;
