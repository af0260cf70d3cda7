//! Value types produced and consumed by the analysis pipeline

mod alert;
mod probability;
mod weather;

pub use alert::*;
pub use probability::*;
pub use weather::*;
