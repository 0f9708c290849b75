pub mod client;
pub mod config;
pub mod types;

pub use client::{EstimateError, EstimatorClient};
pub use config::{validate_estimator, EstimatorConfig};
pub use types::{EstimatePhases, EstimateRequest, SimulatorEstimate};
