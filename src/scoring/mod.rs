pub mod config;
pub mod dimensions;
pub mod engine;
pub mod prng;
pub mod validation;

pub use config::*;
pub use dimensions::Dimension;
pub use engine::{score, score_project, DimensionContribution, ScoreVector, SAMPLE_FALLBACK_SCORE};
pub use prng::{seed_from_id, Mulberry32};
pub use validation::validate_scoring;
