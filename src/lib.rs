pub mod config;
pub mod cost;
pub mod estimate;
pub mod output;
pub mod project;
pub mod report;
pub mod scoring;
