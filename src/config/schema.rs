use crate::cost::CostConfig;
use crate::estimate::EstimatorConfig;
use crate::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project store JSON file (defaults to ~/.config/raap-feasibility/projects.json)
    #[serde(default)]
    pub store: Option<PathBuf>,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
    #[serde(default)]
    pub cost: Option<CostConfig>,
    #[serde(default)]
    pub estimator: Option<EstimatorConfig>,
}

impl Config {
    /// Config populated with every default, as written by `init`
    pub fn with_defaults() -> Self {
        Self {
            store: None,
            scoring: Some(ScoringConfig::default()),
            cost: Some(CostConfig::default()),
            estimator: Some(EstimatorConfig::default()),
        }
    }

    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn effective_cost(&self) -> CostConfig {
        self.cost.clone().unwrap_or_default()
    }

    pub fn effective_estimator(&self) -> EstimatorConfig {
        self.estimator.clone().unwrap_or_default()
    }
}
