use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: &str = "10s";

/// Remote cost estimator configuration.
///
/// Example YAML:
/// ```yaml
/// estimator:
///   endpoint: "https://estimator.example.com/api/estimate"
///   timeout: "10s"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// URL the estimate request is POSTed to. Estimates are unavailable
    /// without one.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-request timeout as a humantime duration (default: "10s")
    #[serde(default)]
    pub timeout: Option<String>,
}

impl EstimatorConfig {
    pub fn timeout_duration(&self) -> anyhow::Result<Duration> {
        let raw = self.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT);
        Ok(humantime::parse_duration(raw.trim())?)
    }
}

/// Validate estimator configuration, collecting every error.
pub fn validate_estimator(config: &EstimatorConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref endpoint) = config.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(format!(
                "estimator.endpoint: '{}' must be an http:// or https:// URL",
                endpoint
            ));
        }
    }

    if let Some(ref timeout) = config.timeout {
        match humantime::parse_duration(timeout.trim()) {
            Ok(d) if d.is_zero() => {
                errors.push("estimator.timeout: must be greater than zero".to_string());
            }
            Ok(_) => {}
            Err(e) => {
                errors.push(format!("estimator.timeout: invalid '{}' - {}", timeout, e));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
