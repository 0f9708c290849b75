use super::config::EstimatorConfig;
use super::types::{EstimateRequest, SimulatorEstimate};
use crate::project::Project;
use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

/// Errors from the remote cost estimator.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("No estimator endpoint configured. Set estimator.endpoint in the config file.")]
    NotConfigured,

    #[error("Invalid estimator configuration: {0}")]
    Config(String),

    #[error("Estimator request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Estimator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// HTTP client for the remote cost estimator
#[derive(Debug, Clone)]
pub struct EstimatorClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EstimatorClient {
    pub fn new(config: &EstimatorConfig) -> Result<Self, EstimateError> {
        let endpoint = config.endpoint.clone().ok_or(EstimateError::NotConfigured)?;
        let timeout = config
            .timeout_duration()
            .map_err(|e| EstimateError::Config(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("raap-feasibility/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request an estimate, retrying transient failures
    pub async fn fetch(&self, request: &EstimateRequest) -> Result<SimulatorEstimate, EstimateError> {
        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(std::time::Duration::from_secs(5))
            .take(3);

        Retry::spawn(retry_strategy, move || {
            post_estimate(&self.http, &self.endpoint, request)
        })
        .await
    }

    /// Fetch estimates for several projects concurrently.
    ///
    /// Results come back in completion order, each tagged with its project id.
    pub async fn fetch_all(
        &self,
        projects: &[&Project],
    ) -> Vec<(i64, Result<SimulatorEstimate, EstimateError>)> {
        let mut futures = FuturesUnordered::new();
        for project in projects {
            let id = project.id;
            let request = EstimateRequest::from_project(project);
            futures.push(async move {
                let result = self.fetch(&request).await;
                (id, result)
            });
        }

        let mut results = Vec::with_capacity(projects.len());
        while let Some((id, result)) = futures.next().await {
            match &result {
                Ok(_) => tracing::debug!(project_id = id, "estimate received"),
                Err(e) => tracing::warn!(project_id = id, error = %e, "estimate failed"),
            }
            results.push((id, result));
        }
        results
    }
}

async fn post_estimate(
    http: &reqwest::Client,
    endpoint: &str,
    request: &EstimateRequest,
) -> Result<SimulatorEstimate, EstimateError> {
    let response = http.post(endpoint).json(request).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "estimator returned an error status");
        return Err(EstimateError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<SimulatorEstimate>().await?)
}
