//! HTTP solver client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::schema::{HealthStatus, SimulationRequest, SimulationResult};
use super::{SolverBackend, SolverError};

const DEFAULT_SOLVER_URL: &str = "http://localhost:8000";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the external DC solver service.
pub struct HttpSolver {
    client: Client,
    base_url: String,
}

/// Error payload the service returns on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpSolver {
    pub fn new(base_url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SOLVER_URL.to_string()),
        }
    }

    pub fn with_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Check the service's `/health` endpoint.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<HealthStatus>()
                .await
                .map(|h| h.status == "ok")
                .unwrap_or(false),
            _ => false, // not running or not healthy
        }
    }
}

impl Default for HttpSolver {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl SolverBackend for HttpSolver {
    fn name(&self) -> &str {
        "http"
    }

    async fn is_available(&self) -> bool {
        self.health_check().await
    }

    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SolverError> {
        let url = format!("{}/simulate", self.base_url);
        debug!(url = %url, components = request.components.len(), "posting netlist");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            // The service reports failures as {"detail": "..."}.
            let detail = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| status.to_string());
            return Err(SolverError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<SimulationResult>()
            .await
            .map_err(|e| SolverError::Decode(e.to_string()))
    }
}
