use crate::backends::{build_client, json_or_error, BackendError};
use crate::config::config::ClinicalBackendConfig;
use serde_json::Value;

const TARGET: &str = "clinical server";

/// Client for the clinical-resource server's Patient endpoint.
#[derive(Debug, Clone)]
pub struct ClinicalBackend {
    client: reqwest::Client,
    base_url: String,
}

impl ClinicalBackend {
    pub fn new(config: &ClinicalBackendConfig) -> Result<Self, BackendError> {
        Ok(Self {
            client: build_client(config.verify_tls, config.timeout_seconds)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a Patient resource. The body is expected to be normalized
    /// already (see `normalize::normalize_outbound`); the server rejects
    /// some shapes the bridge can otherwise produce.
    pub async fn create_patient(&self, patient: &Value) -> Result<Value, BackendError> {
        let url = format!("{}/Patient", self.base_url);
        tracing::debug!(%url, "posting patient resource to clinical server");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(patient)
            .send()
            .await
            .map_err(|err| BackendError::ConnectionFailed(TARGET, err.to_string()))?;

        json_or_error(TARGET, response).await
    }
}
