pub mod clinical;
pub mod registry;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failures talking to a downstream system.
///
/// These surface to HTTP callers as a tagged ERROR outcome; they never
/// raise through the mapping engine, which has no failure mode of its own.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("could not connect to {0}: {1}")]
    ConnectionFailed(&'static str, String),
    #[error("{0}: {1}")]
    RequestFailed(u16, String),
    #[error("invalid response from {0}: {1}")]
    InvalidResponse(&'static str, String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Tagged outcome of a forwarding operation, as returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum BridgeOutcome {
    #[serde(rename = "OK")]
    Ok {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    #[serde(rename = "ERROR")]
    Error { message: String },
}

impl BridgeOutcome {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        Self::Ok {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

impl From<BackendError> for BridgeOutcome {
    fn from(err: BackendError) -> Self {
        Self::error(err.to_string())
    }
}

/// Builds a reqwest client for one backend. Disabling `verify_tls` accepts
/// any certificate, which self-hosted registry deployments tend to need.
pub(crate) fn build_client(
    verify_tls: bool,
    timeout_seconds: u64,
) -> Result<reqwest::Client, BackendError> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(timeout_seconds));

    if !verify_tls {
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|err| BackendError::ClientBuild(err.to_string()))
}

/// Decodes a JSON response body, turning non-2xx statuses into a
/// `RequestFailed` carrying the status and the raw body text.
pub(crate) async fn json_or_error(
    target: &'static str,
    response: reqwest::Response,
) -> Result<Value, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::RequestFailed(status.as_u16(), body));
    }

    response
        .json::<Value>()
        .await
        .map_err(|err| BackendError::InvalidResponse(target, err.to_string()))
}
