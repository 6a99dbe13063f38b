use crate::backends::{build_client, json_or_error, BackendError};
use crate::config::config::RegistryBackendConfig;
use concord_mapper::registry::{RegistryPatientProfile, RegistryProfileView};
use serde_json::Value;

const TARGET: &str = "registry";

/// Client for the registry's patient REST API.
///
/// Every request carries basic authentication. Profile creation goes to the
/// patient-profile endpoint; lookups go to the patient resource.
#[derive(Debug, Clone)]
pub struct RegistryBackend {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl RegistryBackend {
    pub fn new(config: &RegistryBackendConfig) -> Result<Self, BackendError> {
        if !config.verify_tls {
            tracing::warn!("registry TLS certificate validation is disabled");
        }

        Ok(Self {
            client: build_client(config.verify_tls, config.timeout_seconds)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
    }

    /// Creates a patient profile on the registry.
    pub async fn create_patient_profile(
        &self,
        profile: &RegistryPatientProfile,
    ) -> Result<Value, BackendError> {
        let url = format!("{}/bahmnicore/patientprofile", self.base_url);
        tracing::debug!(%url, "posting patient profile to registry");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .json(profile)
            .send()
            .await
            .map_err(|err| BackendError::ConnectionFailed(TARGET, err.to_string()))?;

        json_or_error(TARGET, response).await
    }

    /// Free-text patient search; the registry's response is returned as-is.
    pub async fn search_patients(&self, name: &str) -> Result<Value, BackendError> {
        let url = format!("{}/patient?q={}", self.base_url, urlencoding::encode(name));

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|err| BackendError::ConnectionFailed(TARGET, err.to_string()))?;

        json_or_error(TARGET, response).await
    }

    /// Fetches one patient profile by registry id.
    pub async fn fetch_patient(&self, id: &str) -> Result<RegistryProfileView, BackendError> {
        let url = format!("{}/patient/{}", self.base_url, urlencoding::encode(id));

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|err| BackendError::ConnectionFailed(TARGET, err.to_string()))?;

        let body = json_or_error(TARGET, response).await?;
        serde_json::from_value(body)
            .map_err(|err| BackendError::InvalidResponse(TARGET, err.to_string()))
    }

    /// Authenticated GET of an arbitrary URL — a connectivity probe used to
    /// verify registry links end to end.
    pub async fn review(&self, raw_url: &str) -> Result<Value, BackendError> {
        let url =
            url::Url::parse(raw_url).map_err(|err| BackendError::InvalidUrl(err.to_string()))?;

        let response = self
            .get(url.as_str())
            .send()
            .await
            .map_err(|err| BackendError::ConnectionFailed(TARGET, err.to_string()))?;

        json_or_error(TARGET, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend_for(server: &mockito::ServerGuard) -> RegistryBackend {
        RegistryBackend::new(&RegistryBackendConfig {
            base_url: server.url(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            verify_tls: true,
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn search_encodes_the_query_and_sends_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/patient?q=ana%20p")
            .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results":[]}"#)
            .create_async()
            .await;

        let results = backend_for(&server).search_patients("ana p").await.unwrap();

        assert_eq!(results, json!({ "results": [] }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_becomes_request_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/patient?q=ana")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let err = backend_for(&server).search_patients("ana").await.unwrap_err();

        match err {
            BackendError::RequestFailed(status, body) => {
                assert_eq!(status, 401);
                assert_eq!(body, "Unauthorized");
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_patient_decodes_the_profile_view() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/patient/100GEJ")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "uuid": "b0cbd2e1-0000-0000-0000-0000000000ee",
                    "person": {
                        "gender": "F",
                        "preferredName": { "display": "Ana Pérez" },
                    },
                    "identifiers": [{ "display": "OpenMRS ID = 100GEJ" }],
                })
                .to_string(),
            )
            .create_async()
            .await;

        let view = backend_for(&server).fetch_patient("100GEJ").await.unwrap();

        assert_eq!(view.person.gender, "F");
        assert_eq!(view.identifiers[0].display, "OpenMRS ID = 100GEJ");
    }

    #[tokio::test]
    async fn review_rejects_an_unparseable_url() {
        let server = mockito::Server::new_async().await;
        let err = backend_for(&server).review("::not-a-url::").await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }
}
