use crate::backends::BridgeOutcome;
use crate::endpoints::BridgeState;
use crate::normalize::normalize_outbound;
use axum::extract::{Query, State};
use axum::response::Json;
use concord_mapper::clinical::ClinicalPatient;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Name, or part of the name, of the patient.
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchByIdQuery {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub url: String,
}

/// Maps an incoming clinical resource and creates the patient profile on
/// the registry.
pub async fn handle_map(
    State(state): State<Arc<BridgeState>>,
    Json(clinical): Json<ClinicalPatient>,
) -> Json<BridgeOutcome> {
    tracing::info!("received clinical patient resource for registry creation");

    let profile = state.to_registry.map(&clinical);

    let outcome = match state.registry.create_patient_profile(&profile).await {
        Ok(data) => BridgeOutcome::ok("patient created in registry", data),
        Err(err) => {
            tracing::error!(error = %err, "patient-profile creation failed");
            BridgeOutcome::from(err)
        }
    };

    Json(outcome)
}

/// Free-text patient search, proxied to the registry.
pub async fn handle_search(
    State(state): State<Arc<BridgeState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Value> {
    match state.registry.search_patients(&query.name).await {
        Ok(results) => Json(results),
        Err(err) => {
            tracing::error!(error = %err, "patient search failed");
            Json(json!({ "error": err.to_string() }))
        }
    }
}

/// Fetches one registry profile and returns it mapped to the clinical
/// format.
pub async fn handle_search_by_id(
    State(state): State<Arc<BridgeState>>,
    Query(query): Query<SearchByIdQuery>,
) -> Json<Value> {
    match state.registry.fetch_patient(&query.id).await {
        Ok(profile) => {
            let record = state.to_clinical.map(&profile);
            Json(json!({ "fhir": record }))
        }
        Err(err) => {
            tracing::error!(error = %err, id = %query.id, "patient lookup failed");
            Json(json!({ "error": err.to_string() }))
        }
    }
}

/// Authenticated connectivity probe against a registry URL.
pub async fn handle_review_url(
    State(state): State<Arc<BridgeState>>,
    Query(query): Query<ReviewQuery>,
) -> Json<BridgeOutcome> {
    let outcome = match state.registry.review(&query.url).await {
        Ok(data) => BridgeOutcome::ok("Link OK", data),
        Err(err) => BridgeOutcome::from(err),
    };

    Json(outcome)
}

/// Normalizes a clinical resource and creates it on the clinical-resource
/// server.
pub async fn handle_send_to_hapi(
    State(state): State<Arc<BridgeState>>,
    Json(body): Json<Value>,
) -> Json<BridgeOutcome> {
    let normalized = normalize_outbound(body);
    tracing::debug!(body = %normalized, "forwarding normalized patient to clinical server");

    let outcome = match state.clinical.create_patient(&normalized).await {
        Ok(data) => BridgeOutcome::ok("patient forwarded to clinical server", data),
        Err(err) => {
            tracing::error!(error = %err, "clinical-server create failed");
            BridgeOutcome::from(err)
        }
    };

    Json(outcome)
}
